use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

// Debug by default so tests and embedders see everything until configured.
static MIN_LEVEL: AtomicU8 = AtomicU8::new(Level::Debug as u8);

///
/// Level
///

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Display, Serialize, Deserialize)]
#[repr(u8)]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

impl Level {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Ok,
            3 => Self::Warn,
            _ => Self::Error,
        }
    }
}

///
/// Topic
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Topic {
    Config,
    Era,
    Qualify,
    Scan,
    Source,
}

/// Set the process-wide minimum level; lower levels are dropped.
pub fn set_min_level(level: Level) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

#[must_use]
pub fn min_level() -> Level {
    Level::from_u8(MIN_LEVEL.load(Ordering::Relaxed))
}

#[doc(hidden)]
#[must_use]
pub fn __enabled(level: Level) -> bool {
    level >= min_level()
}

#[macro_export]
macro_rules! log {
    // =========================================
    // (1) With topic (normal + trailing comma)
    // =========================================
    ($topic:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner Some(&$topic.to_string()), $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // (2) No topic (normal + trailing comma)
    // =========================================
    ($level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner None::<&str>, $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // INTERNAL
    // =========================================
    (@inner $topic:expr, $level:expr, $fmt:expr $(, $arg:expr)*) => {{
        let level = $level;
        if $crate::log::__enabled(level) {
            let topic_opt: Option<&str> = $topic;
            let message = format!($fmt $(, $arg)*);

            let final_msg = if let Some(t) = topic_opt {
                format!("[{t}] {message}")
            } else {
                message
            };

            let (color, reset) = match level {
                $crate::log::Level::Ok    => ("\x1b[32m", "\x1b[0m"),
                $crate::log::Level::Info  => ("\x1b[34m", "\x1b[0m"),
                $crate::log::Level::Warn  => ("\x1b[33m", "\x1b[0m"),
                $crate::log::Level::Error => ("\x1b[31m", "\x1b[0m"),
                $crate::log::Level::Debug => ("", ""),
            };

            let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());
            eprintln!("{label}| {final_msg}");
        }
    }};
}

///
/// TESTS
///
