//!
//! Small formatting helpers shared across logs and CLI output.
//!

///
/// Shorten a string in the middle when it is longer than `threshold` chars.
///
/// Keeps the first `head` and last `tail` chars around a '…'. The input is
/// returned unchanged when it is short enough or when cutting would not make
/// it shorter.
///
#[must_use]
pub fn ellipsize_middle(s: &str, threshold: usize, head: usize, tail: usize) -> String {
    let len = s.chars().count();
    if len <= threshold || head + 1 + tail >= len {
        return s.to_string();
    }

    let prefix: String = s.chars().take(head).collect();
    let suffix: String = s.chars().skip(len - tail).collect();

    format!("{prefix}…{suffix}")
}

/// `0x`-prefixed lowercase hex of `bytes`.
#[must_use]
pub fn hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Compact `0x1234…cdef` form for log lines.
#[must_use]
pub fn short_hex(bytes: &[u8]) -> String {
    ellipsize_middle(&hex_prefixed(bytes), 14, 6, 4)
}

///
/// TESTS
///
