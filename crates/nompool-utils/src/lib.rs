//!
//! Utility helpers shared across the nompool crates: scan-order randomness
//! and display formatting. Each submodule provides a focused toolkit used by
//! the core library and the CLI.
//!

pub mod format;
pub mod rand;
