//! Command handlers.
//!
//! Each handler is a thin wrapper: take the composed [`CliContext`], call the
//! engine, format the result for the terminal.
//!
//! [`CliContext`]: crate::bootstrap::CliContext

pub mod candidates;
pub mod check;
pub mod platform;
pub mod probe;
pub mod resolve;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
