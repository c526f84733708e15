//! Diagnostic command-line front end for the ibtools resolution engine.
//!
//! The binary in `main.rs` parses arguments, initializes logging and hands
//! the composed [`CliContext`] to the command handlers.

#![deny(unused_crate_dependencies)]

// Used by the binary target only.
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliContext, bootstrap, load_settings};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
