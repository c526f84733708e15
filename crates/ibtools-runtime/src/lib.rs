//! OS-facing adapters for the ibtools resolution engine.
//!
//! This crate implements the ports defined in `ibtools-core`:
//!
//! - [`ProcessVersionProbe`] runs a candidate under a timeout to read its version
//! - [`FsUtilityValidator`] checks that a candidate is an executable file
//! - [`PlatformSearchStrategy`] enumerates candidate paths per platform
//!
//! and wires them together in [`CrossPlatformUtilLocator`].

#![deny(unused_crate_dependencies)]

pub mod locator;
pub mod probe;
pub mod search;
pub mod validate;

pub use locator::CrossPlatformUtilLocator;
pub use probe::{ProbeOutcome, ProcessVersionProbe};
pub use search::PlatformSearchStrategy;
pub use validate::FsUtilityValidator;
