//! Port definitions for the resolution engine.
//!
//! Ports are the seams between the pure locator logic and the operating
//! system. Core owns the traits; `ibtools-runtime` owns the implementations
//! that spawn processes, stat files and list directories.

mod candidates;
mod env;
mod validator;
mod version_probe;

pub use candidates::CandidateSource;
pub use env::{EnvProvider, SystemEnv};
pub use validator::UtilityValidator;
pub use version_probe::VersionProbe;
