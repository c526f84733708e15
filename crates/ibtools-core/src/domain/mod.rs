//! Domain types for utility resolution.
//!
//! Pure value types with no infrastructure dependencies: the utility and
//! platform enumerations, resolved locations, and the attempt/not-found
//! records produced by the locator.

mod location;
mod platform;
mod resolution;
mod utility;

pub use location::UtilityLocation;
pub use platform::PlatformType;
pub use resolution::{Attempt, AttemptOutcome, ResolveReport, UtilityNotFound};
pub use utility::{ParseUtilityError, UtilityType};
