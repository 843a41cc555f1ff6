//! Version parsing and comparison.
//!
//! Two kinds of versions are tracked:
//! - [`RuntimeVersion`] - a `(major, minor)` pair parsed from runtime labels
//!   such as `python3.12`, compared against a recommended minimum.
//! - [`ModuleVersion`] - a `vMAJOR.MINOR.PATCH` tag pinned on a module source,
//!   compared against the version expected for that module's origin.

mod error;
mod expected;
mod module;
mod runtime;
mod status;

pub use error::VersionError;
pub use expected::ExpectedVersions;
pub use module::ModuleVersion;
pub use runtime::RuntimeVersion;
pub use status::{ModuleStatus, RuntimeStatus};
