//! Version parsing error types.

use thiserror::Error;

/// Errors produced when parsing versions supplied through configuration.
///
/// Versions found inside scanned files never produce errors; they parse to
/// `None` and are reported as not applicable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The runtime version is not of the form `MAJOR.MINOR`.
    #[error("Invalid runtime version '{0}', expected MAJOR.MINOR")]
    InvalidRuntime(String),

    /// The module version is not of the form `vMAJOR.MINOR.PATCH`.
    #[error("Invalid module version '{0}', expected vMAJOR.MINOR.PATCH")]
    InvalidModule(String),
}
