//! Comparison outcomes.

use super::{ModuleVersion, RuntimeVersion};
use serde::Serialize;

/// Outcome of comparing a runtime declaration against the recommended version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuntimeStatus {
    /// Not the tracked language, or the version could not be read.
    NotApplicable,

    /// Older than the recommended version.
    Outdated {
        /// Declared version.
        current: RuntimeVersion,
        /// Recommended minimum.
        recommended: RuntimeVersion,
    },

    /// At or above the recommended version.
    Current {
        /// Declared version.
        version: RuntimeVersion,
    },
}

impl RuntimeStatus {
    /// Classifies a parsed version. Outdated iff `version < recommended`.
    #[must_use]
    pub fn classify(version: Option<RuntimeVersion>, recommended: RuntimeVersion) -> Self {
        match version {
            None => Self::NotApplicable,
            Some(current) if current < recommended => Self::Outdated {
                current,
                recommended,
            },
            Some(version) => Self::Current { version },
        }
    }

    /// Returns true for [`RuntimeStatus::Outdated`].
    #[must_use]
    pub fn is_outdated(&self) -> bool {
        matches!(self, Self::Outdated { .. })
    }
}

/// Outcome of comparing a module reference against its expected version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleStatus {
    /// No ref tag on the source, or no expected version for its origin.
    Unknown,

    /// The pinned ref differs from the expected version.
    Outdated {
        /// Pinned version.
        current: ModuleVersion,
        /// Expected version for the origin.
        expected: ModuleVersion,
    },

    /// The pinned ref equals the expected version.
    Current {
        /// Pinned version.
        version: ModuleVersion,
    },
}

impl ModuleStatus {
    /// Classifies a pinned version. Any mismatch counts as outdated.
    #[must_use]
    pub fn classify(current: Option<ModuleVersion>, expected: Option<ModuleVersion>) -> Self {
        match (current, expected) {
            (Some(current), Some(expected)) if current == expected => Self::Current {
                version: current,
            },
            (Some(current), Some(expected)) => Self::Outdated { current, expected },
            _ => Self::Unknown,
        }
    }

    /// Returns true for [`ModuleStatus::Outdated`].
    #[must_use]
    pub fn is_outdated(&self) -> bool {
        matches!(self, Self::Outdated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECOMMENDED: RuntimeVersion = RuntimeVersion::new(3, 12);

    #[test]
    fn python_3_9_is_outdated() {
        let version = RuntimeVersion::parse_label("python3.9", "python");
        assert_eq!(version, Some(RuntimeVersion::new(3, 9)));
        assert_eq!(
            RuntimeStatus::classify(version, RECOMMENDED),
            RuntimeStatus::Outdated {
                current: RuntimeVersion::new(3, 9),
                recommended: RECOMMENDED,
            }
        );
    }

    #[test]
    fn recommended_version_is_current() {
        let status = RuntimeStatus::classify(Some(RECOMMENDED), RECOMMENDED);
        assert_eq!(status, RuntimeStatus::Current { version: RECOMMENDED });
        assert!(!status.is_outdated());
    }

    #[test]
    fn unparsed_runtime_is_not_applicable() {
        let version = RuntimeVersion::parse_label("nodejs18.x", "python");
        assert_eq!(
            RuntimeStatus::classify(version, RECOMMENDED),
            RuntimeStatus::NotApplicable
        );
    }

    #[test]
    fn module_matching_expected_is_current() {
        let v4 = ModuleVersion::new(4, 0, 0);
        assert_eq!(
            ModuleStatus::classify(Some(v4), Some(v4)),
            ModuleStatus::Current { version: v4 }
        );
    }

    #[test]
    fn module_mismatch_is_outdated_in_either_direction() {
        let v3 = ModuleVersion::new(3, 0, 0);
        let v4 = ModuleVersion::new(4, 0, 0);
        assert!(ModuleStatus::classify(Some(v3), Some(v4)).is_outdated());
        assert!(ModuleStatus::classify(Some(v4), Some(v3)).is_outdated());
    }

    #[test]
    fn module_without_ref_or_mapping_is_unknown() {
        let v4 = ModuleVersion::new(4, 0, 0);
        assert_eq!(ModuleStatus::classify(None, Some(v4)), ModuleStatus::Unknown);
        assert_eq!(ModuleStatus::classify(Some(v4), None), ModuleStatus::Unknown);
    }
}
