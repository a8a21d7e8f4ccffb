//! Error types
//!
//! Geometry problems are fatal and caught at construction or reconfiguration,
//! never mid-tick. Degenerate numerics inside a tick (zero-distance contacts)
//! are recovered locally by the resolver and have no error type.

use thiserror::Error;

/// Errors raised while building or reconfiguring a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Polygon or ball parameters that cannot form a stable container
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong
        reason: String,
    },
}

impl SimError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        SimError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Errors from loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading or writing the settings file failed
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The settings document is not valid JSON for `Settings`
    #[error("settings parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The settings parsed but describe an impossible simulation
    #[error(transparent)]
    Invalid(#[from] SimError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_geometry_message() {
        let err = SimError::geometry("sides must be at least 3, got 2");
        assert_eq!(
            err.to_string(),
            "invalid geometry: sides must be at least 3, got 2"
        );
    }

    #[test]
    fn test_settings_error_wraps_sim_error() {
        let err: SettingsError = SimError::geometry("zero circumradius").into();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert_eq!(err.to_string(), "invalid geometry: zero circumradius");
    }
}
