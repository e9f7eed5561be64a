//! Rig configuration errors

/// Rejected rig configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidConstant { name: &'static str, value: f32 },

    #[error("edge tolerance must lie in [0, 0.5), got {0}")]
    EdgeTolerance(f32),

    #[error("camera offset must have a finite, non-zero length")]
    DegenerateOffset,
}

/// Reject ranges whose ends are non-finite or inverted
pub(crate) fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}

/// Reject negative or non-finite tuning constants
pub(crate) fn check_constant(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidConstant { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(check_range("zoom", 10.0, 50.0).is_ok());
        assert!(check_range("zoom", 10.0, 10.0).is_ok());
        assert_eq!(
            check_range("zoom", 50.0, 10.0),
            Err(ConfigError::InvertedRange {
                name: "zoom",
                min: 50.0,
                max: 10.0
            })
        );
        assert!(check_range("yaw", f32::NEG_INFINITY, f32::INFINITY).is_ok());
        assert!(check_range("yaw", f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_check_constant() {
        assert!(check_constant("damping", 0.0).is_ok());
        assert!(check_constant("damping", -1.0).is_err());
        assert!(check_constant("damping", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::InvertedRange {
            name: "zoom",
            min: 50.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "zoom: minimum 50 exceeds maximum 10");
    }
}
