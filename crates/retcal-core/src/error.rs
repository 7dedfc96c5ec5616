//! Error types for the calibration core.
//!
//! This module provides structured error types for parameter validation
//! and pattern generation.

use thiserror::Error;

/// Errors that can occur while building a calibration pattern.
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// Invalid parameters were provided to the generator.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Pattern generation failed.
    #[error("Pattern generation failed: {0}")]
    GenerationFailed(String),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to sweep parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for calibration operations.
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_error_display() {
        let err = CalibrationError::InvalidParameters("steps_x must be >= 1".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: steps_x must be >= 1");

        let err = CalibrationError::GenerationFailed("empty sweep".to_string());
        assert_eq!(err.to_string(), "Pattern generation failed: empty sweep");
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "layer_height".to_string(),
            value: -0.2,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'layer_height' out of range: -0.2 (valid: 0..1)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidDimensions("bed_size_x".to_string());
        let cal_err: CalibrationError = param_err.into();
        assert!(matches!(cal_err, CalibrationError::Parameter(_)));
    }
}
