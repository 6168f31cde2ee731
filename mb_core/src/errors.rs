//! # Error Types
//!
//! Structured error types for mb_core. Only two things can go wrong before a
//! mass & balance calculation runs: the reference data is broken, or the
//! caller handed over a load that does not fit the aircraft. Everything else
//! (overweight, CG out of envelope, ...) is an [`Alert`](crate::calculations::Alert),
//! not an error.
//!
//! ## Example
//!
//! ```rust
//! use mb_core::errors::{CalcError, CalcResult};
//!
//! fn validate_density(aircraft: &str, density: f64) -> CalcResult<()> {
//!     if density <= 0.0 {
//!         return Err(CalcError::invalid_profile(
//!             aircraft,
//!             "fuel_density",
//!             "Fuel density must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_density("Tecnam P2008", 0.72).is_ok());
//! assert!(validate_density("Tecnam P2008", 0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mb_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for mass & balance operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Reference data for an aircraft violates a data-model invariant
    #[error("Invalid profile for '{aircraft}': {field} - {reason}")]
    InvalidProfile {
        aircraft: String,
        field: String,
        reason: String,
    },

    /// Aircraft key not present in the profile table
    #[error("Aircraft not found: {name}")]
    AircraftNotFound { name: String },

    /// An input value does not fit the selected aircraft
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Planner configuration is unusable
    #[error("Invalid configuration '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or parse error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Report rendering (typst compile or PDF export) failed
    #[error("Report generation failed: {reason}")]
    ReportFailed { reason: String },
}

impl CalcError {
    /// Create an InvalidProfile error
    pub fn invalid_profile(
        aircraft: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidProfile {
            aircraft: aircraft.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an AircraftNotFound error
    pub fn aircraft_not_found(name: impl Into<String>) -> Self {
        CalcError::AircraftNotFound { name: name.into() }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by broken reference data or configuration.
    ///
    /// These should stop the program at load time rather than be shown
    /// next to a calculation.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidProfile { .. } | CalcError::InvalidConfig { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidProfile { .. } => "INVALID_PROFILE",
            CalcError::AircraftNotFound { .. } => "AIRCRAFT_NOT_FOUND",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidConfig { .. } => "INVALID_CONFIG",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ReportFailed { .. } => "REPORT_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_profile("Cessna 152", "baggage_arm", "Shape mismatch");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidProfile\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::aircraft_not_found("Piper").error_code(), "AIRCRAFT_NOT_FOUND");
        assert_eq!(
            CalcError::invalid_input("baggage", "single", "split expected").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_configuration_errors() {
        assert!(CalcError::invalid_profile("X", "fuel_density", "zero").is_configuration_error());
        assert!(CalcError::invalid_config("near_margin", "negative").is_configuration_error());
        assert!(!CalcError::aircraft_not_found("X").is_configuration_error());
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::aircraft_not_found("Piper Cub");
        assert_eq!(error.to_string(), "Aircraft not found: Piper Cub");
    }
}
