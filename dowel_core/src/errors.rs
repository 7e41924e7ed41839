//! # Error Types
//!
//! Structured error types for dowel_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context (which
//! parameter, which yield mode) to diagnose a failure without re-deriving it.
//!
//! ## Taxonomy
//!
//! - **Validation** ([`CalcError::InvalidInput`], [`CalcError::MissingField`]):
//!   a connection violates an invariant at construction.
//! - **Domain** ([`CalcError::DomainError`]): an intermediate quantity would
//!   be mathematically undefined (negative radicand, zero ratio).
//! - **Lookup** ([`CalcError::MaterialNotFound`], [`CalcError::FastenerNotFound`]):
//!   a provider has no entry for the requested key.
//!
//! ## Example
//!
//! ```rust
//! use dowel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(ls_in: f64) -> CalcResult<()> {
//!     if ls_in <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "ls_in".to_string(),
//!             value: ls_in.to_string(),
//!             reason: "Side member thickness must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dowel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, inconsistent)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An intermediate quantity is mathematically undefined for these inputs
    #[error("Domain error in {quantity}{}: {reason}", mode_suffix(.mode))]
    DomainError {
        quantity: String,
        mode: Option<String>,
        reason: String,
    },

    /// Material not found in the material provider
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Fastener size not found in the fastener provider
    #[error("Fastener not found: no entry for nominal diameter {nominal_diameter} in")]
    FastenerNotFound { nominal_diameter: String },

    /// JSON or TOML serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

fn mode_suffix(mode: &Option<String>) -> String {
    match mode {
        Some(m) => format!(" (mode {})", m),
        None => String::new(),
    }
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DomainError that is not tied to a particular yield mode
    pub fn domain_error(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            quantity: quantity.into(),
            mode: None,
            reason: reason.into(),
        }
    }

    /// Attach the yield mode being evaluated when this error surfaced.
    ///
    /// Errors that already carry a mode, and non-domain errors, are
    /// returned unchanged.
    pub fn in_mode(self, mode: impl Into<String>) -> Self {
        match self {
            CalcError::DomainError { quantity, mode: None, reason } => CalcError::DomainError {
                quantity,
                mode: Some(mode.into()),
                reason,
            },
            other => other,
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FastenerNotFound error
    pub fn fastener_not_found(nominal_diameter: impl Into<String>) -> Self {
        CalcError::FastenerNotFound {
            nominal_diameter: nominal_diameter.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for failures raised while validating a connection
    pub fn is_validation(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// True for failures raised by a property provider
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            CalcError::MaterialNotFound { .. } | CalcError::FastenerNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FastenerNotFound { .. } => "FASTENER_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("ls_in", "0", "Side member thickness must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("gm").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::material_not_found("OAK").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::fastener_not_found("0.4000").error_code(), "FASTENER_NOT_FOUND");
        assert_eq!(CalcError::domain_error("K1", "negative").error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_in_mode_attaches_once() {
        let err = CalcError::domain_error("K3", "negative radicand")
            .in_mode("IIIs")
            .in_mode("IV");
        match err {
            CalcError::DomainError { mode, .. } => assert_eq!(mode.as_deref(), Some("IIIs")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_domain_error_display() {
        let err = CalcError::domain_error("K2", "negative radicand").in_mode("IIIm");
        assert_eq!(err.to_string(), "Domain error in K2 (mode IIIm): negative radicand");

        let err = CalcError::domain_error("RE", "zero side bearing strength");
        assert_eq!(err.to_string(), "Domain error in RE: zero side bearing strength");
    }

    #[test]
    fn test_classification() {
        assert!(CalcError::invalid_input("d_in", "-1", "bad").is_validation());
        assert!(CalcError::fastener_not_found("0.4").is_lookup());
        assert!(!CalcError::domain_error("K1", "bad").is_lookup());
    }
}
