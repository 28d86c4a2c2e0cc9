//! # Error Types
//!
//! Domain-level error types for stockroom-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ValidationError (this module) - field-level constraint violations  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DbError::Validation (stockroom-db) - a rejected write              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Web layer renders the form error against the offending field       │
//! │                                                                     │
//! │  InsufficientStock travels separately, inside SaleOutcome::Rejected │
//! │  - a refused sale is an outcome, not a storage failure.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the offending field
//! 3. Errors are enum variants, never String

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level constraint violation on a write.
///
/// A write that fails validation is rejected in full - nothing is partially
/// applied. The variant identifies the offending field so the form layer can
/// attach the message to the right input.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., a string that is not an email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The offending field's name.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Insufficient Stock
// =============================================================================

/// The refusal reason for a sale attempt that asked for more units than the
/// product has on hand.
///
/// Deliberately not a `ValidationError`: callers render a specific
/// "insufficient stock" message, and the check belongs to the sale
/// transaction, not to field validation.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
pub struct InsufficientStock {
    pub product_id: String,
    pub available: i64,
    pub requested: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        };
        assert_eq!(err.to_string(), "unit_price must not be negative");
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 255,
        };
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = InsufficientStock {
            product_id: "p-42".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product p-42: available 3, requested 5"
        );
    }
}
