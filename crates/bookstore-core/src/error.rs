//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Why a single input field was rejected          │
//! │                                                                         │
//! │  bookstore-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── LedgerError      - CoreError | PersistenceFailure(DbError)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` is detected before any mutation, so all of them are
//! recoverable: the caller may retry with corrected input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Sale date is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(ValidationError),

    /// Quantity is not a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(ValidationError),

    /// Discount is not an integer, or is negative where that is forbidden.
    #[error("Invalid discount: {0}")]
    InvalidDiscount(ValidationError),

    /// Picker selection does not point into the sale listing.
    #[error("Invalid selection: {0}")]
    InvalidSelection(ValidationError),

    /// A referenced member, book or sale does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Insufficient stock to complete sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Create sale (qty: 100)
    ///      │
    ///      ▼
    /// Check stock: current=48
    ///      │
    ///      ▼
    /// InsufficientStock { book_id: "B001", current: 48, requested: 100 }
    ///      │
    ///      ▼
    /// Menu shows: "insufficient stock (current: 48)"
    /// ```
    #[error("Insufficient stock for {book_id}: current {current}, requested {requested}")]
    InsufficientStock {
        book_id: String,
        current: i64,
        requested: i64,
    },

    /// `price × quantity − discount` does not fit in an amount.
    #[error("Sale total out of range: {unit_price} x {quantity} - {discount}")]
    TotalOutOfRange {
        unit_price: i64,
        quantity: i64,
        discount: i64,
    },
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Why a single input field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not an integer.
    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger { field: String, value: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            book_id: "B001".to_string(),
            current: 48,
            requested: 100,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for B001: current 48, requested 100"
        );

        let err = CoreError::not_found("Member", "M999");
        assert_eq!(err.to_string(), "Member not found: M999");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotAnInteger {
            field: "quantity".to_string(),
            value: "two".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be an integer, got 'two'");

        let err = CoreError::InvalidDiscount(ValidationError::MustNotBeNegative {
            field: "discount".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid discount: discount must not be negative"
        );
    }
}
