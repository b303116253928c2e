//! # Validation Module
//!
//! Input validation for sale creation, amendment and the amendment picker.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu layer (outside this workspace)                          │
//! │  └── parse_quantity / parse_discount / parse_selection (text → int)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, called by the ledger before any mutation        │
//! │  ├── validate_sale_date                                                │
//! │  ├── validate_quantity                                                 │
//! │  └── validate_amended_discount                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger transaction (bookstore-db)                            │
//! │  ├── member / book existence                                           │
//! │  └── stock sufficiency (guarded decrement)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::validation::{parse_quantity, validate_sale_date};
//!
//! assert!(validate_sale_date("2024-02-01").is_ok());
//! assert!(validate_sale_date("2024-2-1").is_err());
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::{SALE_DATE_FORMAT, SALE_DATE_LEN};

/// Result type for field-level checks.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Byte offsets of the two `-` separators in `YYYY-MM-DD`.
const DATE_SEPARATORS: [usize; 2] = [4, 7];

// =============================================================================
// Sale Field Validators
// =============================================================================

/// Validates a sale date.
///
/// ## Rules
/// - Exactly 10 characters
/// - `-` at positions 4 and 7, and nowhere else
/// - Parses as a real calendar date
///
/// The date is kept as text by the store; the parsed value is returned for
/// callers that want it.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_sale_date;
///
/// assert!(validate_sale_date("2024-01-15").is_ok());
/// assert!(validate_sale_date("2024/01/15").is_err());
/// assert!(validate_sale_date("2024-02-30").is_err());
/// ```
pub fn validate_sale_date(date: &str) -> CoreResult<NaiveDate> {
    let invalid = |reason: &str| {
        CoreError::InvalidDate(ValidationError::InvalidFormat {
            field: "sale date".to_string(),
            reason: reason.to_string(),
        })
    };

    if date.chars().count() != SALE_DATE_LEN {
        return Err(invalid("expected YYYY-MM-DD"));
    }

    let separators: Vec<usize> = date.match_indices('-').map(|(idx, _)| idx).collect();
    if separators != DATE_SEPARATORS {
        return Err(invalid("expected YYYY-MM-DD"));
    }

    NaiveDate::parse_from_str(date, SALE_DATE_FORMAT).map_err(|_| invalid("not a calendar date"))
}

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }));
    }

    Ok(())
}

/// Validates the discount given when amending a sale.
///
/// Sale creation accepts any integer discount; amendment rejects negatives.
pub fn validate_amended_discount(discount: i64) -> CoreResult<()> {
    if discount < 0 {
        return Err(CoreError::InvalidDiscount(
            ValidationError::MustNotBeNegative {
                field: "discount".to_string(),
            },
        ));
    }

    Ok(())
}

// =============================================================================
// Text Parsers (menu layer helpers)
// =============================================================================

fn parse_integer(field: &str, input: &str) -> ValidationResult<i64> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field: field.to_string(),
            value: trimmed.to_string(),
        })
}

/// Parses and validates a quantity typed by a user.
///
/// Non-numeric and non-positive input both fail with `InvalidQuantity`.
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let qty = parse_integer("quantity", input).map_err(CoreError::InvalidQuantity)?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses a discount typed by a user.
///
/// Only the integer check is applied here; whether a negative value is
/// acceptable depends on the operation.
pub fn parse_discount(input: &str) -> CoreResult<i64> {
    parse_integer("discount", input).map_err(CoreError::InvalidDiscount)
}

/// Parses a 1-indexed picker selection against a listing of `len` rows.
///
/// ## Returns
/// * `Ok(None)` - Empty input, the user cancelled
/// * `Ok(Some(n))` - A position in `1..=len`
/// * `Err(InvalidSelection)` - Anything else
pub fn parse_selection(input: &str, len: usize) -> CoreResult<Option<usize>> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let choice = parse_integer("selection", input).map_err(CoreError::InvalidSelection)?;
    validate_selection(choice, len).map(Some)
}

/// Checks that a 1-indexed position falls inside a listing of `len` rows.
pub fn validate_selection(position: i64, len: usize) -> CoreResult<usize> {
    let max = len as i64;
    if position < 1 || position > max {
        return Err(CoreError::InvalidSelection(ValidationError::OutOfRange {
            field: "selection".to_string(),
            min: 1,
            max,
        }));
    }

    Ok(position as usize)
}

// =============================================================================
// Unit Tests
// =============================================================================
