//! # Ledger Rules
//!
//! Sale requests and the total formula shared by creation and amendment.
//!
//! ## Total Formula
//! ```text
//! total = unit_price × quantity − discount
//!
//! 600 × 2 − 100 = 1100
//! 600 × 1 − 700 = −100   (kept as-is, never clamped)
//! 600 × 1 − i64::MIN      → TotalOutOfRange (checked, never wraps)
//! ```
//!
//! Creation uses the book's price at the moment of sale. Amendment uses the
//! book's price at the moment of amendment; no per-sale price is stored.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_amended_discount, validate_quantity, validate_sale_date};

/// Computes a sale total.
///
/// ## Errors
/// * `TotalOutOfRange` - The product or the difference overflows i64
pub fn sale_total(unit_price: Money, quantity: i64, discount: Money) -> CoreResult<Money> {
    unit_price
        .checked_multiply_quantity(quantity)
        .and_then(|gross| gross.checked_sub(discount))
        .ok_or(CoreError::TotalOutOfRange {
            unit_price: unit_price.units(),
            quantity,
            discount: discount.units(),
        })
}

/// Validates a replacement discount and computes the new total from the
/// current unit price and the sale's stored quantity.
pub fn amended_total(unit_price: Money, quantity: i64, new_discount: i64) -> CoreResult<Money> {
    validate_amended_discount(new_discount)?;
    sale_total(unit_price, quantity, Money::new(new_discount))
}

// =============================================================================
// New Sale Request
// =============================================================================

/// A request to record a sale, with already-parsed arguments.
///
/// ## Example
/// ```rust
/// use bookstore_core::NewSale;
///
/// let sale = NewSale::new("2024-02-01", "M001", "B001", 2, 100);
/// assert!(sale.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    pub date: String,
    pub member_id: String,
    pub book_id: String,
    pub quantity: i64,
    /// Flat discount. Any integer is accepted at creation, including negatives.
    pub discount: i64,
}

impl NewSale {
    pub fn new(
        date: impl Into<String>,
        member_id: impl Into<String>,
        book_id: impl Into<String>,
        quantity: i64,
        discount: i64,
    ) -> Self {
        NewSale {
            date: date.into(),
            member_id: member_id.into(),
            book_id: book_id.into(),
            quantity,
            discount,
        }
    }

    /// Field checks that need no store access: date first, then quantity.
    pub fn validate(&self) -> CoreResult<()> {
        validate_sale_date(&self.date)?;
        validate_quantity(self.quantity)?;
        Ok(())
    }

    /// Total for this request at the given unit price.
    pub fn total_at(&self, unit_price: Money) -> CoreResult<Money> {
        sale_total(unit_price, self.quantity, Money::new(self.discount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
