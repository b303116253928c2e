//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Book prices, discounts and totals are whole numbers of the smallest   │
//! │  currency unit. Keeping them as i64 means:                             │
//! │                                                                         │
//! │    total = price × quantity − discount                                 │
//! │                                                                         │
//! │  is exact and deterministic. No rounding step exists anywhere.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::new(600);
//! let gross = price * 2;                       // 1200
//! let total = gross - Money::new(100);         // 1100
//! assert_eq!(total.units(), 1100);
//! ```
//!
//! Presentation (thousands separators, currency symbols) belongs to callers;
//! `Display` prints the bare integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: totals may legitimately go negative when a discount
///   exceeds the gross amount; the ledger does not clamp them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **`#[serde(transparent)]`**: serializes as a plain number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from smallest currency units.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::new(1200);
    /// assert_eq!(price.units(), 1200);
    /// ```
    #[inline]
    pub const fn new(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in smallest currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// For display figures only; totals that get stored go through
    /// [`Money::checked_multiply_quantity`].
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let unit_price = Money::new(1200);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 3600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity. `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Subtracts `other`. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::new(600).checked_sub(Money::new(700)), Some(Money::new(-100)));
    /// assert_eq!(Money::new(600).checked_sub(Money::new(i64::MIN)), None);
    /// ```
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(Money::new(3400).to_string(), "3400");
        assert_eq!(Money::new(-150).to_string(), "-150");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3000);

        let mut running = Money::zero();
        running += a;
        running -= b;
        assert_eq!(running, Money::new(500));
    }

    #[test]
    fn test_negative_result_is_kept() {
        let gross = Money::new(600);
        let net = gross - Money::new(700);
        assert!(net.is_negative());
        assert_eq!(i64::from(net), -100);
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        assert_eq!(Money::new(600).checked_multiply_quantity(2), Some(Money::new(1200)));
        assert_eq!(Money::new(i64::MAX).checked_multiply_quantity(2), None);
        assert_eq!(Money::new(600).checked_sub(Money::new(i64::MIN)), None);
        assert_eq!(Money::new(i64::MAX).multiply_quantity(2), Money::new(i64::MAX));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::new(1100)).unwrap();
        assert_eq!(json, "1100");
    }
}
