//! # Domain Types
//!
//! Records and projections used throughout the bookstore ledger.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Member      │   │      Sale       │   │      Book       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (mid)       │◄──│  member_id      │   │  id (bid)       │       │
//! │  │  name           │   │  book_id        │──►│  title          │       │
//! │  │  phone          │   │  quantity       │   │  price          │       │
//! │  │  email?         │   │  discount/total │   │  stock          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Projections (read-only joins):                                        │
//! │    SaleView  - full report row                                         │
//! │    SaleBrief - picker row (sid, member name, date)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With the `sqlx` feature, every type decodes straight from the storage
//! columns (`mid`, `bprice`, `sqty`, ...), so nothing downstream touches rows
//! by column name.

use serde::{Deserialize, Serialize};

use crate::inventory::StockCheck;
use crate::money::Money;

/// Auto-incremented sale identifier.
pub type SaleId = i64;

// =============================================================================
// Member
// =============================================================================

/// A store member. Immutable in this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "mid"))]
    pub id: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "mname"))]
    pub name: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "mphone"))]
    pub phone: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "memail"))]
    pub email: Option<String>,
}

// =============================================================================
// Book
// =============================================================================

/// A book available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "bid"))]
    pub id: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "btitle"))]
    pub title: String,

    /// Current unit price in smallest currency units.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "bprice"))]
    pub price: i64,

    /// Remaining sellable copies. Never negative.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "bstock"))]
    pub stock: i64,
}

impl Book {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::new(self.price)
    }

    /// Checks whether `quantity` copies can be sold right now.
    pub fn stock_check(&self, quantity: i64) -> StockCheck {
        StockCheck::evaluate(self.stock, quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One recorded sale of a single book to a member.
///
/// Only `discount` and `total` change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "sid"))]
    pub id: SaleId,

    /// Sale date, `YYYY-MM-DD`.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "sdate"))]
    pub date: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "mid"))]
    pub member_id: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "bid"))]
    pub book_id: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "sqty"))]
    pub quantity: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "sdiscount"))]
    pub discount: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "stotal"))]
    pub total: i64,
}

// =============================================================================
// Projections
// =============================================================================

/// A report row: one sale joined with its member and book.
///
/// `unit_price` is the book's *current* price, which is also the price the
/// amendment path recomputes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleView {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "sid"))]
    pub sale_id: SaleId,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "sdate"))]
    pub date: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "mname"))]
    pub member_name: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "btitle"))]
    pub book_title: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "bprice"))]
    pub unit_price: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "sqty"))]
    pub quantity: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "sdiscount"))]
    pub discount: i64,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "stotal"))]
    pub total: i64,
}

impl SaleView {
    /// Gross amount before discount at the current unit price.
    pub fn gross(&self) -> Money {
        Money::new(self.unit_price).multiply_quantity(self.quantity)
    }
}

/// A picker row used to choose a sale for amendment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleBrief {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "sid"))]
    pub sale_id: SaleId,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "mname"))]
    pub member_name: String,

    #[cfg_attr(feature = "sqlx", sqlx(rename = "sdate"))]
    pub date: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
