//! # bookstore-core: Pure Business Logic for the Bookstore Ledger
//!
//! This crate holds the rules of the sale ledger as pure functions with zero
//! I/O dependencies. Persistence and transactions live in `bookstore-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Ledger Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Menu / CLI layer (not in this workspace)           │   │
//! │  │     prompt ──► parse_quantity / parse_discount ──► call ledger  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             bookstore-db (SaleLedger, repositories)             │   │
//! │  │        transactions, stock decrement, sale insert/update        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ uses                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │  ledger   │ │   validation   │  │   │
//! │  │   │ Member   │ │  Money   │ │ NewSale   │ │  sale dates    │  │   │
//! │  │   │ Book     │ │          │ │ totals    │ │  quantities    │  │   │
//! │  │   │ Sale     │ │          │ ├───────────┤ │  discounts     │  │   │
//! │  │   │ SaleView │ │          │ │ inventory │ │  selections    │  │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records and projections (Member, Book, Sale, SaleView, SaleBrief)
//! - [`money`] - Money type with integer arithmetic
//! - [`ledger`] - Sale requests and total computation
//! - [`inventory`] - Stock sufficiency rule
//! - [`validation`] - Input validation and parsing helpers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::ledger::sale_total;
//! use bookstore_core::money::Money;
//!
//! // 2 copies at 600 with a flat discount of 100
//! let total = sale_total(Money::new(600), 2, Money::new(100)).unwrap();
//! assert_eq!(total.units(), 1100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::StockCheck;
pub use ledger::NewSale;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of a sale date in `YYYY-MM-DD` form.
pub const SALE_DATE_LEN: usize = 10;

/// Format string used to parse sale dates as calendar dates.
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";
