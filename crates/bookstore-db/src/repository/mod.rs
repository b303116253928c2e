//! # Repository Module
//!
//! Database repository implementations for the bookstore ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │  db.books().get_by_id("B001")                                   │
//! │       ▼                                                                 │
//! │  BookRepository (pool-backed convenience methods)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  book::find(&mut conn, id)  ← connection-level function                │
//! │       ▲                                                                 │
//! │       │  same function, called with &mut *tx                            │
//! │  SaleLedger transaction                                                │
//! │                                                                         │
//! │  SQL lives in one place per table; the ledger reuses it inside its     │
//! │  transactions instead of going through the pool.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MemberRepository`](member::MemberRepository) - Member lookups
//! - [`BookRepository`](book::BookRepository) - Book lookups and price updates
//! - [`SaleRepository`](sale::SaleRepository) - Raw sale rows
//! - [`ReportRepository`](report::ReportRepository) - Read-only joined projections

pub mod book;
pub mod member;
pub mod report;
pub mod sale;
