//! # bookstore-db: Database Layer for the Bookstore Ledger
//!
//! This crate provides storage and the transactional sale ledger.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Ledger Data Flow                          │
//! │                                                                         │
//! │  Menu / CLI (create sale, amend discount, list)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bookstore-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  SaleLedger   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (ledger.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │ InventoryGuard│    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Repositories  │    │ 001_init.sql │  │   │
//! │  │   │ DbConfig      │    │ (member/book/ │    │ + seed rows  │  │   │
//! │  │   │               │    │  sale/report) │    │  (seed.rs)   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │             bookstore.db  (or BOOKSTORE_DB_PATH)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database, ledger and configuration error types
//! - [`ledger`] - Sale creation and discount amendment (transactional)
//! - [`inventory`] - Stock checks and the guarded decrement
//! - [`repository`] - Member, book, sale and report queries
//! - [`seed`] - Default rows for a fresh database
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_core::NewSale;
//! use bookstore_db::{seed, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! seed::seed_defaults(&db).await?;
//!
//! let ledger = db.ledger();
//! let sid = ledger
//!     .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 2, 100))
//!     .await?;
//!
//! for row in ledger.list_sales().await? {
//!     println!("{} {} {}", row.sale_id, row.member_name, row.total);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, DbError, DbResult, LedgerError, LedgerResult};
pub use inventory::InventoryGuard;
pub use ledger::SaleLedger;
pub use pool::{Database, DbConfig};
pub use seed::{seed_defaults, SeedSummary};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::member::MemberRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
