//! # Inventory Rule
//!
//! The pure half of the inventory guard: given a stock level and a requested
//! quantity, decide whether the sale may proceed. The transactional half
//! (re-checking and decrementing inside the sale transaction) lives in
//! `bookstore-db`.
//!
//! ```text
//! stock = 48, requested = 2    → StockCheck { sufficient: true,  current_stock: 48 }
//! stock = 48, requested = 100  → StockCheck { sufficient: false, current_stock: 48 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Outcome of an availability check. Pure read, no side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheck {
    pub sufficient: bool,
    pub current_stock: i64,
}

impl StockCheck {
    /// Evaluates `requested` copies against `current_stock`.
    pub fn evaluate(current_stock: i64, requested: i64) -> Self {
        StockCheck {
            sufficient: current_stock >= requested,
            current_stock,
        }
    }

    /// Turns an insufficient check into `CoreError::InsufficientStock`.
    pub fn ensure(self, book_id: &str, requested: i64) -> CoreResult<()> {
        if self.sufficient {
            return Ok(());
        }

        Err(CoreError::InsufficientStock {
            book_id: book_id.to_string(),
            current: self.current_stock,
            requested,
        })
    }
}
