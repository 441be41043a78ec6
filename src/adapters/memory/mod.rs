//! In-memory implementations of the host-side ports.
//!
//! Used by the test suites and for wiring the checkout core without a
//! commerce platform behind it.

mod cart_store;
mod order_book;
mod transaction_ledger;

pub use cart_store::InMemoryCartStore;
pub use order_book::InMemoryOrderBook;
pub use transaction_ledger::{AuthorizationRecord, InMemoryTransactionLedger};
