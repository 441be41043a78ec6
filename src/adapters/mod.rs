//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the checkout core to its collaborators:
//! - `memory` - In-memory cart store, order book and transaction ledger
//! - `processor` - Mock processor client

pub mod memory;
pub mod processor;

pub use memory::{
    AuthorizationRecord, InMemoryCartStore, InMemoryOrderBook, InMemoryTransactionLedger,
};
pub use processor::{MethodCall, MockProcessorClient};
