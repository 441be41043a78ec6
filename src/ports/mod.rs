//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the checkout core and the host commerce platform. Adapters implement
//! these ports.
//!
//! - `CartStore` - Parks and restores the shopper's cart around a redirect
//! - `OrderPlacer` - Places orders and looks them up by merchant reference
//! - `TransactionRecorder` - Best-effort authorization bookkeeping
//! - `ProcessorClient` - Direct authorisation and 3-D Secure completion

mod cart_store;
mod order_placer;
mod processor_client;
mod transaction_recorder;

pub use cart_store::CartStore;
pub use order_placer::OrderPlacer;
pub use processor_client::{ProcessorClient, ProcessorError, ProcessorErrorCode};
pub use transaction_recorder::TransactionRecorder;
