//! Processor client adapters.

mod mock_processor_client;

pub use mock_processor_client::{MethodCall, MockProcessorClient};
