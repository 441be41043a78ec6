//! Payment transaction bookkeeping port.

use async_trait::async_trait;

use crate::domain::checkout::Order;
use crate::domain::foundation::{DomainError, PspReference};

/// Records authorization transactions against placed orders.
///
/// Best-effort: callers log failures and never undo the order.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    async fn record_authorization(
        &self,
        order: &Order,
        psp_reference: &PspReference,
    ) -> Result<(), DomainError>;
}
