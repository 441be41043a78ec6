//! In-memory authorization ledger.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::checkout::Order;
use crate::domain::foundation::{DomainError, PspReference};
use crate::ports::TransactionRecorder;

/// One recorded authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRecord {
    pub order_code: String,
    pub psp_reference: PspReference,
}

/// Keeps authorization records in memory; can be switched to fail.
#[derive(Default)]
pub struct InMemoryTransactionLedger {
    records: RwLock<Vec<AuthorizationRecord>>,
    failing: AtomicBool,
}

impl InMemoryTransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose every write fails.
    pub fn failing() -> Self {
        let ledger = Self::default();
        ledger.failing.store(true, Ordering::SeqCst);
        ledger
    }

    pub fn records(&self) -> Vec<AuthorizationRecord> {
        self.records.read().expect("ledger lock poisoned").clone()
    }
}

#[async_trait]
impl TransactionRecorder for InMemoryTransactionLedger {
    async fn record_authorization(
        &self,
        order: &Order,
        psp_reference: &PspReference,
    ) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::storage("transaction ledger unavailable")
                .with_detail("order_code", order.code.clone()));
        }

        self.records
            .write()
            .map_err(|_| DomainError::storage("ledger lock poisoned"))?
            .push(AuthorizationRecord {
                order_code: order.code.clone(),
                psp_reference: psp_reference.clone(),
            });
        Ok(())
    }
}
