//! Mock processor client for testing.
//!
//! Provides a configurable implementation of `ProcessorClient` for unit and
//! integration tests. Supports:
//! - Queued results per method
//! - Error injection
//! - Call tracking

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::checkout::{Cart, ProcessorResult, ResultCode};
use crate::ports::{ProcessorClient, ProcessorError};

/// Mock processor client for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockProcessorClient::new();
///
/// // Configure responses
/// mock.push_authorize_result(ProcessorResult::new(ResultCode::Authorised));
///
/// // Inject errors
/// mock.set_error(ProcessorError::network("timeout"));
///
/// // Assert calls
/// assert_eq!(mock.call_count("authorize_challenge"), 0);
/// ```
#[derive(Default)]
pub struct MockProcessorClient {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Results returned by `authorize`, oldest first.
    authorize_results: VecDeque<ProcessorResult>,

    /// Results returned by `authorize_challenge`, oldest first.
    challenge_results: VecDeque<ProcessorResult>,

    /// Error to return on every call until cleared.
    error: Option<ProcessorError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, ProcessorError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockProcessorClient {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a result for the next `authorize` call.
    pub fn push_authorize_result(&self, result: ProcessorResult) {
        self.inner
            .lock()
            .unwrap()
            .authorize_results
            .push_back(result);
    }

    /// Queue a result for the next `authorize_challenge` call.
    pub fn push_challenge_result(&self, result: ProcessorResult) {
        self.inner
            .lock()
            .unwrap()
            .challenge_results
            .push_back(result);
    }

    /// Fail every call with this error.
    pub fn set_error(&self, error: ProcessorError) {
        self.inner.lock().unwrap().error = Some(error);
    }

    /// Fail calls to one method with this error.
    pub fn set_method_error(&self, method: &str, error: ProcessorError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), ProcessorError> {
        let state = self.inner.lock().unwrap();
        if let Some(err) = state.method_errors.get(method) {
            return Err(err.clone());
        }
        if let Some(err) = &state.error {
            return Err(err.clone());
        }
        Ok(())
    }
}

impl Clone for MockProcessorClient {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl ProcessorClient for MockProcessorClient {
    async fn authorize(&self, cart: &Cart) -> Result<ProcessorResult, ProcessorError> {
        self.record_call(
            "authorize",
            vec![cart.code.to_string(), cart.total.minor_units().to_string()],
        );
        self.check_error("authorize")?;

        Ok(self
            .inner
            .lock()
            .unwrap()
            .authorize_results
            .pop_front()
            .unwrap_or_else(|| ProcessorResult::new(ResultCode::Authorised)))
    }

    async fn authorize_challenge(
        &self,
        pa_res: &str,
        md: &str,
    ) -> Result<ProcessorResult, ProcessorError> {
        self.record_call(
            "authorize_challenge",
            vec![pa_res.to_string(), md.to_string()],
        );
        self.check_error("authorize_challenge")?;

        Ok(self
            .inner
            .lock()
            .unwrap()
            .challenge_results
            .pop_front()
            .unwrap_or_else(|| ProcessorResult::new(ResultCode::Authorised)))
    }
}
