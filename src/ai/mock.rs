//! Mock model for tests and offline runs.
//!
//! Returns one canned result for every call and records the requests it saw,
//! so tests can assert on prompts and schemas.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{FlowError, GenerateRequest, GenerativeModel};

pub struct MockModel {
    response: Result<Value, FlowError>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockModel {
    /// Answer every call with `value`
    pub fn with_response(value: Value) -> Self {
        Self {
            response: Ok(value),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with `error`
    pub fn failing(error: FlowError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, request: GenerateRequest) -> Result<Value, FlowError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.response.clone()
    }
}
