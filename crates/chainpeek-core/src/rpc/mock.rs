use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoreError, RpcError};

use super::RpcTransport;

/// An in-memory transport for testing. Replays canned responses keyed by
/// method name and records every call it receives.
pub struct MockTransport {
    responses: HashMap<String, serde_json::Value>,
    calls: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: HashMap::new(),
        }
    }

    /// Every `(method, params)` pair invoked so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

pub struct MockTransportBuilder {
    responses: HashMap<String, serde_json::Value>,
}

impl MockTransportBuilder {
    pub fn with_response(mut self, method: &str, response: serde_json::Value) -> Self {
        self.responses.insert(method.to_owned(), response);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: self.responses,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn invoke(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params));
        self.responses.get(method).cloned().ok_or_else(|| {
            RpcError::InvalidResponse(format!("no canned response for `{method}`")).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn records_calls_and_replays_responses() {
        let mock = MockTransport::builder()
            .with_response("getblockcount", json!({ "result": 1 }))
            .build();

        let response = mock
            .invoke("getblockcount", Vec::new())
            .await
            .expect("canned response");
        assert_eq!(response, json!({ "result": 1 }));
        assert!(mock.invoke("getblock", vec![json!("x")]).await.is_err());
        assert_eq!(
            mock.calls(),
            vec![
                ("getblockcount".to_owned(), Vec::new()),
                ("getblock".to_owned(), vec![json!("x")]),
            ]
        );
    }
}
