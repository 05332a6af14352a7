use std::time::Duration;
use async_trait::async_trait;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::{ArrayParams, ObjectParams};
use jsonrpsee::core::ClientError;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde_json::Value;
use tracing::debug;
use crate::utils::{HarnessError, Result, METRICS};

/// Leaf of the stack: one request for a named method, one decoded response.
///
/// Implementations make a single attempt per call. Connection problems map to
/// `HarnessError::Transport`, an explicit error in the response maps to
/// `HarnessError::Protocol`.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// `params` is `Null` for no parameters, an object for named parameters or
    /// an array for positional ones.
    async fn call(&self, method: &str, params: Value) -> Result<Value>;
}

/// JSON-RPC 2.0 over HTTP, backed by the jsonrpsee client.
pub struct JsonRpcTransport {
    endpoint: String,
    client: HttpClient,
}

impl JsonRpcTransport {
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self> {
        let client = HttpClientBuilder::default()
            .request_timeout(request_timeout)
            .build(endpoint)
            .map_err(|e| HarnessError::Config(format!("invalid rpc endpoint {endpoint}: {e}")))?;
        Ok(Self { endpoint: endpoint.to_string(), client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        let res = match params {
            Value::Null => self.client.request::<Value, _>(method, ArrayParams::new()).await,
            Value::Array(items) => {
                let mut p = ArrayParams::new();
                for item in items {
                    p.insert(item).map_err(|e| encode_error(method, e))?;
                }
                self.client.request::<Value, _>(method, p).await
            }
            Value::Object(fields) => {
                let mut p = ObjectParams::new();
                for (name, value) in fields {
                    p.insert(&name, value).map_err(|e| encode_error(method, e))?;
                }
                self.client.request::<Value, _>(method, p).await
            }
            other => {
                return Err(HarnessError::InvalidRequest(format!(
                    "params for `{method}` must be null, an array or an object, got {other}"
                )))
            }
        };
        res.map_err(|e| map_client_error(method, e))
    }
}

#[async_trait]
impl RpcTransport for JsonRpcTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        debug!(endpoint = %self.endpoint, method, %params, "rpc call");
        METRICS.record_call(method);

        let res = self.send(method, params).await;
        if res.is_err() {
            METRICS.record_failure(method);
        }
        res
    }
}

fn encode_error(method: &str, e: serde_json::Error) -> HarnessError {
    HarnessError::InvalidRequest(format!("cannot encode params for `{method}`: {e}"))
}

/// Split jsonrpsee failures into the harness taxonomy.
pub(crate) fn map_client_error(method: &str, e: ClientError) -> HarnessError {
    match e {
        ClientError::Call(obj) => HarnessError::Protocol {
            method: method.to_string(),
            code: Some(obj.code()),
            message: obj.message().to_string(),
        },
        ClientError::ParseError(e) => {
            HarnessError::protocol(method, format!("malformed response: {e}"))
        }
        ClientError::RequestTimeout => {
            HarnessError::Transport(format!("`{method}` timed out"))
        }
        other => HarnessError::Transport(format!("`{method}` failed: {other}")),
    }
}
