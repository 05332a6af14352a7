//! RPC module
//!
//! - `RpcTransport`: single-attempt JSON-RPC 2.0 calls over HTTP
//! - typed views of the daemon responses the harness consumes
//!
//! The transport owns the endpoint and nothing else; domain mapping lives in
//! `crate::probe`.

pub mod transport;
pub mod types;

pub use transport::{JsonRpcTransport, RpcTransport};
pub use types::{BlockGenerationRequest, GenerateBlocksResult, NodeInfo, STATUS_OK};
