//! Node probe: typed `get_info` / `generateblocks` over an `RpcTransport`.

pub mod daemon;

pub use daemon::{DaemonProbe, NodeProbe, METHOD_GENERATE_BLOCKS, METHOD_GET_INFO};
