mod config;
pub use config::ClientConfig;
mod error;
pub use error::RpcClientError;
mod rpc_client;
pub use rpc_client::{ReqwestTransport, RpcClient};
pub use nexus_rpc_service_caller::{RpcCallerError, RpcServiceCallerInterface};
