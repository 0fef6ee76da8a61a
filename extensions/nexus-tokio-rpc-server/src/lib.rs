mod rpc_server;
pub use rpc_server::*;
pub mod utils;
pub use nexus_rpc_service_endpoint::RpcServiceEndpointInterface;
