use super::{HandlerError, RpcServiceEndpointInterface};
use nexus::{BinaryProtocol, Value, WireProtocol};
use nexus_rpc_service::{RpcResultStatus, ServiceDefinition};
use std::collections::HashMap;
use std::{future::Future, pin::Pin, sync::Arc};
use tokio::sync::RwLock;

/// An application handler bound to one method.
///
/// It receives the decoded arguments positionally, in ascending field-id
/// order, with `None` for arguments the caller left unset. `Ok(None)` is a
/// void (or null) return.
pub type RpcMethodHandler = Arc<
    dyn Fn(
            Vec<Option<Value>>,
        ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, HandlerError>> + Send>>
        + Send
        + Sync,
>;

/// A registered service and the handlers bound to its methods.
pub struct RpcServiceEntry {
    pub definition: Arc<ServiceDefinition>,
    pub handlers: HashMap<String, RpcMethodHandler>,
}

pub type RpcServiceMap = HashMap<String, RpcServiceEntry>;

/// What the transport should send back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpointResponse {
    pub status: RpcResultStatus,
    pub body: Vec<u8>,
}

impl RpcEndpointResponse {
    pub fn success(body: Vec<u8>) -> Self {
        Self {
            status: RpcResultStatus::Success,
            body,
        }
    }

    pub fn method_not_found() -> Self {
        Self {
            status: RpcResultStatus::MethodNotFound,
            body: Vec::new(),
        }
    }

    pub fn system_error() -> Self {
        Self {
            status: RpcResultStatus::SystemError,
            body: Vec::new(),
        }
    }
}

/// A concrete RPC service endpoint.
pub struct RpcServiceEndpoint {
    services: Arc<RwLock<RpcServiceMap>>,
    protocol: Arc<dyn WireProtocol>,
}

impl Default for RpcServiceEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcServiceEndpoint {
    /// Creates an endpoint speaking the standard binary protocol.
    pub fn new() -> Self {
        Self::with_protocol(Arc::new(BinaryProtocol))
    }

    pub fn with_protocol(protocol: Arc<dyn WireProtocol>) -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
            protocol,
        }
    }
}

#[async_trait::async_trait]
impl RpcServiceEndpointInterface for RpcServiceEndpoint {
    fn get_services(&self) -> Arc<RwLock<RpcServiceMap>> {
        self.services.clone()
    }

    fn get_protocol(&self) -> Arc<dyn WireProtocol> {
        self.protocol.clone()
    }
}
