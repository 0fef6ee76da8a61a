use crate::{ClientConfig, RpcClientError};
use nexus::WireProtocol;
use nexus_rpc_service::{InterfaceDefinition, SchemaRegistry};
use nexus_rpc_service_caller::{
    HttpResponse, HttpTransport, RpcServiceCallerInterface, TransportError,
};
use std::sync::Arc;
use std::time::Duration;

/// `HttpTransport` over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.http.post(url).body(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(to_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(to_transport_error)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn to_transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

/// An HTTP RPC client for a fixed set of services on one server.
///
/// The client owns a single connection pool for its whole lifetime; every
/// call made through it, concurrent or not, reuses that pool.
pub struct RpcClient {
    registry: SchemaRegistry,
    transport: Arc<ReqwestTransport>,
    protocol: Arc<dyn WireProtocol>,
    base_url: String,
    timeout: Option<Duration>,
}

impl RpcClient {
    pub fn new(
        interfaces: impl IntoIterator<Item = InterfaceDefinition>,
        config: ClientConfig,
    ) -> Result<RpcClient, RpcClientError> {
        let http = reqwest::Client::builder().build()?;
        let registry = SchemaRegistry::new(interfaces);
        let base_url = config.base_url();

        tracing::debug!(
            "RPC client for {} knows {} services",
            base_url,
            registry.service_names().count()
        );

        Ok(RpcClient {
            registry,
            transport: Arc::new(ReqwestTransport::new(http)),
            protocol: config.protocol,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Releases the connection pool.
    ///
    /// Dropping the client has the same effect; this only makes the point at
    /// which connections are closed explicit.
    pub fn close(self) {
        tracing::debug!("Closing RPC client for {}", self.base_url);
    }
}

#[async_trait::async_trait]
impl RpcServiceCallerInterface for RpcClient {
    fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    fn transport(&self) -> Arc<dyn HttpTransport> {
        self.transport.clone()
    }

    fn protocol(&self) -> Arc<dyn WireProtocol> {
        self.protocol.clone()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
