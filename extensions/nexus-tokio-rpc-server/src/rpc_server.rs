//! Note: This `RpcServer` does not include authentication or authorization
//! mechanisms. Any struct that utilizes an [`RpcServiceEndpoint`] can act as
//! a server for handling RPC requests; this implementation serves one over
//! plain HTTP using the Axum web framework.

use axum::{
    Router,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::post,
};
use bytes::Bytes;
use nexus::WireProtocol;
use nexus::constants::MAX_LENGTH_PREFIX;
use nexus_rpc_service::constants::RPC_ROUTE;
use nexus_rpc_service_endpoint::{RpcServiceEndpoint, RpcServiceEndpointInterface};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};

/// Largest request body accepted: one maximal string or container plus
/// room for the surrounding field headers and smaller fields.
pub const MAX_REQUEST_BODY_SIZE: usize = MAX_LENGTH_PREFIX + 1024 * 1024;

/// An RPC server that answers `POST /{service}/{rpc}` requests.
pub struct RpcServer {
    endpoint: Arc<RpcServiceEndpoint>,
}

impl Default for RpcServer {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcServer {
    pub fn new() -> Self {
        RpcServer {
            endpoint: Arc::new(RpcServiceEndpoint::new()),
        }
    }

    /// Creates a server that decodes and encodes with `protocol` instead of
    /// the binary protocol. Clients must be configured to match.
    pub fn with_protocol(protocol: Arc<dyn WireProtocol>) -> Self {
        RpcServer {
            endpoint: Arc::new(RpcServiceEndpoint::with_protocol(protocol)),
        }
    }

    /// Returns an `Arc` clone of the underlying RPC service endpoint.
    /// This allows for registering services and handlers without tying the
    /// registration logic to the server implementation.
    pub fn endpoint(&self) -> Arc<RpcServiceEndpoint> {
        self.endpoint.clone()
    }

    /// The Axum router serving the RPC route, for embedding into a larger app.
    pub fn router(&self) -> Router {
        Router::new()
            .route(RPC_ROUTE, post(Self::rpc_handler))
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
            .with_state(self.endpoint.clone())
    }

    /// Binds to an address and starts the RPC server.
    ///
    /// The address can be any type that implements `ToSocketAddrs`, such as
    /// a string "127.0.0.1:8080" or a `SocketAddr`.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> Result<SocketAddr, axum::BoxError> {
        let listener = TcpListener::bind(addr).await?;
        let server = Arc::new(self);
        server.serve_with_listener(listener).await
    }

    /// Starts the RPC server on a specific host and port.
    ///
    /// The host can be an IP address or a hostname.
    pub async fn serve_on(self, host: &str, port: u16) -> Result<SocketAddr, axum::BoxError> {
        let addr = format!("{host}:{port}");
        self.serve(addr).await
    }

    /// Starts the RPC server with a pre-bound `TcpListener`.
    ///
    /// This is useful for cases like binding to an ephemeral port (port 0) and
    /// then retrieving the actual address.
    pub async fn serve_with_listener(
        self: Arc<Self>,
        listener: TcpListener,
    ) -> Result<SocketAddr, axum::BoxError> {
        let address = listener.local_addr()?;
        let app = self.router();
        tracing::info!("Server running on {:?}", address);
        axum::serve(listener, app).await?;
        Ok(address)
    }

    async fn rpc_handler(
        State(endpoint): State<Arc<RpcServiceEndpoint>>,
        Path((service, rpc)): Path<(String, String)>,
        body: Bytes,
    ) -> (StatusCode, Vec<u8>) {
        tracing::trace!("POST /{}/{} ({} bytes)", service, rpc, body.len());

        let response = endpoint.handle(&service, &rpc, &body).await;
        let status = StatusCode::from_u16(response.status.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, response.body)
    }
}
