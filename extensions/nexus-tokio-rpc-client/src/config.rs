use nexus::{BinaryProtocol, WireProtocol};
use nexus_rpc_service::constants::DEFAULT_RPC_TIMEOUT;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Where an `RpcClient` sends its calls and how it encodes them.
#[derive(Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Per-call deadline covering connect, send and reading the reply.
    pub timeout: Option<Duration>,
    pub protocol: Arc<dyn WireProtocol>,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_RPC_TIMEOUT,
            protocol: Arc::new(BinaryProtocol),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_protocol(mut self, protocol: Arc<dyn WireProtocol>) -> Self {
        self.protocol = protocol;
        self
    }

    /// `http://host:port`, with IPv6 hosts bracketed.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
