use std::time::Duration;
use thiserror::Error;

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Failure to complete an HTTP exchange at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("could not connect: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Other(String),
}

/// The one operation a caller needs from an HTTP client.
///
/// Implementations must be shareable between concurrent calls; each `post`
/// is independent and its response is delivered only to its own future.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError>;
}
