use thiserror::Error;

/// Failure to construct an `RpcClient`.
#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
