use nexus_rpc_service::{ApplicationException, NotFoundError};
use thiserror::Error;

/// Registration failures.
#[derive(Debug, Error)]
pub enum RpcServiceEndpointError {
    #[error("service `{0}` is already registered")]
    ServiceAlreadyRegistered(String),

    #[error("a handler for `{service}.{method}` is already registered")]
    HandlerAlreadyRegistered { service: String, method: String },

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// The ways an application handler can fail.
///
/// `Declared` exceptions are part of the method's contract and are returned
/// to the caller inside the result struct. Anything else is `Internal`: it is
/// logged on the server and the caller only learns that the call failed.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Declared(ApplicationException),

    #[error("{0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    pub fn internal(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        HandlerError::Internal(err.into())
    }
}

impl From<ApplicationException> for HandlerError {
    fn from(exception: ApplicationException) -> Self {
        HandlerError::Declared(exception)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::Internal(message.into())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::Internal(message.into())
    }
}
