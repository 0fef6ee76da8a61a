use crate::transport::TransportError;
use nexus::ProtocolError;
use nexus_rpc_service::{
    ApplicationErrorKind, ApplicationException, InvalidArgumentsError, NotFoundError,
};
use thiserror::Error;

/// Represents errors that can occur during an RPC call from the perspective of the caller.
#[derive(Debug, Error)]
pub enum RpcCallerError {
    /// The service is not in the caller's registry. Nothing was sent.
    #[error("unknown service `{service}`")]
    UnknownService { service: String },

    /// The method is not in the caller's registry. Nothing was sent.
    #[error("service `{service}` has no method `{method}`")]
    UnknownMethod { service: String, method: String },

    #[error(transparent)]
    InvalidArguments(#[from] InvalidArgumentsError),

    /// The server answered 404 for the route.
    #[error("server does not know `{service}.{method}`")]
    RemoteUnknownMethod { service: String, method: String },

    /// The server answered 500: the handler failed in an undeclared way.
    #[error("internal error while handling `{service}.{method}`")]
    RemoteInternalError { service: String, method: String },

    /// Any other status of 400 or above.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The handler raised one of the method's declared exceptions.
    #[error("{0}")]
    Application(ApplicationException),
}

impl RpcCallerError {
    /// The Thrift application-exception type code this failure corresponds
    /// to, for callers that dispatch on those codes.
    ///
    /// Declared exceptions and failures that never reached the server have
    /// no code.
    pub fn application_error_kind(&self) -> Option<ApplicationErrorKind> {
        match self {
            RpcCallerError::RemoteUnknownMethod { .. } => Some(ApplicationErrorKind::UnknownMethod),
            RpcCallerError::RemoteInternalError { .. } => Some(ApplicationErrorKind::InternalError),
            RpcCallerError::Protocol(_) => Some(ApplicationErrorKind::ProtocolError),
            RpcCallerError::HttpStatus(_) => Some(ApplicationErrorKind::Unknown),
            RpcCallerError::UnknownService { .. }
            | RpcCallerError::UnknownMethod { .. }
            | RpcCallerError::InvalidArguments(_)
            | RpcCallerError::Transport(_)
            | RpcCallerError::Application(_) => None,
        }
    }
}

impl From<NotFoundError> for RpcCallerError {
    fn from(err: NotFoundError) -> Self {
        match err {
            NotFoundError::Service { service } => RpcCallerError::UnknownService { service },
            NotFoundError::Method { service, method } => {
                RpcCallerError::UnknownMethod { service, method }
            }
        }
    }
}
