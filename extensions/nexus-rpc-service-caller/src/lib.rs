mod caller_interface;
pub use caller_interface::*;
pub mod error;
pub use error::RpcCallerError;
mod service_caller;
pub use service_caller::ServiceCaller;
pub mod transport;
pub use transport::{HttpResponse, HttpTransport, TransportError};
