mod endpoint;
pub use endpoint::*;

mod endpoint_interface;
pub use endpoint_interface::*;

pub mod error;
pub use error::{HandlerError, RpcServiceEndpointError};
