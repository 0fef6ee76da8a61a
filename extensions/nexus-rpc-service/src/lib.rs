mod application_error_kind;
pub use application_error_kind::ApplicationErrorKind;
pub mod argument_adapter;
pub use argument_adapter::CallArgs;
pub mod constants;
pub mod error;
pub use error::{InvalidArgumentsError, NotFoundError, ResultUnionError};
mod exception;
pub use exception::ApplicationException;
pub mod registry;
pub use registry::{
    InterfaceDefinition, MethodDeclaration, MethodDescriptor, SchemaRegistry, ServiceDefinition,
};
mod result_status;
pub use result_status::RpcResultStatus;
mod result_union;
pub use result_union::RpcResult;
