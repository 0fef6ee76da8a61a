use crate::{HttpTransport, RpcCallerError, ServiceCaller};
use nexus::{Value, WireProtocol};
use nexus_rpc_service::constants::rpc_path;
use nexus_rpc_service::{CallArgs, RpcResult, SchemaRegistry};
use std::sync::Arc;
use std::time::Duration;

/// Defines a generic capability for making RPC calls.
///
/// Any struct that can provide a schema registry and an HTTP transport can
/// implement this trait to gain the ability to make outbound calls.
#[async_trait::async_trait]
pub trait RpcServiceCallerInterface: Send + Sync {
    // --- METHODS TO BE IMPLEMENTED BY THE STRUCT (e.g., RpcClient) ---

    /// The services this caller knows how to encode calls for.
    fn registry(&self) -> &SchemaRegistry;

    fn transport(&self) -> Arc<dyn HttpTransport>;

    fn protocol(&self) -> Arc<dyn WireProtocol>;

    /// Scheme, host and port, without a trailing slash, e.g. `http://127.0.0.1:8080`.
    fn base_url(&self) -> &str;

    fn timeout(&self) -> Option<Duration>;

    // --- METHODS PROVIDED AUTOMATICALLY BY THE TRAIT ---

    /// Performs one call and maps the reply onto the method's outcome.
    ///
    /// `Ok(None)` is a void (or null) return, and also what every successful
    /// oneway call yields since its reply body is never read.
    async fn call(
        &self,
        service: &str,
        method: &str,
        args: CallArgs,
    ) -> Result<Option<Value>, RpcCallerError> {
        let descriptor = self.registry().resolve(service, method)?;
        let protocol = self.protocol();

        let args = args.into_struct_value(descriptor.args_schema())?;
        let body = protocol.encode_struct(descriptor.args_schema(), &args)?;
        let url = format!("{}{}", self.base_url(), rpc_path(service, method));

        tracing::debug!("Calling `{}.{}` ({} bytes)", service, method, body.len());
        let response = self.transport().post(&url, body, self.timeout()).await?;

        match response.status {
            404 => {
                return Err(RpcCallerError::RemoteUnknownMethod {
                    service: service.to_string(),
                    method: method.to_string(),
                });
            }
            500 => {
                return Err(RpcCallerError::RemoteInternalError {
                    service: service.to_string(),
                    method: method.to_string(),
                });
            }
            status if status >= 400 => return Err(RpcCallerError::HttpStatus(status)),
            _ => {}
        }

        if descriptor.is_oneway() {
            return Ok(None);
        }

        let result = protocol.decode_struct(descriptor.result_schema(), &response.body)?;
        match RpcResult::from_struct(&descriptor, result) {
            RpcResult::Success(value) => Ok(Some(value)),
            RpcResult::Void => Ok(None),
            RpcResult::Declared(exception) => Err(RpcCallerError::Application(exception)),
        }
    }

    /// A handle bound to one service, so calls only name the method.
    fn service(&self, name: &str) -> Result<ServiceCaller<'_, Self>, RpcCallerError>
    where
        Self: Sized,
    {
        let definition = self
            .registry()
            .service(name)
            .cloned()
            .ok_or_else(|| RpcCallerError::UnknownService {
                service: name.to_string(),
            })?;
        Ok(ServiceCaller::new(self, definition))
    }
}
