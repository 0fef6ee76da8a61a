use super::{
    RpcEndpointResponse, RpcMethodHandler, RpcServiceEntry, RpcServiceMap,
    error::{HandlerError, RpcServiceEndpointError},
};
use futures::FutureExt;
use nexus::{Value, WireProtocol};
use nexus_rpc_service::argument_adapter::to_positional;
use nexus_rpc_service::{
    InterfaceDefinition, MethodDescriptor, NotFoundError, RpcResult, ServiceDefinition,
};
use std::collections::{HashMap, hash_map::Entry};
use std::panic::AssertUnwindSafe;
use std::{future::Future, pin::Pin, sync::Arc};
use tokio::sync::RwLock;

#[async_trait::async_trait]
pub trait RpcServiceEndpointInterface: Send + Sync {
    fn get_services(&self) -> Arc<RwLock<RpcServiceMap>>;

    fn get_protocol(&self) -> Arc<dyn WireProtocol>;

    /// Makes a service routable. Handlers are bound per method afterwards.
    async fn register_service(
        &self,
        interface: InterfaceDefinition,
    ) -> Result<Arc<ServiceDefinition>, RpcServiceEndpointError> {
        let definition = Arc::new(ServiceDefinition::register(interface));
        let services = self.get_services();
        let mut services = services.write().await;

        match services.entry(definition.name().to_string()) {
            Entry::Occupied(entry) => Err(RpcServiceEndpointError::ServiceAlreadyRegistered(
                entry.key().clone(),
            )),
            Entry::Vacant(entry) => {
                tracing::debug!(
                    "Registered service `{}` with {} methods",
                    definition.name(),
                    definition.methods().count()
                );
                entry.insert(RpcServiceEntry {
                    definition: definition.clone(),
                    handlers: HashMap::new(),
                });
                Ok(definition)
            }
        }
    }

    /// Binds an asynchronous handler to `service.method`.
    async fn register<F, Fut>(
        &self,
        service: &str,
        method: &str,
        handler: F,
    ) -> Result<(), RpcServiceEndpointError>
    where
        F: Fn(Vec<Option<Value>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Value>, HandlerError>> + Send + 'static,
    {
        let services = self.get_services();
        let mut services = services.write().await;

        let entry = services
            .get_mut(service)
            .ok_or_else(|| NotFoundError::Service {
                service: service.to_string(),
            })?;
        entry.definition.resolve(method)?;

        match entry.handlers.entry(method.to_string()) {
            Entry::Occupied(_) => Err(RpcServiceEndpointError::HandlerAlreadyRegistered {
                service: service.to_string(),
                method: method.to_string(),
            }),
            Entry::Vacant(slot) => {
                let wrapped: RpcMethodHandler = Arc::new(move |args: Vec<Option<Value>>| {
                    Box::pin(handler(args))
                        as Pin<Box<dyn Future<Output = Result<Option<Value>, HandlerError>> + Send>>
                });
                slot.insert(wrapped);
                Ok(())
            }
        }
    }

    /// Binds a blocking handler to `service.method`.
    ///
    /// The handler runs inline on the task serving the request, so it should
    /// be short.
    async fn register_sync<F>(
        &self,
        service: &str,
        method: &str,
        handler: F,
    ) -> Result<(), RpcServiceEndpointError>
    where
        F: Fn(Vec<Option<Value>>) -> Result<Option<Value>, HandlerError> + Send + Sync + 'static,
    {
        self.register(service, method, move |args| {
            std::future::ready(handler(args))
        })
        .await
    }

    /// Routes one request and produces the response to send back.
    ///
    /// Only unknown routes, malformed bodies and undeclared handler failures
    /// produce a non-success status. Declared exceptions are encoded into the
    /// result struct and returned as a success.
    ///
    /// Oneway methods get an empty success body, but only after the handler
    /// has completed, so a caller's timeout covers the handler's full run
    /// time and an undeclared failure still yields `SystemError`.
    async fn handle(&self, service: &str, rpc: &str, body: &[u8]) -> RpcEndpointResponse {
        let Some((method, handler)) = lookup(&self.get_services(), service, rpc).await else {
            tracing::debug!("No handler for `{}.{}`", service, rpc);
            return RpcEndpointResponse::method_not_found();
        };
        let protocol = self.get_protocol();

        let args = match protocol.decode_struct(method.args_schema(), body) {
            Ok(args) => args,
            Err(err) => {
                tracing::warn!("Malformed arguments for `{}.{}`: {}", service, rpc, err);
                return RpcEndpointResponse::system_error();
            }
        };
        let call_args = to_positional(method.args_schema(), args);

        // The handler is invoked inside the guarded future so a panic in its
        // synchronous part is caught as well.
        let guarded = AssertUnwindSafe(async move { handler(call_args).await });
        let outcome = match guarded.catch_unwind().await {
            Ok(Ok(Some(returned))) => RpcResult::Success(returned),
            Ok(Ok(None)) => RpcResult::Void,
            Ok(Err(HandlerError::Declared(exception))) => RpcResult::Declared(exception),
            Ok(Err(HandlerError::Internal(err))) => {
                tracing::error!("Handler for `{}.{}` failed: {}", service, rpc, err);
                return RpcEndpointResponse::system_error();
            }
            Err(_) => {
                tracing::error!("Handler for `{}.{}` panicked", service, rpc);
                return RpcEndpointResponse::system_error();
            }
        };

        let result = match outcome.into_struct(&method) {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("Handler for `{}.{}` failed: {}", service, rpc, err);
                return RpcEndpointResponse::system_error();
            }
        };

        if method.is_oneway() {
            return RpcEndpointResponse::success(Vec::new());
        }

        match protocol.encode_struct(method.result_schema(), &result) {
            Ok(body) => RpcEndpointResponse::success(body),
            Err(err) => {
                tracing::error!("Could not encode result of `{}.{}`: {}", service, rpc, err);
                RpcEndpointResponse::system_error()
            }
        }
    }
}

/// Finds the descriptor and bound handler for a route.
///
/// A method declared by the service but without a bound handler is treated
/// as unknown.
async fn lookup(
    services: &RwLock<RpcServiceMap>,
    service: &str,
    rpc: &str,
) -> Option<(Arc<MethodDescriptor>, RpcMethodHandler)> {
    let services = services.read().await;
    let entry = services.get(service)?;
    let method = entry.definition.resolve(rpc).ok()?;
    let handler = entry.handlers.get(rpc)?.clone();
    Some((method, handler))
}
