use crate::{RpcCallerError, RpcServiceCallerInterface};
use nexus::Value;
use nexus_rpc_service::{CallArgs, ServiceDefinition};
use std::sync::Arc;

/// Calls into one service of a caller.
pub struct ServiceCaller<'a, C> {
    caller: &'a C,
    definition: Arc<ServiceDefinition>,
}

impl<'a, C: RpcServiceCallerInterface> ServiceCaller<'a, C> {
    pub(crate) fn new(caller: &'a C, definition: Arc<ServiceDefinition>) -> Self {
        Self { caller, definition }
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.definition.has_method(method)
    }

    pub async fn call(&self, method: &str, args: CallArgs) -> Result<Option<Value>, RpcCallerError> {
        self.caller.call(self.definition.name(), method, args).await
    }
}
