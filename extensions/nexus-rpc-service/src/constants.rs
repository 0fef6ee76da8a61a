use std::time::Duration;

/// The single route both sides agree on. Service and method names are used
/// verbatim (case-sensitive, no normalization).
pub const RPC_ROUTE: &str = "/{service}/{rpc}";

/// Timeout applied by clients that were not given one explicitly.
///
/// `None` means a call waits as long as the transport allows.
pub const DEFAULT_RPC_TIMEOUT: Option<Duration> = None;

/// Builds the request path for a method, e.g. `/Calculator/add`.
pub fn rpc_path(service: &str, rpc: &str) -> String {
    format!("/{service}/{rpc}")
}
