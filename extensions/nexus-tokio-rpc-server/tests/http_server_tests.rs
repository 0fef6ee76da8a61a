use example_nexus_rpc_service_definition::calculator::{self, SERVICE_NAME};
use nexus::{BinaryProtocol, StructValue, Value, WireProtocol};
use nexus_rpc_service::SchemaRegistry;
use nexus_rpc_service_endpoint::HandlerError;
use nexus_tokio_rpc_server::utils::{bind_tcp_listener_on_random_port, tcp_listener_to_host_port};
use nexus_tokio_rpc_server::{RpcServer, RpcServiceEndpointInterface};
use std::sync::Arc;
use std::time::Duration;

/// Starts a calculator server on a random port and returns its base URL.
async fn spawn_calculator_server() -> String {
    let (listener, port) = bind_tcp_listener_on_random_port().await.unwrap();
    let server = Arc::new(RpcServer::new());

    let endpoint = server.endpoint();
    endpoint
        .register_service(calculator::interface())
        .await
        .unwrap();
    endpoint
        .register_sync(SERVICE_NAME, "add", |args| {
            let num1 = args[0].as_ref().and_then(Value::as_i32).unwrap_or(0);
            let num2 = args[1].as_ref().and_then(Value::as_i32).unwrap_or(0);
            Ok(Some(Value::I32(num1 + num2)))
        })
        .await
        .unwrap();
    endpoint
        .register_sync(SERVICE_NAME, "echo", |_| {
            Err(HandlerError::internal("stack trace with secrets"))
        })
        .await
        .unwrap();

    let _server_task = tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn test_post_returns_encoded_result() {
    let base_url = spawn_calculator_server().await;
    let add = SchemaRegistry::new([calculator::interface()])
        .resolve(SERVICE_NAME, "add")
        .unwrap();

    let args = StructValue::new().with(1, 20i32).with(2, 22i32);
    let body = BinaryProtocol
        .encode_struct(add.args_schema(), &args)
        .unwrap();

    let response = reqwest::Client::new()
        .post(format!("{base_url}/Calculator/add"))
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let bytes = response.bytes().await.unwrap();
    let result = BinaryProtocol
        .decode_struct(add.result_schema(), &bytes)
        .unwrap();
    assert_eq!(result.get(0), Some(&Value::I32(42)));
}

#[tokio::test]
async fn test_unknown_routes_are_404_with_empty_body() {
    let base_url = spawn_calculator_server().await;
    let client = reqwest::Client::new();

    for path in ["/Nope/add", "/Calculator/nope", "/Calculator/ping", "/Calculator"] {
        let response = client
            .post(format!("{base_url}{path}"))
            .body(vec![0u8])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404, "path {path}");
        assert!(response.bytes().await.unwrap().is_empty(), "path {path}");
    }
}

#[tokio::test]
async fn test_route_names_are_case_sensitive() {
    let base_url = spawn_calculator_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/calculator/add"))
        .body(vec![0u8])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_undeclared_failure_is_500_with_empty_body() {
    let base_url = spawn_calculator_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/Calculator/echo"))
        .body(vec![0u8])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_only_post_is_routed() {
    let base_url = spawn_calculator_server().await;

    let response = reqwest::Client::new()
        .get(format!("{base_url}/Calculator/add"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 405);
}

#[tokio::test]
async fn test_listener_utils_report_bound_address() {
    let (listener, port) = bind_tcp_listener_on_random_port().await.unwrap();
    let (host, reported_port) = tcp_listener_to_host_port(&listener).unwrap();

    assert_ne!(port, 0);
    assert_eq!(reported_port, port);
    assert!(host.is_loopback());
}
