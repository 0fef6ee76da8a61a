use example_nexus_rpc_service_definition::calculator::{self, SERVICE_NAME};
use example_nexus_rpc_service_definition::types::{division_by_zero, invalid_operation, operation};
use futures::future::join_all;
use nexus::{Field, FieldType, StructSchema, StructValue, Value};
use nexus_rpc_service::{ApplicationErrorKind, CallArgs, InterfaceDefinition, MethodDeclaration};
use nexus_rpc_service_caller::TransportError;
use nexus_rpc_service_endpoint::HandlerError;
use nexus_tokio_rpc_client::{ClientConfig, RpcCallerError, RpcClient, RpcServiceCallerInterface};
use nexus_tokio_rpc_server::utils::{bind_tcp_listener_on_random_port, tcp_listener_to_host_port};
use nexus_tokio_rpc_server::{RpcServer, RpcServiceEndpointInterface};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Spawns a calculator server on a random port and returns its port and the
/// number of oneway `zip` calls it has handled.
async fn spawn_calculator_server() -> (u16, Arc<AtomicUsize>) {
    let (listener, port) = bind_tcp_listener_on_random_port().await.unwrap();
    let server = Arc::new(RpcServer::new());
    let zips = Arc::new(AtomicUsize::new(0));

    let endpoint = server.endpoint();
    endpoint
        .register_service(calculator::interface())
        .await
        .unwrap();

    endpoint
        .register_sync(SERVICE_NAME, "ping", |_| Ok(None))
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
        .register(SERVICE_NAME, "calculate", |args| async move {
            let work = args[1]
                .as_ref()
                .and_then(Value::as_struct)
                .cloned()
                .unwrap_or_default();
            let num1 = work.get(1).and_then(Value::as_i32).unwrap_or(0);
            let num2 = work.get(2).and_then(Value::as_i32).unwrap_or(0);
            let op = work.get(3).and_then(Value::as_i32).unwrap_or(0);

            let value = match op {
                operation::ADD => num1 + num2,
                operation::SUBTRACT => num1 - num2,
                operation::MULTIPLY => num1 * num2,
                operation::DIVIDE if num2 == 0 => {
                    return Err(invalid_operation(op, "Cannot divide by 0").into());
                }
                operation::DIVIDE => num1 / num2,
                // Not a declared exception of `calculate`.
                _ => return Err(HandlerError::internal(format!("bad op {op}"))),
            };
            Ok(Some(Value::I32(value)))
        })
        .await
        .unwrap();

    endpoint
        .register_sync(SERVICE_NAME, "divide", |args| {
            let dividend = args[0].as_ref().and_then(Value::as_f64).unwrap_or(0.0);
            let divisor = args[1].as_ref().and_then(Value::as_f64).unwrap_or(0.0);
            if divisor == 0.0 {
                return Err(division_by_zero("integer division or modulo by zero").into());
            }
            Ok(Some(Value::Double(dividend / divisor)))
        })
        .await
        .unwrap();

    endpoint
        .register(SERVICE_NAME, "echo", |args| async move {
            let message = args[0]
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let delay = (message.len() % 5) as u64 * 5;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Some(Value::String(message)))
        })
        .await
        .unwrap();

    endpoint
        .register(SERVICE_NAME, "find", |_| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        })
        .await
        .unwrap();

    endpoint
        .register_sync(SERVICE_NAME, "describe", |args| {
            Ok(Some(Value::String(format!("{args:?}"))))
        })
        .await
        .unwrap();

    endpoint
        .register_sync(SERVICE_NAME, "zip", {
            let zips = zips.clone();
            move |_| {
                zips.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        })
        .await
        .unwrap();

    let _server_task = tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    (port, zips)
}

fn calculator_client(port: u16) -> RpcClient {
    RpcClient::new(
        [calculator::interface()],
        ClientConfig::new("127.0.0.1", port),
    )
    .unwrap()
}

fn work(num1: i32, num2: i32, op: i32) -> Value {
    Value::Struct(
        StructValue::new()
            .with(1, num1)
            .with(2, num2)
            .with(3, op),
    )
}

#[tokio::test]
async fn test_success_client_server_roundtrip() {
    let (port, _) = spawn_calculator_server().await;
    let client = calculator_client(port);

    let sum = client
        .call(SERVICE_NAME, "add", CallArgs::positional([1, 2]))
        .await
        .unwrap();
    assert_eq!(sum, Some(Value::I32(3)));

    let product = client
        .call(
            SERVICE_NAME,
            "calculate",
            CallArgs::new().arg(1i32).arg(work(6, 7, operation::MULTIPLY)),
        )
        .await
        .unwrap();
    assert_eq!(product, Some(Value::I32(42)));

    let pong = client.call(SERVICE_NAME, "ping", CallArgs::new()).await.unwrap();
    assert_eq!(pong, None);

    client.close();
}

#[tokio::test]
async fn test_positional_and_keyword_arguments_merge() {
    let (port, _) = spawn_calculator_server().await;
    let client = calculator_client(port);

    let described = client
        .call(
            SERVICE_NAME,
            "describe",
            CallArgs::positional([1i32]).kwarg("b", 2i64).kwarg("c", "3"),
        )
        .await
        .unwrap();

    let expected = format!(
        "{:?}",
        vec![
            Some(Value::I32(1)),
            Some(Value::I64(2)),
            Some(Value::from("3"))
        ]
    );
    assert_eq!(described, Some(Value::String(expected)));
}

#[tokio::test]
async fn test_declared_exception_roundtrip() {
    let (port, _) = spawn_calculator_server().await;
    let client = calculator_client(port);
    let calculator = client.service(SERVICE_NAME).unwrap();

    let err = calculator
        .call("divide", CallArgs::positional([1.0, 0.0]))
        .await
        .unwrap_err();
    match err {
        RpcCallerError::Application(exception) => {
            assert_eq!(exception.type_name(), "DivisionByZero");
            assert_eq!(
                exception.get("message").and_then(Value::as_str),
                Some("integer division or modulo by zero")
            );
        }
        other => panic!("expected DivisionByZero, got {other:?}"),
    }

    let err = calculator
        .call(
            "calculate",
            CallArgs::new().arg(1i32).arg(work(1, 0, operation::DIVIDE)),
        )
        .await
        .unwrap_err();
    match err {
        RpcCallerError::Application(exception) => {
            assert_eq!(exception, invalid_operation(operation::DIVIDE, "Cannot divide by 0"));
            assert_eq!(exception.to_string(), "InvalidOperation");
        }
        other => panic!("expected InvalidOperation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undeclared_failure_is_internal_error() {
    let (port, _) = spawn_calculator_server().await;
    let client = calculator_client(port);

    let err = client
        .call(
            SERVICE_NAME,
            "calculate",
            CallArgs::new().arg(1i32).arg(work(1, 2, 99)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RpcCallerError::RemoteInternalError { .. }));
    assert_eq!(
        err.application_error_kind(),
        Some(ApplicationErrorKind::InternalError)
    );
}

#[tokio::test]
async fn test_method_unknown_to_server_is_unknown_method() {
    let (port, _) = spawn_calculator_server().await;

    // The client's copy of the interface has a method the server lacks.
    let subtract = MethodDeclaration::new("subtract")
        .args(Arc::new(
            StructSchema::new(
                "subtract_args",
                [
                    Field::new(1, "num1", FieldType::I32),
                    Field::new(2, "num2", FieldType::I32),
                ],
            )
            .unwrap(),
        ))
        .result(Arc::new(
            StructSchema::new("subtract_result", [Field::new(0, "success", FieldType::I32)])
                .unwrap(),
        ));
    let interface: InterfaceDefinition = calculator::interface().method(subtract);
    let client = RpcClient::new([interface], ClientConfig::new("127.0.0.1", port)).unwrap();

    let err = client
        .call(SERVICE_NAME, "subtract", CallArgs::positional([3, 1]))
        .await
        .unwrap_err();

    assert!(matches!(err, RpcCallerError::RemoteUnknownMethod { .. }));
    assert_eq!(
        err.application_error_kind(),
        Some(ApplicationErrorKind::UnknownMethod)
    );
}

#[tokio::test]
async fn test_client_errors_on_connection_failure() {
    // Take a free port, then release it so nothing is listening there.
    let (listener, _) = bind_tcp_listener_on_random_port().await.unwrap();
    let (host, port) = tcp_listener_to_host_port(&listener).unwrap();
    drop(listener);

    let client = RpcClient::new(
        [calculator::interface()],
        ClientConfig::new(host.to_string(), port),
    )
    .unwrap();

    let err = client
        .call(SERVICE_NAME, "add", CallArgs::positional([1, 2]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RpcCallerError::Transport(TransportError::Connect(_))
    ));
    assert_eq!(err.application_error_kind(), None);
}

#[tokio::test]
async fn test_call_times_out() {
    let (port, _) = spawn_calculator_server().await;
    let client = RpcClient::new(
        [calculator::interface()],
        ClientConfig::new("127.0.0.1", port).with_timeout(Duration::from_millis(200)),
    )
    .unwrap();

    let err = client
        .call(SERVICE_NAME, "find", CallArgs::new().arg("slow"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RpcCallerError::Transport(TransportError::Timeout)
    ));
}

#[tokio::test]
async fn test_concurrent_calls_are_not_cross_delivered() {
    let (port, _) = spawn_calculator_server().await;
    let client = calculator_client(port);

    let messages: Vec<String> = (0..32)
        .map(|i| format!("{i}:{}", "-".repeat(i % 7)))
        .collect();
    let results = join_all(
        messages
            .iter()
            .map(|message| client.call(SERVICE_NAME, "echo", CallArgs::new().arg(message.as_str()))),
    )
    .await;

    for (message, result) in messages.iter().zip(results) {
        assert_eq!(result.unwrap(), Some(Value::String(message.clone())));
    }
}

#[tokio::test]
async fn test_large_arguments_roundtrip() {
    let (port, _) = spawn_calculator_server().await;
    let client = calculator_client(port);

    // Larger than axum's default 2 MiB body limit.
    let message = "x".repeat(3 * 1024 * 1024);
    let result = client
        .call(SERVICE_NAME, "echo", CallArgs::new().arg(message.as_str()))
        .await
        .unwrap();

    assert_eq!(result, Some(Value::String(message)));
}

#[tokio::test]
async fn test_oneway_call_runs_on_server() {
    let (port, zips) = spawn_calculator_server().await;
    let client = calculator_client(port);

    let result = client.call(SERVICE_NAME, "zip", CallArgs::new()).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(zips.load(Ordering::SeqCst), 1);
}
