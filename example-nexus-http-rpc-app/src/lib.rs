//! A `Calculator` implementation shared by the demo binary and benchmarks.

use example_nexus_rpc_service_definition::calculator::{self, SERVICE_NAME};
use example_nexus_rpc_service_definition::types::{division_by_zero, invalid_operation, operation};
use nexus::Value;
use nexus_rpc_service_endpoint::{
    HandlerError, RpcServiceEndpoint, RpcServiceEndpointError, RpcServiceEndpointInterface,
};

fn i32_arg(args: &[Option<Value>], idx: usize) -> i32 {
    args.get(idx)
        .and_then(Option::as_ref)
        .and_then(Value::as_i32)
        .unwrap_or_default()
}

fn f64_arg(args: &[Option<Value>], idx: usize) -> f64 {
    args.get(idx)
        .and_then(Option::as_ref)
        .and_then(Value::as_f64)
        .unwrap_or_default()
}

fn calculate(num1: i32, num2: i32, op: i32) -> Result<i32, HandlerError> {
    let value = match op {
        operation::ADD => num1.checked_add(num2),
        operation::SUBTRACT => num1.checked_sub(num2),
        operation::MULTIPLY => num1.checked_mul(num2),
        operation::DIVIDE if num2 == 0 => {
            return Err(invalid_operation(op, "Cannot divide by 0").into());
        }
        operation::DIVIDE => num1.checked_div(num2),
        _ => return Err(invalid_operation(op, "Invalid operation").into()),
    };
    value.ok_or_else(|| HandlerError::internal(format!("overflow in operation {op}")))
}

/// Registers the `Calculator` service and binds every method but `find`.
pub async fn register_calculator(
    endpoint: &RpcServiceEndpoint,
) -> Result<(), RpcServiceEndpointError> {
    endpoint.register_service(calculator::interface()).await?;

    endpoint
        .register_sync(SERVICE_NAME, "ping", |_| {
            tracing::info!("ping()");
            Ok(None)
        })
        .await?;

    endpoint
        .register_sync(SERVICE_NAME, "add", |args| {
            let (num1, num2) = (i32_arg(&args, 0), i32_arg(&args, 1));
            Ok(Some(Value::I32(num1.wrapping_add(num2))))
        })
        .await?;

    endpoint
        .register_sync(SERVICE_NAME, "calculate", |args| {
            let Some(work) = args.get(1).and_then(Option::as_ref).and_then(Value::as_struct)
            else {
                return Err(invalid_operation(0, "Missing work").into());
            };
            let field = |id| work.get(id).and_then(Value::as_i32).unwrap_or_default();
            calculate(field(1), field(2), field(3)).map(|value| Some(Value::I32(value)))
        })
        .await?;

    endpoint
        .register_sync(SERVICE_NAME, "divide", |args| {
            let (dividend, divisor) = (f64_arg(&args, 0), f64_arg(&args, 1));
            if divisor == 0.0 {
                return Err(division_by_zero("integer division or modulo by zero").into());
            }
            Ok(Some(Value::Double(dividend / divisor)))
        })
        .await?;

    endpoint
        .register(SERVICE_NAME, "echo", |args| async move {
            Ok(args.into_iter().next().flatten())
        })
        .await?;

    endpoint
        .register_sync(SERVICE_NAME, "describe", |args| {
            Ok(Some(Value::String(format!("{args:?}"))))
        })
        .await?;

    endpoint
        .register_sync(SERVICE_NAME, "zip", |_| {
            tracing::info!("zip()");
            Ok(None)
        })
        .await?;

    Ok(())
}
