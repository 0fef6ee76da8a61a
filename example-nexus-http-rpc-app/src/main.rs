use example_nexus_http_rpc_app::register_calculator;
use example_nexus_rpc_service_definition::calculator::{self, SERVICE_NAME};
use example_nexus_rpc_service_definition::types::operation;
use nexus::{StructValue, Value};
use nexus_rpc_service::CallArgs;
use nexus_tokio_rpc_client::{ClientConfig, RpcClient, RpcServiceCallerInterface};
use nexus_tokio_rpc_server::RpcServer;
use nexus_tokio_rpc_server::utils::{bind_tcp_listener_on_random_port, tcp_listener_to_host_port};
use std::sync::Arc;
use std::time::Duration;
use tokio::join;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Bind to a random available port
    let (listener, _) = bind_tcp_listener_on_random_port().await?;
    let (host, port) = tcp_listener_to_host_port(&listener)?;

    {
        let server = Arc::new(RpcServer::new());
        register_calculator(&server.endpoint()).await?;

        // Spawn the server using the pre-bound listener
        let _server_task = tokio::spawn(async move {
            if let Err(err) = server.serve_with_listener(listener).await {
                tracing::error!("Server stopped: {}", err);
            }
        });
    }

    {
        // Wait briefly for server to start
        tokio::time::sleep(Duration::from_millis(200)).await;

        let client = RpcClient::new(
            [calculator::interface()],
            ClientConfig::new(host.to_string(), port).with_timeout(Duration::from_secs(5)),
        )?;
        let calc = client.service(SERVICE_NAME)?;

        let work = Value::Struct(
            StructValue::new()
                .with(1, 15i32)
                .with(2, 10i32)
                .with(3, operation::SUBTRACT),
        );

        // `join!` will await all responses before proceeding
        let (res1, res2, res3, res4) = join!(
            calc.call("add", CallArgs::positional([1, 2])),
            calc.call("calculate", CallArgs::new().arg(1i32).arg(work)),
            calc.call("divide", CallArgs::positional([1.0, 0.0])),
            calc.call("describe", CallArgs::new().arg(1i32).kwarg("c", "three")),
        );

        println!("Result from add(): {:?}", res1);
        println!("Result from calculate(): {:?}", res2);
        println!("Result from divide(): {:?}", res3);
        println!("Result from describe(): {:?}", res4);

        calc.call("zip", CallArgs::new()).await?;

        match client.call(SERVICE_NAME, "find", CallArgs::new().arg("key")).await {
            Ok(value) => println!("Result from find(): {:?}", value),
            Err(err) => println!("find() failed: {} ({:?})", err, err.application_error_kind()),
        }

        client.close();
    }

    Ok(())
}
