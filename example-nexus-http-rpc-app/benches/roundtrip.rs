use criterion::{Criterion, criterion_group, criterion_main};
use example_nexus_http_rpc_app::register_calculator;
use example_nexus_rpc_service_definition::calculator::{self, SERVICE_NAME};
use futures::{StreamExt, stream::FuturesUnordered};
use nexus_rpc_service::CallArgs;
use nexus_tokio_rpc_client::{ClientConfig, RpcClient, RpcServiceCallerInterface};
use nexus_tokio_rpc_server::RpcServer;
use nexus_tokio_rpc_server::utils::bind_tcp_listener_on_random_port;
use std::{hint::black_box, sync::Arc, time::Duration};
use tokio::runtime::Runtime;

fn bench_roundtrip(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    // Set up server + client once
    let (client, _server_task) = rt.block_on(async {
        let (listener, port) = bind_tcp_listener_on_random_port().await.unwrap();

        let server = Arc::new(RpcServer::new());
        register_calculator(&server.endpoint()).await.unwrap();

        let server_task = tokio::spawn(async move {
            let _ = server.serve_with_listener(listener).await;
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = RpcClient::new(
            [calculator::interface()],
            ClientConfig::new("127.0.0.1", port),
        )
        .unwrap();
        (client, server_task)
    });

    c.bench_function("rpc_add_roundtrip_futures_unordered_batch_10", |b| {
        b.to_async(&rt).iter(|| async {
            let mut tasks = FuturesUnordered::new();

            for _ in 0..10 {
                tasks.push(client.call(SERVICE_NAME, "add", CallArgs::positional([1, 2])));
            }

            let mut results = Vec::with_capacity(10);
            while let Some(res) = tasks.next().await {
                results.push(res.unwrap());
            }

            black_box(results);
        });
    });

    c.bench_function("rpc_add_roundtrip_singles", |b| {
        b.to_async(&rt).iter(|| async {
            let res = client
                .call(SERVICE_NAME, "add", CallArgs::positional([1, 2]))
                .await;
            black_box(res.unwrap());
        });
    });
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
