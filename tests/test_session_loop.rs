//! Session loop reconnect liveness

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{StubOracle, fast_config};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use sonde::agent::Agent;

#[tokio::test]
async fn loop_reconnects_after_peer_close_without_restart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let connections = Arc::new(AtomicUsize::new(0));

    // Each accepted connection gets a banner and is then dropped, so
    // the agent sees a peer-close on every cycle.
    let server_connections = connections.clone();
    let server = tokio::spawn(async move {
        loop {
            let (mut stream, _) = listener.accept().await.unwrap();
            server_connections.fetch_add(1, Ordering::SeqCst);
            let _ = stream.write_all(b"Welcome to AlphaMUD.\n").await;
            let _ = stream.flush().await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            drop(stream);
        }
    });

    // The oracle always answers with a no-op decision; the loop's
    // behavior under reconnection is what matters here.
    let oracle = StubOracle::repeating(json!({"analysis": "observing"}));
    let config = fast_config(&addr, &dir.path().join("kb.json"));
    let mut agent = Agent::new(config, oracle);

    let driver = tokio::spawn(async move { agent.run().await });

    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        while connections.load(Ordering::SeqCst) < 3 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;

    assert!(
        waited.is_ok(),
        "agent failed to reconnect after simulated peer closes"
    );

    driver.abort();
    server.abort();
}
