//! Oracle gateway retry and validation behavior

mod common;

use std::time::Duration;

use common::StubOracle;
use serde_json::json;
use sonde::error::AgentError;
use sonde::oracle::{OracleGateway, RetryPolicy};

#[tokio::test]
async fn returns_payload_after_n_failures_with_n_plus_one_attempts() {
    let _ = env_logger::builder().is_test(true).try_init();

    let payload = json!({"analysis": "the server wants a password"});
    let oracle = StubOracle::scripted(vec![
        Err("connection reset".to_string()),
        Err("bad gateway".to_string()),
        Err("rate limited".to_string()),
        Ok(payload.clone()),
    ]);
    let gateway = OracleGateway::new(
        oracle.clone(),
        RetryPolicy::unbounded(Duration::from_millis(5)),
    );

    let result = gateway
        .invoke("system", "user", |v| v.get("analysis").is_some())
        .await
        .expect("gateway settles on the valid payload");

    assert_eq!(result, payload);
    assert_eq!(oracle.calls(), 4);
}

#[tokio::test]
async fn retries_responses_that_fail_validation() {
    let _ = env_logger::builder().is_test(true).try_init();

    let oracle = StubOracle::scripted(vec![
        Ok(json!({"unexpected": "shape"})),
        Ok(json!({"analysis": "now well-formed"})),
    ]);
    let gateway = OracleGateway::new(
        oracle.clone(),
        RetryPolicy::unbounded(Duration::from_millis(5)),
    );

    let result = gateway
        .invoke("system", "user", |v| v.get("analysis").is_some())
        .await
        .expect("second response passes");

    assert_eq!(result["analysis"], "now well-formed");
    assert_eq!(oracle.calls(), 2);
}

#[tokio::test]
async fn bounded_policy_never_emits_a_rejected_result() {
    let _ = env_logger::builder().is_test(true).try_init();

    let oracle = StubOracle::repeating(json!({"analysis": "valid but unwanted"}));
    let gateway = OracleGateway::new(
        oracle.clone(),
        RetryPolicy::bounded(5, Duration::from_millis(5)),
    );

    let result = gateway.invoke("system", "user", |_| false).await;

    match result {
        Err(AgentError::RetriesExhausted { attempts }) => assert_eq!(attempts, 5),
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(oracle.calls(), 5);
}
