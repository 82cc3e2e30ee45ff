//! End-to-end decision cycles with a scripted oracle and a live socket

mod common;

use std::time::Duration;

use common::{StubOracle, fast_config};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sonde::agent::{Agent, TurnStatus};
use sonde::channel::{ReceiveOutcome, TextChannel, sanitize};
use sonde::oracle::RetryPolicy;

const LONG_GOAL: &str = "Explore the server and understand it.";
const SHORT_GOAL: &str = "Successfully log in.";

async fn connected_channel(listener: &TcpListener) -> (TextChannel, tokio::net::TcpStream) {
    let addr = listener.local_addr().unwrap();
    let mut channel = TextChannel::new(addr.to_string(), Duration::from_millis(500));
    let (result, accepted) = tokio::join!(channel.connect(), listener.accept());
    result.unwrap();
    (channel, accepted.unwrap().0)
}

fn agent_with(oracle: StubOracle, addr: &str, dir: &tempfile::TempDir) -> Agent<StubOracle> {
    let mut config = fast_config(addr, &dir.path().join("kb.json"));
    config.long_term_goal = LONG_GOAL.to_string();
    config.short_term_goal = SHORT_GOAL.to_string();
    Agent::new(config, oracle)
        .with_retry_policy(RetryPolicy::bounded(3, Duration::from_millis(5)))
}

#[tokio::test]
async fn payload_turn_sends_and_records_history_without_novelty_call() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (mut channel, mut server) = connected_channel(&listener).await;

    server
        .write_all("ID已接受。请输入密码：\n".as_bytes())
        .await
        .unwrap();
    let raw = match channel.receive(Duration::from_millis(500)).await.unwrap() {
        ReceiveOutcome::Data(raw) => raw,
        other => panic!("expected data, got {other:?}"),
    };
    let server_text = sanitize(&raw);

    let oracle = StubOracle::scripted(vec![Ok(json!({
        "analysis": "the server is asking for a password",
        "new_knowledge": "",
        "long_term_goal": LONG_GOAL,
        "short_term_goal": SHORT_GOAL,
        "next_payload": "123456"
    }))]);
    let mut agent = agent_with(oracle.clone(), &addr, &dir);

    let status = agent.run_turn(&mut channel, &server_text).await.unwrap();
    assert_eq!(status, TurnStatus::Continue);

    // The channel sent exactly the payload plus one newline.
    let mut buf = vec![0u8; 64];
    let n = server.read(&mut buf).await.unwrap();
    assert_eq!(&buf[..n], b"123456\n");

    // One history entry referencing the payload; empty candidate means
    // no novelty call, so the decision call is the only oracle call.
    assert_eq!(agent.session().turns(), 1);
    assert!(agent.session().recent(10)[0].contains("In: 123456"));
    assert_eq!(oracle.calls(), 1);
    assert!(agent.store().load().await.is_empty());
}

#[tokio::test]
async fn knowledge_turn_grows_the_store_from_zero_to_one() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (mut channel, _server) = connected_channel(&listener).await;

    let oracle = StubOracle::scripted(vec![
        Ok(json!({
            "analysis": "these credentials worked",
            "new_knowledge": "用户名: bob, 密码: secret",
            "long_term_goal": LONG_GOAL,
            "short_term_goal": SHORT_GOAL,
            "next_payload": ""
        })),
        Ok(json!({"decision": "YES"})),
    ]);
    let mut agent = agent_with(oracle.clone(), &addr, &dir);

    let status = agent
        .run_turn(&mut channel, "Welcome to this world! HP:100/100 >")
        .await
        .unwrap();
    assert_eq!(status, TurnStatus::Continue);

    let persisted = agent.store().load().await;
    assert_eq!(persisted, vec!["用户名: bob, 密码: secret".to_string()]);
    // Decision call plus one novelty judgment.
    assert_eq!(oracle.calls(), 2);
    // Empty payload: nothing sent, no history entry.
    assert_eq!(agent.session().turns(), 0);
}

#[tokio::test]
async fn goal_transitions_replace_session_goals() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (mut channel, _server) = connected_channel(&listener).await;

    let oracle = StubOracle::scripted(vec![Ok(json!({
        "analysis": "login is done, time to explore",
        "new_knowledge": "",
        "long_term_goal": "Map the whole world.",
        "short_term_goal": "Reach the north room.",
        "next_payload": ""
    }))]);
    let mut agent = agent_with(oracle, &addr, &dir);

    agent
        .run_turn(&mut channel, "You see a dark room.")
        .await
        .unwrap();

    assert_eq!(agent.session().long_term_goal, "Map the whole world.");
    assert_eq!(agent.session().short_term_goal, "Reach the north room.");
}

#[tokio::test]
async fn omitted_goal_fields_keep_current_goals() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (mut channel, _server) = connected_channel(&listener).await;

    let oracle = StubOracle::scripted(vec![Ok(json!({"analysis": "nothing new"}))]);
    let mut agent = agent_with(oracle, &addr, &dir);

    agent.run_turn(&mut channel, "<timeout - no response>").await.unwrap();

    assert_eq!(agent.session().long_term_goal, LONG_GOAL);
    assert_eq!(agent.session().short_term_goal, SHORT_GOAL);
}

#[tokio::test]
async fn send_failure_reports_connection_lost() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (mut channel, server) = connected_channel(&listener).await;

    // Close the peer and give the stack a moment to notice, then force
    // the send failure by writing into the dead connection twice.
    drop(server);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let oracle = StubOracle::repeating(json!({
        "analysis": "try again",
        "next_payload": "look"
    }));
    let mut agent = agent_with(oracle, &addr, &dir);

    let mut lost = false;
    for _ in 0..3 {
        match agent.run_turn(&mut channel, "HP:100/100 >").await.unwrap() {
            TurnStatus::Continue => continue,
            TurnStatus::ConnectionLost => {
                lost = true;
                break;
            }
        }
    }
    assert!(lost, "writes into a closed connection must surface as ConnectionLost");
    assert!(!channel.is_connected());
}
