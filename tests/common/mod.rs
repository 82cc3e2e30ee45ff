//! Shared test fixtures: a scripted stub oracle and fast configs

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use sonde::config::Config;
use sonde::error::AgentError;
use sonde::oracle::Oracle;

struct StubInner {
    script: Mutex<VecDeque<Result<Value, String>>>,
    fallback: Option<Value>,
    calls: AtomicUsize,
}

/// Scripted oracle: plays back queued responses, then the fallback
///
/// Cloning shares the script and call counter, so a test can keep a
/// handle after moving the stub into an agent.
#[derive(Clone)]
pub struct StubOracle {
    inner: Arc<StubInner>,
}

impl StubOracle {
    pub fn scripted(responses: Vec<Result<Value, String>>) -> Self {
        Self {
            inner: Arc::new(StubInner {
                script: Mutex::new(responses.into_iter().collect()),
                fallback: None,
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Empty script with an endless fallback response
    pub fn repeating(fallback: Value) -> Self {
        Self {
            inner: Arc::new(StubInner {
                script: Mutex::new(VecDeque::new()),
                fallback: Some(fallback),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl Oracle for StubOracle {
    async fn query(
        &self,
        _system_prompt: &str,
        _user_content: &str,
        _json_mode: bool,
    ) -> sonde::Result<Value> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.inner.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(AgentError::oracle_response(message)),
            None => match &self.inner.fallback {
                Some(value) => Ok(value.clone()),
                None => Err(AgentError::oracle_response("stub script exhausted")),
            },
        }
    }
}

/// Config with millisecond timings and a temp-dir knowledge file
pub fn fast_config(target_addr: &str, knowledge_path: &Path) -> Config {
    Config {
        target_addr: target_addr.to_string(),
        knowledge_path: knowledge_path.to_path_buf(),
        transcript_path: None,
        connect_timeout: Duration::from_millis(500),
        receive_timeout: Duration::from_millis(200),
        reconnect_delay: Duration::from_millis(50),
        turn_pacing: Duration::from_millis(10),
        oracle_backoff: Duration::from_millis(10),
        ..Config::default()
    }
}
