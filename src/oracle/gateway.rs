//! Call-until-valid wrapper around the reasoning oracle
//!
//! Every oracle call site needs a well-formed result before the turn
//! can proceed, and a guessed default would corrupt persisted state.
//! The gateway therefore retries transport failures and
//! validation failures alike, with a fixed backoff, until the injected
//! validator accepts the response. The default policy is unbounded;
//! tests cap it with [`RetryPolicy::bounded`].

use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;

use super::Oracle;
use crate::error::{AgentError, Result};

/// Retry behavior for oracle calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts before giving up, `None` retries forever
    pub max_attempts: Option<u32>,
    /// Delay between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Retry forever with the given backoff
    #[must_use]
    pub fn unbounded(backoff: Duration) -> Self {
        Self {
            max_attempts: None,
            backoff,
        }
    }

    /// Give up after `max_attempts` attempts
    #[must_use]
    pub fn bounded(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            backoff,
        }
    }
}

/// Retrying boundary in front of one [`Oracle`]
#[derive(Debug)]
pub struct OracleGateway<O> {
    oracle: O,
    policy: RetryPolicy,
}

impl<O> OracleGateway<O> {
    /// Wrap `oracle` with the given retry policy
    pub fn new(oracle: O, policy: RetryPolicy) -> Self {
        Self { oracle, policy }
    }

    /// Unwrap the gateway, recovering the oracle
    pub fn into_oracle(self) -> O {
        self.oracle
    }
}

impl<O: Oracle> OracleGateway<O> {
    /// Query the oracle until `validator` accepts the response
    ///
    /// Transport failures, parse failures, and validation failures are
    /// logged and retried after the policy backoff. Under the default
    /// unbounded policy this never returns an error: callers receive a
    /// validated response or wait.
    ///
    /// # Errors
    /// Returns `AgentError::RetriesExhausted` only under a bounded
    /// policy whose attempt budget ran out.
    pub async fn invoke<F>(&self, system_prompt: &str, user_content: &str, validator: F) -> Result<Value>
    where
        F: Fn(&Value) -> bool,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match self.oracle.query(system_prompt, user_content, true).await {
                Ok(value) => {
                    if validator(&value) {
                        return Ok(value);
                    }
                    log::warn!("oracle response failed validation (attempt {attempts}), retrying");
                }
                Err(e) => {
                    log::warn!("oracle call failed (attempt {attempts}): {e}, retrying");
                }
            }

            if let Some(max) = self.policy.max_attempts
                && attempts >= max
            {
                return Err(AgentError::RetriesExhausted { attempts });
            }
            sleep(self.policy.backoff).await;
        }
    }
}
