//! OpenAI-compatible chat-completions oracle client
//!
//! Works against any endpoint speaking the `/chat/completions` shape,
//! DeepSeek included. JSON mode requests
//! `response_format: {"type": "json_object"}` so the content body can
//! be parsed straight into a [`Value`].

use reqwest::Client;
use serde_json::{Value, json};

use super::Oracle;
use crate::config::Config;
use crate::error::{AgentError, Result};

/// HTTP client for an OpenAI-compatible reasoning oracle
#[derive(Debug, Clone)]
pub struct OpenAiOracle {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiOracle {
    /// Create a client for `base_url` using `model`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Create a client from the resolved agent configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, &config.api_key, &config.model)
    }
}

impl Oracle for OpenAiOracle {
    async fn query(&self, system_prompt: &str, user_content: &str, json_mode: bool) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_content}
            ],
            "stream": false
        });
        if json_mode {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: Value = response.json().await?;
        let content = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AgentError::oracle_response("completion has no message content"))?;

        if json_mode {
            Ok(serde_json::from_str(content)?)
        } else {
            // Non-JSON callers still get a parse attempt; plain text is
            // wrapped as a JSON string.
            Ok(serde_json::from_str(content)
                .unwrap_or_else(|_| Value::String(content.to_string())))
        }
    }
}
