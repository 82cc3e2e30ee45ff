//! Agent configuration
//!
//! All knobs are resolved once at startup, either from environment
//! variables (`Config::from_env`) or programmatically (tests shrink
//! the timing fields to keep retry loops fast).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AgentError, Result};

/// Default target address (a MUD-style server on the local host).
pub const DEFAULT_TARGET_ADDR: &str = "127.0.0.1:4000";

/// Default number of history lines shown to the oracle per turn.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Runtime configuration for one agent session
#[derive(Debug, Clone)]
pub struct Config {
    /// Target server address, `host:port`
    pub target_addr: String,
    /// Oracle API key
    pub api_key: String,
    /// Oracle base URL (OpenAI-compatible endpoint)
    pub base_url: String,
    /// Oracle model identifier
    pub model: String,
    /// Number of most-recent history lines included in oracle context
    pub history_window: usize,
    /// Knowledge store file path
    pub knowledge_path: PathBuf,
    /// Interaction transcript mirror file, `None` disables mirroring
    pub transcript_path: Option<PathBuf>,
    /// Seed long-term goal
    pub long_term_goal: String,
    /// Seed short-term goal
    pub short_term_goal: String,
    /// Bound on the channel connect call
    pub connect_timeout: Duration,
    /// Per-receive timeout; expiry is an observation, not an error
    pub receive_timeout: Duration,
    /// Delay before a reconnect attempt
    pub reconnect_delay: Duration,
    /// Pacing sleep between turns
    pub turn_pacing: Duration,
    /// Backoff between oracle retry attempts
    pub oracle_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_addr: DEFAULT_TARGET_ADDR.to_string(),
            api_key: String::new(),
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            history_window: DEFAULT_HISTORY_WINDOW,
            knowledge_path: PathBuf::from("knowledge_base.json"),
            transcript_path: Some(PathBuf::from("agent_interaction.log")),
            long_term_goal: "Explore the server, understand what it is, and settle on a \
                             long-term objective that fits its nature."
                .to_string(),
            short_term_goal: "Successfully log in to the server.".to_string(),
            connect_timeout: Duration::from_secs(5),
            receive_timeout: Duration::from_secs(5),
            reconnect_delay: Duration::from_secs(5),
            turn_pacing: Duration::from_secs(1),
            oracle_backoff: Duration::from_secs(2),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Recognized variables: `AGENT_TARGET_IP`, `AGENT_TARGET_PORT`,
    /// `AGENT_HISTORY_WINDOW`, `AGENT_KB_FILE`, `AGENT_LOG_FILE`,
    /// `AGENT_LONG_TERM_GOAL`, `AGENT_SHORT_TERM_GOAL`,
    /// `DEEPSEEK_API_KEY`, `DEEPSEEK_BASE_URL`, `DEEPSEEK_MODEL`.
    ///
    /// # Errors
    /// Returns `AgentError::InvalidConfig` if a numeric variable does
    /// not parse.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        let ip = env::var("AGENT_TARGET_IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("AGENT_TARGET_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AgentError::invalid_config(format!("AGENT_TARGET_PORT is not a port: {raw}"))
            })?,
            Err(_) => 4000,
        };
        config.target_addr = format!("{ip}:{port}");

        if let Ok(raw) = env::var("AGENT_HISTORY_WINDOW") {
            config.history_window = raw.parse::<usize>().map_err(|_| {
                AgentError::invalid_config(format!("AGENT_HISTORY_WINDOW is not a number: {raw}"))
            })?;
        }
        if let Ok(path) = env::var("AGENT_KB_FILE") {
            config.knowledge_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("AGENT_LOG_FILE") {
            config.transcript_path = Some(PathBuf::from(path));
        }
        if let Ok(goal) = env::var("AGENT_LONG_TERM_GOAL") {
            config.long_term_goal = goal;
        }
        if let Ok(goal) = env::var("AGENT_SHORT_TERM_GOAL") {
            config.short_term_goal = goal;
        }

        if let Ok(key) = env::var("DEEPSEEK_API_KEY") {
            config.api_key = key;
        }
        if let Ok(url) = env::var("DEEPSEEK_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(model) = env::var("DEEPSEEK_MODEL") {
            config.model = model;
        }

        Ok(config)
    }
}
