//! Error types for the probing agent

use thiserror::Error;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// Failed to establish the target connection
    #[error("Connect error: {0}")]
    Connect(String),

    /// Transport fault on an established connection
    #[error("Transport error: {0}")]
    Transport(String),

    /// Operation attempted while the channel is disconnected
    #[error("Channel is not connected")]
    NotConnected,

    /// Oracle transport failure (HTTP-level)
    #[error("Oracle transport error: {0}")]
    OracleTransport(#[from] reqwest::Error),

    /// Oracle returned a response the call site could not use
    #[error("Oracle response error: {0}")]
    OracleResponse(String),

    /// A bounded retry policy ran out of attempts
    #[error("Oracle retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made before giving up
        attempts: u32,
    },

    /// JSON decode error
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// Failed to persist the knowledge store
    #[error("Persistence error: {0}")]
    Persist(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Create a connect error
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an oracle response error
    pub fn oracle_response(msg: impl Into<String>) -> Self {
        Self::OracleResponse(msg.into())
    }

    /// Create a persistence error
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
