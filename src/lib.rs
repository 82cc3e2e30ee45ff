//! # sonde
//!
//! An autonomous probing client for line-oriented socket protocols.
//! It connects to an unknown text server (a MUD-like shell, a debug
//! console, a custom daemon), feeds each sanitized response to an
//! external reasoning oracle, and acts on the structured decision that
//! comes back: updating its goals, sending the next payload, and
//! growing a persisted, duplicate-free knowledge base about the
//! target.
//!
//! ## Control loop
//!
//! ```text
//! channel -> sanitize -> decision cycle -> oracle gateway -> oracle
//!     ^                                                        |
//!     +-- send <- { novelty gate -> knowledge store, goals } <-+
//! ```
//!
//! The session survives disconnects indefinitely (reconnect with a
//! fixed delay), never trusts a malformed oracle response (the gateway
//! retries until the caller's validator passes), and never stores the
//! same fact twice (exact-match short-circuit, then a semantic
//! judgment by the oracle itself).
//!
//! ## Quick start
//!
//! ```no_run
//! use sonde::agent::Agent;
//! use sonde::config::Config;
//! use sonde::oracle::OpenAiOracle;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let oracle = OpenAiOracle::from_config(&config);
//!     let mut agent = Agent::new(config, oracle);
//!     agent.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`channel`]: the TCP text channel and raw-text sanitization
//! - [`knowledge`]: the persisted knowledge store and novelty gate
//! - [`oracle`]: the reasoning oracle trait, the OpenAI-compatible
//!   client, and the call-until-valid gateway
//! - [`agent`]: session state, the per-turn decision cycle, and the
//!   reconnecting session loop
//! - [`config`]: environment-driven configuration
//! - [`console`]: the colored, file-mirrored interaction transcript
//! - [`error`]: error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod channel;
pub mod config;
pub mod console;
pub mod error;
pub mod knowledge;
pub mod oracle;
pub mod prompt;

pub use agent::{Agent, Decision, Session, TurnStatus};
pub use channel::{ReceiveOutcome, TextChannel, sanitize};
pub use config::Config;
pub use error::{AgentError, Result};
pub use knowledge::KnowledgeStore;
pub use oracle::{OpenAiOracle, Oracle, OracleGateway, RetryPolicy};
