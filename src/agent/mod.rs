//! Session loop and per-turn orchestration
//!
//! [`Agent`] drives one strictly sequential session: connect with
//! retry, then receive -> sanitize -> decision cycle until the
//! connection drops, then reconnect. The loop never exits on its own;
//! operator interruption at the binary entry is the only way out.

pub mod session;
pub mod turn;

pub use session::Session;
pub use turn::{Decision, TurnStatus};

use colored::Color;
use tokio::time::sleep;

use crate::channel::{ReceiveOutcome, TextChannel, sanitize};
use crate::config::Config;
use crate::console::Console;
use crate::error::Result;
use crate::knowledge::KnowledgeStore;
use crate::oracle::{Oracle, OracleGateway, RetryPolicy};

/// Server-text stand-in for a receive window that expired
///
/// A silent server is an observation the oracle must reason about, so
/// the sentinel flows into the decision cycle as ordinary input.
pub const TIMEOUT_SENTINEL: &str = "<timeout - no response>";

/// One autonomous probing agent
pub struct Agent<O> {
    pub(crate) config: Config,
    pub(crate) gateway: OracleGateway<O>,
    pub(crate) store: KnowledgeStore,
    pub(crate) console: Console,
    pub(crate) session: Session,
}

impl<O: Oracle> Agent<O> {
    /// Create an agent with an unbounded oracle retry policy
    pub fn new(config: Config, oracle: O) -> Self {
        let gateway = OracleGateway::new(oracle, RetryPolicy::unbounded(config.oracle_backoff));
        let store = KnowledgeStore::new(&config.knowledge_path);
        let console = Console::new(config.transcript_path.clone());
        let session = Session::new(&config.long_term_goal, &config.short_term_goal);
        Self {
            config,
            gateway,
            store,
            console,
            session,
        }
    }

    /// Replace the gateway retry policy (bounded policies keep tests
    /// deterministic)
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.gateway = OracleGateway::new(
            // Rebuild the gateway around the same oracle.
            self.gateway.into_oracle(),
            policy,
        );
        self
    }

    /// Current session state
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Knowledge store backing this agent
    #[must_use]
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Drive the session forever: connect with retry, interact,
    /// reconnect on any drop or fault
    ///
    /// Never returns on its own; every fault, gateway exhaustion
    /// included, becomes a logged delayed reconnect. Interruption is
    /// the binary entry's job.
    ///
    /// # Errors
    /// The `Result` return exists for the caller's `?` ergonomics; no
    /// error path currently reaches it.
    pub async fn run(&mut self) -> Result<()> {
        self.console.line(
            "system",
            &format!("starting autonomous agent, target: {}", self.config.target_addr),
            Some(Color::BrightWhite),
        );

        loop {
            let mut channel =
                TextChannel::new(self.config.target_addr.as_str(), self.config.connect_timeout);

            while let Err(e) = channel.connect().await {
                self.console.line(
                    "system",
                    &format!(
                        "connect failed: {e}, retrying in {:?}",
                        self.config.reconnect_delay
                    ),
                    Some(Color::BrightRed),
                );
                sleep(self.config.reconnect_delay).await;
            }
            self.console.line(
                "system",
                &format!("connected to {}", self.config.target_addr),
                Some(Color::BrightWhite),
            );

            // A clean Ok(()) means the connection dropped: reconnect at
            // once. A fault gets logged and a delayed reconnect.
            if let Err(e) = self.interact(&mut channel).await {
                log::error!("session fault: {e}");
                self.console.line(
                    "system",
                    &format!(
                        "session fault: {e}, reconnecting in {:?}",
                        self.config.reconnect_delay
                    ),
                    Some(Color::BrightRed),
                );
                sleep(self.config.reconnect_delay).await;
            }
            channel.disconnect();
        }
    }

    /// Interact on one live connection until it drops
    async fn interact(&mut self, channel: &mut TextChannel) -> Result<()> {
        loop {
            let server_text = match channel.receive(self.config.receive_timeout).await {
                Ok(ReceiveOutcome::Data(raw)) => sanitize(&raw),
                Ok(ReceiveOutcome::Timeout) => TIMEOUT_SENTINEL.to_string(),
                Ok(ReceiveOutcome::Closed) => {
                    self.console.line(
                        "system",
                        "server closed the connection",
                        Some(Color::BrightRed),
                    );
                    return Ok(());
                }
                Err(e) => {
                    self.console
                        .line("system", &format!("socket error: {e}"), Some(Color::BrightRed));
                    return Ok(());
                }
            };
            self.console.line("server", &server_text, None);

            match self.run_turn(channel, &server_text).await? {
                TurnStatus::Continue => {}
                TurnStatus::ConnectionLost => return Ok(()),
            }

            // Pacing: do not hammer the target.
            sleep(self.config.turn_pacing).await;
        }
    }
}

impl<O> Agent<O> {
    /// Access the underlying configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
