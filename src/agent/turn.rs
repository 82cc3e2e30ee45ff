//! One decision cycle: observe, decide, remember, act

use colored::Color;
use serde::Deserialize;
use serde_json::Value;

use super::Agent;
use crate::channel::TextChannel;
use crate::error::Result;
use crate::oracle::Oracle;
use crate::prompt;

/// Structured result of one oracle decision call
///
/// `analysis` is required; everything else defaults when absent so a
/// terse oracle cannot stall a turn. Goal fields left out mean "keep
/// the current goal".
#[derive(Debug, Clone, Deserialize)]
pub struct Decision {
    /// The oracle's reasoning for this turn
    pub analysis: String,
    /// Proposed knowledge candidate, empty for none
    #[serde(default)]
    pub new_knowledge: String,
    /// Updated long-term goal, `None` keeps the current one
    #[serde(default)]
    pub long_term_goal: Option<String>,
    /// Updated short-term goal, `None` keeps the current one
    #[serde(default)]
    pub short_term_goal: Option<String>,
    /// Payload to send next, empty for no send
    #[serde(default)]
    pub next_payload: String,
}

impl Decision {
    /// Gateway validator: the response must deserialize into a
    /// [`Decision`], which requires at least an `analysis` string
    #[must_use]
    pub fn is_well_formed(value: &Value) -> bool {
        serde_json::from_value::<Self>(value.clone()).is_ok()
    }
}

/// How a completed turn leaves the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// Keep interacting on this connection
    Continue,
    /// The send failed; the session loop must reconnect
    ConnectionLost,
}

impl<O: Oracle> Agent<O> {
    /// Run one decision cycle against sanitized `server_text`
    ///
    /// Reloads the knowledge store fresh, asks the oracle for a
    /// validated [`Decision`], applies goal transitions, gates and
    /// persists any knowledge candidate, and sends the payload with a
    /// history entry recording the exchange.
    ///
    /// # Errors
    /// Propagates persistence failures and (under a bounded retry
    /// policy) gateway exhaustion. A failed send is not an error here;
    /// it surfaces as [`TurnStatus::ConnectionLost`].
    pub async fn run_turn(
        &mut self,
        channel: &mut TextChannel,
        server_text: &str,
    ) -> Result<TurnStatus> {
        // The store is authoritative, not any in-memory copy: reload
        // each turn in case something else touched the file.
        let mut knowledge = self.store.load().await;

        let (system_prompt, user_content) = prompt::decision(
            &self.session.long_term_goal,
            &self.session.short_term_goal,
            &knowledge,
            self.session.recent(self.config.history_window),
            server_text,
        );

        log::debug!("requesting decision for turn {}", self.session.turns() + 1);
        let raw = self
            .gateway
            .invoke(&system_prompt, &user_content, Decision::is_well_formed)
            .await?;
        let decision: Decision = serde_json::from_value(raw)?;

        self.console.line(
            "brain",
            &format!("analysis: {}", decision.analysis),
            Some(Color::BrightCyan),
        );

        if let Some(goal) = decision.long_term_goal
            && goal != self.session.long_term_goal
        {
            self.console.line(
                "brain",
                &format!("long-term goal updated: {} -> {goal}", self.session.long_term_goal),
                Some(Color::BrightBlue),
            );
            self.session.long_term_goal = goal;
        }
        if let Some(goal) = decision.short_term_goal
            && goal != self.session.short_term_goal
        {
            self.console.line(
                "brain",
                &format!("short-term goal updated: {} -> {goal}", self.session.short_term_goal),
                Some(Color::BrightYellow),
            );
            self.session.short_term_goal = goal;
        }

        if !decision.new_knowledge.is_empty() {
            let admitted = self
                .store
                .admit(&self.gateway, &mut knowledge, &decision.new_knowledge)
                .await?;
            if admitted {
                self.console.line(
                    "brain",
                    &format!("learned and saved: {}", decision.new_knowledge),
                    Some(Color::BrightMagenta),
                );
            } else {
                self.console.line(
                    "brain",
                    &format!("judged redundant: {}", decision.new_knowledge),
                    None,
                );
            }
        }

        if decision.next_payload.is_empty() {
            self.console
                .line("brain", "decided to send nothing", Some(Color::BrightCyan));
        } else {
            self.console.line(
                "client",
                &format!("send: {}", decision.next_payload),
                Some(Color::BrightGreen),
            );
            if let Err(e) = channel.send(&decision.next_payload).await {
                self.console
                    .line("system", &format!("send failed: {e}"), Some(Color::BrightRed));
                return Ok(TurnStatus::ConnectionLost);
            }
            self.session.record_turn(&decision.next_payload, server_text);
        }

        Ok(TurnStatus::Continue)
    }
}
