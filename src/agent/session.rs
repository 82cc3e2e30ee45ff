//! Per-run session state
//!
//! An explicit value threaded through the decision cycle rather than
//! ambient process state, so a single turn can be exercised in
//! isolation. History grows without bound in memory; only the
//! most-recent window is ever shown to the oracle.

/// Length of the server-text snippet kept in each history entry
const HISTORY_SNIPPET_CHARS: usize = 50;

/// Goal state and conversational history for one agent run
#[derive(Debug, Clone)]
pub struct Session {
    /// Sticky objective; changes only on explicit oracle instruction
    pub long_term_goal: String,
    /// Tactical objective; changes more readily
    pub short_term_goal: String,
    /// One entry per completed turn, oldest first
    history: Vec<String>,
}

impl Session {
    /// Create a session with seed goals
    pub fn new(long_term_goal: impl Into<String>, short_term_goal: impl Into<String>) -> Self {
        Self {
            long_term_goal: long_term_goal.into(),
            short_term_goal: short_term_goal.into(),
            history: Vec::new(),
        }
    }

    /// Record a completed turn: the payload sent and a truncated
    /// snippet of the server text that preceded it
    pub fn record_turn(&mut self, payload: &str, server_text: &str) {
        let snippet: String = server_text.chars().take(HISTORY_SNIPPET_CHARS).collect();
        self.history.push(format!("In: {payload} | Out: {snippet}..."));
    }

    /// The most recent `window` history entries, oldest first
    #[must_use]
    pub fn recent(&self, window: usize) -> &[String] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    /// Total turns recorded so far
    #[must_use]
    pub fn turns(&self) -> usize {
        self.history.len()
    }
}
