//! Persisted knowledge store and the novelty gate in front of it
//!
//! The store is a single JSON array of fact strings, insertion order =
//! discovery order, never rewritten or pruned. Loads are permissive: a
//! missing or corrupt file means "no knowledge yet". Saves replace the
//! whole file atomically via a temp-file rename.
//!
//! Admission is gated twice: an exact-match check that costs nothing,
//! then a semantic judgment by the reasoning oracle. Near-duplicates
//! and low-value phrasing cannot be detected syntactically, so that
//! call is judgment work the oracle owns.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AgentError, Result};
use crate::oracle::{Oracle, OracleGateway};
use crate::prompt;

/// Append-only store of fact strings backed by one JSON file
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    /// Create a store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries
    ///
    /// A missing, unreadable, or corrupt file yields an empty sequence.
    pub async fn load(&self) -> Vec<String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                log::warn!("knowledge file {} is corrupt ({e}), starting empty", self.path.display());
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Atomically replace the persisted sequence with `entries`
    ///
    /// # Errors
    /// Returns `AgentError::Persist` when the file cannot be written or
    /// moved into place. No partial write is ever visible.
    pub async fn save(&self, entries: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");

        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|e| AgentError::persist(format!("write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AgentError::persist(format!("rename to {}: {e}", self.path.display())))?;
        Ok(())
    }

    /// Run `candidate` through the novelty gate; on admission append it
    /// to `entries` and persist immediately
    ///
    /// Empty candidates and exact duplicates are rejected without an
    /// oracle call. Otherwise the oracle judges the candidate against
    /// the full current knowledge; its response must carry a
    /// `decision` of `YES` or `NO` (case-insensitive) before it is
    /// accepted, and `YES` admits.
    ///
    /// # Errors
    /// Propagates gateway exhaustion under a bounded retry policy and
    /// persistence failures. A persistence failure loses the candidate
    /// for this turn; the store on disk keeps its previous contents.
    pub async fn admit<O: Oracle>(
        &self,
        gateway: &OracleGateway<O>,
        entries: &mut Vec<String>,
        candidate: &str,
    ) -> Result<bool> {
        if candidate.is_empty() {
            return Ok(false);
        }
        if entries.iter().any(|entry| entry == candidate) {
            log::debug!("candidate is an exact duplicate, skipping oracle judgment");
            return Ok(false);
        }

        let (system_prompt, user_content) = prompt::novelty_judgment(entries, candidate);
        let verdict = gateway
            .invoke(&system_prompt, &user_content, decision_is_yes_or_no)
            .await?;

        let decision = verdict["decision"].as_str().unwrap_or("NO").trim().to_uppercase();
        if !decision.contains("YES") {
            return Ok(false);
        }

        entries.push(candidate.to_string());
        self.save(entries).await?;
        Ok(true)
    }
}

/// Validator for novelty verdicts: `decision` must be YES or NO
fn decision_is_yes_or_no(value: &Value) -> bool {
    match value["decision"].as_str() {
        Some(raw) => matches!(raw.trim().to_uppercase().as_str(), "YES" | "NO"),
        None => false,
    }
}
