//! Reasoning oracle interface
//!
//! The agent never reasons about the target protocol itself; it
//! delegates every judgment to an external oracle reached through the
//! [`Oracle`] trait. Production code uses the OpenAI-compatible HTTP
//! client in [`openai`]; tests inject scripted stubs. All call sites go
//! through the [`gateway`], which retries until the response passes the
//! caller's validator.

pub mod gateway;
pub mod openai;

pub use gateway::{OracleGateway, RetryPolicy};
pub use openai::OpenAiOracle;

use std::future::Future;

use serde_json::Value;

use crate::error::Result;

/// An external capability that maps a structured prompt to a
/// structured decision
///
/// `json_mode` asks the oracle for machine-parseable JSON output; the
/// returned value is the parsed object. Implementations raise on
/// transport failure and on output that cannot be parsed — retrying is
/// the gateway's job, not theirs.
pub trait Oracle: Send + Sync {
    /// Issue one query and return the parsed response
    fn query(
        &self,
        system_prompt: &str,
        user_content: &str,
        json_mode: bool,
    ) -> impl Future<Output = Result<Value>> + Send;
}
