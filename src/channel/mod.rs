//! Text channel over one TCP connection
//!
//! Owns the socket session against the target server: connect with a
//! bounded timeout, newline-terminated sends, timeout-aware receives,
//! and disconnect. A receive timeout is a legitimate observation for
//! the decision cycle, so it is reported as [`ReceiveOutcome::Timeout`]
//! rather than an error. Any transport fault drops the connection as a
//! side effect before the error is returned.

mod sanitize;

pub use sanitize::sanitize;

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::{AgentError, Result};

/// Receive buffer size, matches one read from the peer
const RECV_BUFFER_SIZE: usize = 4096;

/// Result of one receive call on a connected channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Decoded server text (best-effort UTF-8, surrounding whitespace trimmed)
    Data(String),
    /// Nothing arrived within the timeout; the channel stays connected
    Timeout,
    /// Zero-length read: the peer closed the connection
    Closed,
}

/// One TCP text session against the target server
#[derive(Debug)]
pub struct TextChannel {
    addr: String,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl TextChannel {
    /// Create a disconnected channel for `addr` (`host:port`)
    pub fn new(addr: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            stream: None,
            connect_timeout,
        }
    }

    /// Target address this channel connects to
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Whether a live connection is held
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the connection
    ///
    /// # Errors
    /// Returns `AgentError::Connect` when the connect fails or does not
    /// complete within the bounded timeout. Never fatal to the process.
    pub async fn connect(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = match timeout(self.connect_timeout, TcpStream::connect(self.addr.as_str())).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(AgentError::connect(format!(
                    "failed to connect to {}: {e}",
                    self.addr
                )));
            }
            Err(_) => {
                return Err(AgentError::connect(format!(
                    "connect to {} timed out after {:?}",
                    self.addr, self.connect_timeout
                )));
            }
        };

        log::info!("connected to {}", self.addr);
        self.stream = Some(stream);
        Ok(())
    }

    /// Close the connection if open
    pub fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            log::info!("disconnected from {}", self.addr);
        }
    }

    /// Send a payload, appending exactly one trailing newline
    ///
    /// # Errors
    /// Returns `AgentError::NotConnected` when no connection is held.
    /// On a transport fault the channel transitions to disconnected
    /// before `AgentError::Transport` is returned.
    pub async fn send(&mut self, payload: &str) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(AgentError::NotConnected)?;

        let mut bytes = payload.as_bytes().to_vec();
        bytes.push(b'\n');

        if let Err(e) = stream.write_all(&bytes).await {
            self.disconnect();
            return Err(AgentError::transport(format!("send failed: {e}")));
        }
        Ok(())
    }

    /// Block up to `receive_timeout` for the next chunk of server text
    ///
    /// A timeout leaves the channel connected and yields
    /// [`ReceiveOutcome::Timeout`]. A zero-length read or transport
    /// fault disconnects the channel; the former yields
    /// [`ReceiveOutcome::Closed`], the latter an error.
    ///
    /// # Errors
    /// Returns `AgentError::NotConnected` when no connection is held,
    /// or `AgentError::Transport` on a socket fault.
    pub async fn receive(&mut self, receive_timeout: Duration) -> Result<ReceiveOutcome> {
        let stream = self.stream.as_mut().ok_or(AgentError::NotConnected)?;

        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        match timeout(receive_timeout, stream.read(&mut buf)).await {
            Ok(Ok(0)) => {
                self.disconnect();
                Ok(ReceiveOutcome::Closed)
            }
            Ok(Ok(n)) => {
                // Best-effort decode: invalid byte sequences are dropped,
                // not fatal and not kept as replacement characters.
                let text = String::from_utf8_lossy(&buf[..n]).replace('\u{fffd}', "");
                Ok(ReceiveOutcome::Data(text.trim().to_string()))
            }
            Ok(Err(e)) => {
                self.disconnect();
                Err(AgentError::transport(format!("receive failed: {e}")))
            }
            Err(_) => Ok(ReceiveOutcome::Timeout),
        }
    }
}
