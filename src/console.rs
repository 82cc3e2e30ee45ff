//! Human-facing interaction transcript
//!
//! Every state-changing event is echoed as a timestamped, tagged line
//! to stdout and, when configured, mirrored to a transcript file. The
//! mirror keeps the color codes so `tail -f` renders them. This is a
//! presentation side channel; correctness never depends on it, and
//! mirror write failures are swallowed.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
pub use colored::Color;
use colored::Colorize;

/// Timestamped, tagged, colored transcript writer
#[derive(Debug, Clone)]
pub struct Console {
    mirror: Option<PathBuf>,
}

impl Console {
    /// Create a console, mirroring to `mirror` when given
    pub fn new(mirror: Option<PathBuf>) -> Self {
        Self { mirror }
    }

    /// Emit one transcript line
    pub fn line(&self, tag: &str, message: &str, color: Option<Color>) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let body = format!("[{timestamp}] [{tag}] {message}");
        let rendered = match color {
            Some(color) => body.color(color).to_string(),
            None => body,
        };

        println!("{rendered}");

        if let Some(path) = &self.mirror {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| writeln!(file, "{rendered}"));
            if let Err(e) = result {
                log::debug!("transcript mirror write failed: {e}");
            }
        }
    }
}
