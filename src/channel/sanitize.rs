//! Raw server text sanitization
//!
//! Target servers are free to emit terminal escape sequences and
//! arbitrary control bytes. The oracle context must carry only
//! printable text and newlines.

use std::sync::LazyLock;

use regex::Regex;

// ANSI escape sequences: a lone ESC+final byte, or a full CSI sequence.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\\-_]|\[[0-?]*[ -/]*[@-~])").expect("ANSI escape pattern compiles")
});

/// Strip terminal escape sequences and control characters
///
/// Removes every ANSI escape sequence, then every control character
/// except `\n` (DEL included), preserving all printable characters and
/// newlines in their original order. Idempotent: sanitizing already
/// clean text returns it unchanged.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let stripped = ANSI_ESCAPE.replace_all(raw, "");
    stripped
        .chars()
        .filter(|&c| c == '\n' || (c >= ' ' && c != '\u{7f}'))
        .collect()
}
