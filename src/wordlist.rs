//! Wordlist loading and placeholder substitution.

use std::path::Path;

use thiserror::Error;
use tokio::fs;

/// Placeholder token replaced by each wordlist entry.
pub const PLACEHOLDER: &str = "FUZZ";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("failed to read wordlist: {0}")]
    Io(#[from] std::io::Error),
    #[error("URL must include 'FUZZ'")]
    MissingPlaceholder,
}

/// Loads a wordlist: one entry per newline-separated line.
///
/// Only `\n` splits lines, so a `\r` left behind by a CRLF wordlist stays
/// part of the entry (and is later percent-escaped). Empty lines are
/// dropped; a final line without a trailing newline still counts.
pub async fn load(path: &Path) -> Result<Vec<String>, WordlistError> {
    let contents = fs::read_to_string(path).await?;
    Ok(contents
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Substitutes `word` for the first occurrence of the placeholder in
/// `template` and percent-escapes the complete result.
pub fn substitute(template: &str, word: &str) -> Result<String, WordlistError> {
    let start = template
        .find(PLACEHOLDER)
        .ok_or(WordlistError::MissingPlaceholder)?;

    let mut path = String::with_capacity(template.len() + word.len());
    path.push_str(&template[..start]);
    path.push_str(word);
    path.push_str(&template[start + PLACEHOLDER.len()..]);

    Ok(escape(&path))
}

/// Loads the wordlist at `path` and substitutes every entry into
/// `template`, preserving wordlist order.
pub async fn generate(template: &str, path: &Path) -> Result<Vec<String>, WordlistError> {
    let words = load(path).await?;
    words
        .iter()
        .map(|word| substitute(template, word))
        .collect()
}

/// Whether `byte` must be percent-escaped before going on the request line.
///
/// Control bytes, space, and the RFC 2396 delims/unwise characters are
/// escaped; everything else, multi-byte UTF-8 included, passes through.
fn must_escape(byte: u8) -> bool {
    byte <= 0x20
        || matches!(
            byte,
            b'<' | b'>' | b'#' | b'%' | b'"' | b'{' | b'}' | b'|' | b'\\' | b'^' | b'[' | b']' | b'`'
        )
}

fn escape(s: &str) -> String {
    let mut out = Vec::with_capacity(s.len());
    for &byte in s.as_bytes() {
        if must_escape(byte) {
            out.push(b'%');
            out.push(HEX_DIGITS[(byte >> 4) as usize]);
            out.push(HEX_DIGITS[(byte & 0xf) as usize]);
        } else {
            out.push(byte);
        }
    }
    // Escapes are ASCII and unescaped bytes are copied verbatim, so valid
    // UTF-8 in means valid UTF-8 out.
    String::from_utf8_lossy(&out).into_owned()
}
