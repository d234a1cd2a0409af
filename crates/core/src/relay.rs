//! Formatting of the external tool's console output.
//!
//! Stdout arrives in arbitrary chunks. Every chunk is split on `\n` on its own,
//! so a line broken across two reads is forwarded as two entries and a chunk
//! ending in `\n` yields a trailing empty entry. Spinner redraws (`\r` followed
//! by one of `|/-\`) are forwarded verbatim so the presenter can overwrite the
//! previous progress line; everything else is trimmed and re-terminated.

use std::fmt::{Display, Formatter};
use std::process::ExitStatus;

const SPINNER_GLYPHS: [char; 4] = ['|', '/', '\\', '-'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// In-place spinner redraw, kept byte for byte.
    Progress(String),
    /// Trimmed line with a single trailing `\n`.
    Normal(String),
}

impl OutputLine {
    pub fn classify(raw: &str) -> Self {
        if is_progress(raw) {
            Self::Progress(raw.to_string())
        } else {
            Self::Normal(format!("{}\n", raw.trim()))
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Progress(text) | Self::Normal(text) => text,
        }
    }

    pub fn is_progress(&self) -> bool {
        matches!(self, Self::Progress(_))
    }
}

impl Display for OutputLine {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.text())
    }
}

fn is_progress(raw: &str) -> bool {
    let mut chars = raw.chars();
    chars.next() == Some('\r') && chars.next().is_some_and(|c| SPINNER_GLYPHS.contains(&c))
}

/// Splits one decoded stdout chunk into forwarded lines.
pub fn split_chunk(chunk: &str) -> Vec<OutputLine> {
    chunk.split('\n').map(OutputLine::classify).collect()
}

/// Incremental UTF-8 decoder for a byte stream.
///
/// Incomplete multi-byte sequences at the end of a chunk are held back until
/// the next chunk; invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    pending: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut decoded = String::new();
        let mut rest: &[u8] = &self.pending;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    decoded.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    decoded.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        Some(len) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        // Unfinished sequence at the very end, wait for more bytes.
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
        decoded
    }

    /// Flushes whatever is still held back once the stream has closed.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }

        let decoded = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(decoded)
    }
}

/// The closing line forwarded once the process has exited.
pub fn finished_line(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("\nLLM Mutator finished with code {code}"),
        None => format!("\nLLM Mutator finished with code none{}", signal_suffix(status)),
    }
}

#[cfg(unix)]
fn signal_suffix(status: &ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    status
        .signal()
        .map(|signal| format!(" (terminated by signal {signal})"))
        .unwrap_or_default()
}

#[cfg(not(unix))]
fn signal_suffix(_status: &ExitStatus) -> String {
    String::new()
}
