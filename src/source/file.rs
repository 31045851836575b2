//! File-based conversation source.
//!
//! Reads a JSONL file once, one message per line:
//!
//! ```text
//! {"id": "m1", "section": 0, "timestamp": "2025-01-01T10:00:00Z", "text": "hi"}
//! {"id": "m2", "section": 1, "sort_value": 1735725601.5, "text": "hello"}
//! ```
//!
//! `sort_value` wins over `timestamp` when both are present. Malformed lines
//! are logged and skipped.

use super::conversation::ChatMessage;
use crate::model::error::{InputError, ParseError};
use crate::model::{ItemId, Section, StackItem};
use chrono::DateTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Raw JSON structure for deserializing one message line.
#[derive(Debug, Deserialize)]
struct RawChatLine {
    id: ItemId,
    section: Section,
    #[serde(default)]
    sort_value: Option<f64>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    text: String,
}

/// Parse a single JSONL line into a message.
///
/// # Errors
///
/// Returns `ParseError` if:
/// - JSON is malformed, the id is empty or the section is not 0 or 1
/// - neither `sort_value` nor `timestamp` is present
/// - the timestamp is not RFC 3339
/// - the sort value is not finite
pub fn parse_line(raw: &str, line_number: usize) -> Result<ChatMessage, ParseError> {
    let line: RawChatLine = serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let sort_value = match (line.sort_value, line.timestamp) {
        (Some(value), _) => value,
        (None, Some(raw_timestamp)) => timestamp_seconds(&raw_timestamp).ok_or(
            ParseError::InvalidTimestamp {
                line: line_number,
                raw: raw_timestamp,
            },
        )?,
        (None, None) => return Err(ParseError::MissingSortKey { line: line_number }),
    };

    if !sort_value.is_finite() {
        return Err(ParseError::NonFiniteSortValue { line: line_number });
    }

    Ok(ChatMessage::new(
        StackItem::new(line.id, line.section, sort_value),
        line.text,
    ))
}

/// Seconds since the Unix epoch, with sub-second precision.
fn timestamp_seconds(raw: &str) -> Option<f64> {
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?;
    let nanos = f64::from(parsed.timestamp_subsec_nanos()) / 1_000_000_000.0;
    Some(parsed.timestamp() as f64 + nanos)
}

/// Read-once JSONL conversation file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    pending: Vec<ChatMessage>,
    skipped: usize,
}

impl FileSource {
    /// Load and parse the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut pending = Vec::new();
        let mut skipped = 0;
        for (index, raw) in content.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            match parse_line(raw, index + 1) {
                Ok(message) => pending.push(message),
                Err(error) => {
                    warn!(path = %path.display(), line = error.line(), %error, "skipping malformed line");
                    skipped += 1;
                }
            }
        }

        info!(
            path = %path.display(),
            messages = pending.len(),
            skipped,
            "loaded conversation file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            pending,
            skipped,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of malformed lines that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// All messages on the first call, nothing afterwards.
    pub fn drain_messages(&mut self) -> Vec<ChatMessage> {
        std::mem::take(&mut self.pending)
    }
}
