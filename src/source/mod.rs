//! Conversation input sources.
//!
//! This module provides the data side of the stack:
//! - [`ItemSource`], the read-only view the layout core consumes
//! - [`StackChange`], the notifications a mutable source emits
//! - File loading for JSONL conversations and a synthetic demo
//! - Unified InputSource enum for both

use crate::model::error::InputError;
use crate::model::{ItemKey, Section, StackItem};
use std::path::PathBuf;

pub mod conversation;
pub mod demo;
pub mod file;

pub use conversation::{ChatMessage, Conversation};
pub use demo::DemoSource;
pub use file::FileSource;

/// Read-only access to the items of both sections.
///
/// Called once per section per layout pass; implementations return items
/// in their own order (not necessarily sorted).
pub trait ItemSource {
    fn items(&self, section: Section) -> Vec<StackItem>;
}

impl ItemSource for [Vec<StackItem>; 2] {
    fn items(&self, section: Section) -> Vec<StackItem> {
        self[section.index()].clone()
    }
}

/// Change notification emitted by a mutable source.
#[derive(Debug, Clone, PartialEq)]
pub enum StackChange {
    Inserted(StackItem),
    Removed(ItemKey),
    /// An existing item was replaced and its sort value may have moved.
    Reordered,
    /// The whole collection was replaced.
    Reset,
}

/// Unified input source for conversation data.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// JSONL file - read-once loading
    File(FileSource),
    /// Generated demo conversation
    Demo(DemoSource),
}

impl InputSource {
    /// All messages on the first call, nothing afterwards.
    pub fn poll(&mut self) -> Vec<ChatMessage> {
        match self {
            InputSource::File(f) => f.drain_messages(),
            InputSource::Demo(d) => d.drain_messages(),
        }
    }

    /// Short label for the status bar.
    pub fn label(&self) -> String {
        match self {
            InputSource::File(f) => f.path().display().to_string(),
            InputSource::Demo(_) => "demo".to_string(),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// A file path loads that file; no path falls back to the demo conversation.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for I/O errors during file reading.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Demo(DemoSource::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn detect_returns_file_source_for_existing_file() {
        let test_file = std::env::temp_dir().join("chatstack_detect_existing.jsonl");
        fs::write(&test_file, "{\"id\":\"a\",\"section\":0,\"sort_value\":1}\n").unwrap();

        let result = detect_input_source(Some(test_file.clone()));
        let _ = fs::remove_file(&test_file);

        let mut source = result.unwrap();
        assert!(matches!(source, InputSource::File(_)));
        assert_eq!(source.poll().len(), 1);
        assert!(source.poll().is_empty());
    }

    #[test]
    fn detect_returns_file_not_found_for_missing_file() {
        let missing = std::env::temp_dir().join("chatstack_detect_missing_12345.jsonl");
        let result = detect_input_source(Some(missing));
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn no_file_falls_back_to_demo() {
        let mut source = detect_input_source(None).unwrap();
        assert!(matches!(source, InputSource::Demo(_)));
        assert_eq!(source.label(), "demo");
        assert!(!source.poll().is_empty());
    }

    #[test]
    fn array_of_sections_is_an_item_source() {
        let item = StackItem::new(crate::model::ItemId::new("a").unwrap(), Section::Incoming, 1.0);
        let sections = [Vec::new(), vec![item.clone()]];
        assert!(sections.items(Section::Outgoing).is_empty());
        assert_eq!(sections.items(Section::Incoming), vec![item]);
    }
}
