//! Synthetic two-party conversation used when no file is given.

use super::conversation::ChatMessage;
use crate::model::{ItemId, Section, StackItem};

const OUTGOING_LINES: &[&str] = &[
    "hey, are you around?",
    "wanted to ask about the release",
    "did the benchmarks finish?",
    "nice, that is faster than I expected",
    "ship it on friday then",
    "I will write the notes",
    "one more thing: the config docs",
];

const INCOMING_LINES: &[&str] = &[
    "yes, what's up",
    "sure, go ahead",
    "they did, numbers look good",
    "same here",
    "works for me",
    "thanks!",
    "on it",
    "done, take a look",
];

/// Deterministic generator for demo messages.
#[derive(Debug, Clone)]
pub struct DemoSource {
    count: usize,
    drained: bool,
}

impl DemoSource {
    /// A demo with `count` messages.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            drained: false,
        }
    }

    /// All messages on the first call, nothing afterwards.
    pub fn drain_messages(&mut self) -> Vec<ChatMessage> {
        if std::mem::replace(&mut self.drained, true) {
            return Vec::new();
        }
        generate(self.count)
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new(12)
    }
}

/// Generate `count` messages one second apart.
///
/// Sections follow a fixed pattern so both stacks get bursts of several
/// messages as well as strict alternation.
pub fn generate(count: usize) -> Vec<ChatMessage> {
    (0..count)
        .map(|n| {
            let section = if n % 5 == 1 || n % 5 == 3 || n % 5 == 4 {
                Section::Incoming
            } else {
                Section::Outgoing
            };
            demo_message(n, section, n as f64)
        })
        .collect()
}

/// The `n`-th demo message for `section` at `sort_value`.
pub fn demo_message(n: usize, section: Section, sort_value: f64) -> ChatMessage {
    let (prefix, lines) = match section {
        Section::Outgoing => ("out", OUTGOING_LINES),
        Section::Incoming => ("in", INCOMING_LINES),
    };
    let text = lines[n % lines.len()];
    let id = ItemId::new(format!("{prefix}-{n}")).unwrap_or_else(|_| unreachable!("demo ids are never empty"));
    ChatMessage::new(StackItem::new(id, section, sort_value), text)
}
