//! Core identifier newtypes with smart constructors.
//!
//! Item identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a chat item, unique within its section.
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Smart constructor: validates non-empty identifier
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidItemId::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ItemId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// One of the two independently scrolling stacks.
///
/// Serialized as its index (`0` or `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Section {
    /// Section 0: messages sent by the local user.
    Outgoing,
    /// Section 1: messages received from the other party.
    Incoming,
}

impl Section {
    /// Both sections in index order.
    pub const ALL: [Section; 2] = [Section::Outgoing, Section::Incoming];

    /// Raw section index.
    pub fn index(self) -> usize {
        match self {
            Section::Outgoing => 0,
            Section::Incoming => 1,
        }
    }

    /// The other section.
    pub fn other(self) -> Self {
        match self {
            Section::Outgoing => Section::Incoming,
            Section::Incoming => Section::Outgoing,
        }
    }
}

impl TryFrom<u8> for Section {
    type Error = InvalidSection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Section::Outgoing),
            1 => Ok(Section::Incoming),
            other => Err(InvalidSection(other)),
        }
    }
}

impl From<Section> for u8 {
    fn from(section: Section) -> Self {
        section.index() as u8
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Key of an item across both sections.
///
/// Item ids are only unique within a section, so every map produced by
/// the layout engine is keyed by `(section, id)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ItemKey {
    pub section: Section,
    pub id: ItemId,
}

impl ItemKey {
    pub fn new(section: Section, id: ItemId) -> Self {
        Self { section, id }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section, self.id)
    }
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItemId {
    #[error("Item ID cannot be empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Section must be 0 or 1 (got {0})")]
pub struct InvalidSection(pub u8);

// ===== Tests =====
