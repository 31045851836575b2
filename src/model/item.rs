//! Stack items as seen by the layout core.

use super::identifiers::{ItemId, ItemKey, Section};
use serde::Serialize;

/// An item placed on one of the depth stacks.
///
/// Created and destroyed by the data source. The layout core only reads
/// the three fields once per pass and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackItem {
    id: ItemId,
    section: Section,
    /// Monotonic ordering key, e.g. a timestamp in seconds.
    sort_value: f64,
}

impl StackItem {
    pub fn new(id: ItemId, section: Section, sort_value: f64) -> Self {
        Self {
            id,
            section,
            sort_value,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn sort_value(&self) -> f64 {
        self.sort_value
    }

    /// Key of this item across both sections.
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.section, self.id.clone())
    }
}
