//! Sort & partition: one shared timeline for both stacks.
//!
//! Items from both sections are merged into a single chronological order.
//! An item's focus position is its rank in that order times `item_height`,
//! so the two stacks share one depth axis even though they are drawn
//! independently.

use super::types::DepthPosition;
use crate::model::{ItemKey, Section, StackItem};
use crate::source::ItemSource;
use std::collections::HashSet;
use tracing::warn;

/// Snapshot of the item collection, read once per layout pass.
///
/// Items are kept per section in the order the data source reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    sections: [Vec<StackItem>; 2],
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `items(section)` for both sections from a data source.
    pub fn from_source<S: ItemSource + ?Sized>(source: &S) -> Self {
        Self {
            sections: [
                source.items(Section::Outgoing),
                source.items(Section::Incoming),
            ],
        }
    }

    /// Partition items by their own section assignment, preserving order.
    pub fn from_items(items: impl IntoIterator<Item = StackItem>) -> Self {
        let mut set = Self::default();
        for item in items {
            set.sections[item.section().index()].push(item);
        }
        set
    }

    /// Items of one section in source order.
    pub fn section(&self, section: Section) -> &[StackItem] {
        &self.sections[section.index()]
    }

    pub fn count(&self, section: Section) -> usize {
        self.sections[section.index()].len()
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// All items: section 0 in source order, then section 1.
    pub fn iter(&self) -> impl Iterator<Item = &StackItem> {
        self.sections.iter().flatten()
    }
}

/// One item placed on the shared timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub key: ItemKey,
    pub sort_value: f64,
    /// Index in the merged order.
    pub rank: usize,
    /// Index among the items of the same section in merged order.
    pub section_rank: usize,
    pub focus_position: DepthPosition,
}

/// Merged chronological order of both sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Focus position of the newest item overall.
    pub fn last_focus_position(&self) -> Option<DepthPosition> {
        self.entries.last().map(|entry| entry.focus_position)
    }

    /// Entries of one section, in merged order.
    pub fn section_entries(&self, section: Section) -> impl Iterator<Item = &TimelineEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.key.section == section)
    }
}

/// Merge both sections into one timeline and assign focus positions.
///
/// Sorting is stable and uses `f64::total_cmp`: equal sort values keep
/// input order (section 0 before section 1, then source order) and NaN
/// sorts after every number. A repeated key keeps its first occurrence.
pub fn merge_sections(items: &ItemSet, item_height: f64) -> Timeline {
    let mut seen = HashSet::new();
    let mut merged: Vec<&StackItem> = items
        .iter()
        .filter(|item| {
            let first = seen.insert(item.key());
            if !first {
                warn!(item = %item.key(), "duplicate item key in section; keeping first");
            }
            first
        })
        .collect();
    merged.sort_by(|a, b| a.sort_value().total_cmp(&b.sort_value()));

    let mut section_counts = [0usize; 2];
    let entries = merged
        .into_iter()
        .enumerate()
        .map(|(rank, item)| {
            let slot = &mut section_counts[item.section().index()];
            let section_rank = *slot;
            *slot += 1;
            TimelineEntry {
                key: item.key(),
                sort_value: item.sort_value(),
                rank,
                section_rank,
                focus_position: DepthPosition::new(rank as f64 * item_height),
            }
        })
        .collect();

    Timeline { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn item(id: &str, section: Section, sort_value: f64) -> StackItem {
        StackItem::new(ItemId::new(id).unwrap(), section, sort_value)
    }

    #[test]
    fn empty_set_produces_empty_timeline() {
        let timeline = merge_sections(&ItemSet::new(), 100.0);
        assert!(timeline.is_empty());
        assert_eq!(timeline.last_focus_position(), None);
    }

    #[test]
    fn repeated_key_keeps_first_occurrence() {
        let items = ItemSet::from_items([
            item("x", Section::Outgoing, 0.0),
            item("y", Section::Outgoing, 1.0),
            item("x", Section::Outgoing, 2.0),
        ]);
        let timeline = merge_sections(&items, 100.0);

        let placed: Vec<(&str, f64)> = timeline
            .entries()
            .iter()
            .map(|e| (e.key.id.as_str(), e.focus_position.get()))
            .collect();
        assert_eq!(placed, [("x", 0.0), ("y", 100.0)]);
    }

    #[test]
    fn interleaves_sections_by_sort_value() {
        let items = ItemSet::from_items([
            item("a0", Section::Outgoing, 0.0),
            item("a1", Section::Outgoing, 1.0),
            item("a2", Section::Outgoing, 2.0),
            item("b0", Section::Incoming, 0.5),
            item("b1", Section::Incoming, 1.5),
            item("b2", Section::Incoming, 2.5),
        ]);
        let timeline = merge_sections(&items, 100.0);

        let ids: Vec<&str> = timeline
            .entries()
            .iter()
            .map(|e| e.key.id.as_str())
            .collect();
        assert_eq!(ids, ["a0", "b0", "a1", "b1", "a2", "b2"]);

        let positions: Vec<f64> = timeline
            .entries()
            .iter()
            .map(|e| e.focus_position.get())
            .collect();
        assert_eq!(positions, [0.0, 100.0, 200.0, 300.0, 400.0, 500.0]);
    }

    #[test]
    fn section_rank_counts_within_section() {
        let items = ItemSet::from_items([
            item("a0", Section::Outgoing, 0.0),
            item("a1", Section::Outgoing, 1.0),
            item("b0", Section::Incoming, 0.5),
        ]);
        let timeline = merge_sections(&items, 10.0);
        let ranks: Vec<(usize, usize)> = timeline
            .entries()
            .iter()
            .map(|e| (e.rank, e.section_rank))
            .collect();
        assert_eq!(ranks, [(0, 0), (1, 0), (2, 1)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let items = ItemSet::from_items([
            item("b", Section::Incoming, 1.0),
            item("a", Section::Outgoing, 1.0),
            item("c", Section::Outgoing, 1.0),
        ]);
        let timeline = merge_sections(&items, 1.0);
        let ids: Vec<&str> = timeline
            .entries()
            .iter()
            .map(|e| e.key.id.as_str())
            .collect();
        // Section 0 is read first, then section 1.
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn unsorted_source_order_is_sorted() {
        let items = ItemSet::from_items([
            item("late", Section::Outgoing, 9.0),
            item("early", Section::Outgoing, 1.0),
        ]);
        let timeline = merge_sections(&items, 1.0);
        assert_eq!(timeline.entries()[0].key.id.as_str(), "early");
        assert_eq!(timeline.entries()[1].key.id.as_str(), "late");
    }

    #[test]
    fn nan_sorts_last() {
        let items = ItemSet::from_items([
            item("nan", Section::Outgoing, f64::NAN),
            item("one", Section::Outgoing, 1.0),
        ]);
        let timeline = merge_sections(&items, 1.0);
        assert_eq!(timeline.entries()[1].key.id.as_str(), "nan");
    }

    #[test]
    fn item_set_counts_per_section() {
        let items = ItemSet::from_items([
            item("a", Section::Outgoing, 0.0),
            item("b", Section::Incoming, 1.0),
            item("c", Section::Incoming, 2.0),
        ]);
        assert_eq!(items.count(Section::Outgoing), 1);
        assert_eq!(items.count(Section::Incoming), 2);
        assert_eq!(items.len(), 3);
        assert!(!items.is_empty());
    }
}
