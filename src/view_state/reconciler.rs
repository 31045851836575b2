//! Update reconciler: decides what a collection change costs.
//!
//! Insert, delete, reorder and reset change focus positions and therefore
//! require the z-range cache to be rebuilt. Scroll, resize and ui-mode
//! changes only move the depth position or the presentation and reuse the
//! cache. The decisions are exposed as flags that the consumer takes at the
//! start of the next pass.

use super::layout::{DepthStackLayout, LayoutPass};
use super::transform::VisualTransform;
use super::types::DepthPosition;
use crate::model::{ItemKey, Section, StackItem};
use crate::source::StackChange;
use tracing::debug;

/// A change the layout may have to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutChange {
    Inserted(StackItem),
    Removed(ItemKey),
    /// Sort values changed without items being added or removed.
    Reordered,
    Reset,
    Scrolled,
    Resized,
    ModeChanged,
}

impl From<StackChange> for LayoutChange {
    fn from(change: StackChange) -> Self {
        match change {
            StackChange::Inserted(item) => LayoutChange::Inserted(item),
            StackChange::Removed(key) => LayoutChange::Removed(key),
            StackChange::Reordered => LayoutChange::Reordered,
            StackChange::Reset => LayoutChange::Reset,
        }
    }
}

/// Cost of a change for the layout cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// Cached ranges are still valid.
    Reuse,
    /// Focus positions and ranges must be recomputed.
    Recalculate,
}

/// Flags consumed at the start of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileFlags {
    pub should_recalculate_ranges: bool,
    pub should_scroll_to_newest: bool,
    /// The inserted item the view should advance to.
    pub advance_target: Option<ItemKey>,
}

/// An item that was visible when it was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitingItem {
    pub key: ItemKey,
    /// Transform from the last pass that drew the item.
    pub from: VisualTransform,
}

/// Tracks pending invalidation and auto-advance decisions between passes.
#[derive(Debug, Clone, Default)]
pub struct UpdateReconciler {
    recalculate: bool,
    advance_target: Option<ItemKey>,
    /// Newest sort value inserted per section since the last pass.
    pending_newest: [Option<f64>; 2],
    exiting: Vec<ExitingItem>,
}

impl UpdateReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change.
    ///
    /// `depth` is the current depth position, `layout` the engine whose cache
    /// still reflects the previous pass and `last_pass` the output of that
    /// pass (used to capture exit transforms).
    pub fn record(
        &mut self,
        change: &LayoutChange,
        depth: DepthPosition,
        layout: &DepthStackLayout,
        last_pass: Option<&LayoutPass>,
    ) -> Invalidation {
        match change {
            LayoutChange::Inserted(item) => self.on_inserted(item, depth, layout),
            LayoutChange::Removed(key) => self.on_removed(key, last_pass),
            LayoutChange::Reordered => self.mark_recalculate(),
            LayoutChange::Reset => {
                self.advance_target = None;
                self.pending_newest = [None; 2];
                self.exiting.clear();
                self.mark_recalculate()
            }
            LayoutChange::Scrolled | LayoutChange::Resized | LayoutChange::ModeChanged => {
                Invalidation::Reuse
            }
        }
    }

    fn mark_recalculate(&mut self) -> Invalidation {
        self.recalculate = true;
        Invalidation::Recalculate
    }

    /// An item was inserted.
    ///
    /// Auto-advance is requested when the item is newer than every known item
    /// of its section and the view currently rests within one item height of
    /// the previous newest item's focus position.
    pub fn on_inserted(
        &mut self,
        item: &StackItem,
        depth: DepthPosition,
        layout: &DepthStackLayout,
    ) -> Invalidation {
        let section = item.section();
        let previous = layout.state().and_then(|state| state.newest(section));
        let pending = self.pending_newest[section.index()];

        let newest_sort = match (previous.map(|p| p.sort_value), pending) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let is_newest = newest_sort.map_or(true, |newest| item.sort_value() > newest);

        if is_newest {
            self.pending_newest[section.index()] = Some(item.sort_value());
            if let Some(previous) = previous {
                let distance = (depth.get() - previous.focus_position.get()).abs();
                if distance <= layout.params().item_height() {
                    debug!(item = %item.key(), distance, "inserted newest item near focus; advancing");
                    self.advance_target = Some(item.key());
                } else {
                    self.clear_advance_in(section);
                }
            }
        }

        self.mark_recalculate()
    }

    /// An item was removed. Visible items are queued for an exit animation.
    pub fn on_removed(&mut self, key: &ItemKey, last_pass: Option<&LayoutPass>) -> Invalidation {
        if let Some(from) = last_pass.and_then(|pass| pass.get(key)) {
            self.exiting.push(ExitingItem {
                key: key.clone(),
                from: *from,
            });
        }
        if self.advance_target.as_ref() == Some(key) {
            self.advance_target = None;
        }
        self.mark_recalculate()
    }

    fn clear_advance_in(&mut self, section: Section) {
        if self
            .advance_target
            .as_ref()
            .is_some_and(|target| target.section == section)
        {
            self.advance_target = None;
        }
    }

    pub fn should_recalculate_ranges(&self) -> bool {
        self.recalculate
    }

    pub fn should_scroll_to_newest(&self) -> bool {
        self.advance_target.is_some()
    }

    /// Take and reset the pending flags. Call once at the start of each pass.
    pub fn take_flags(&mut self) -> ReconcileFlags {
        let advance_target = self.advance_target.take();
        let flags = ReconcileFlags {
            should_recalculate_ranges: std::mem::take(&mut self.recalculate),
            should_scroll_to_newest: advance_target.is_some(),
            advance_target,
        };
        self.pending_newest = [None; 2];
        flags
    }

    /// Items currently animating out.
    pub fn exiting(&self) -> &[ExitingItem] {
        &self.exiting
    }

    /// Take the queued exiting items, leaving none behind.
    pub fn take_exiting(&mut self) -> Vec<ExitingItem> {
        std::mem::take(&mut self.exiting)
    }
}
