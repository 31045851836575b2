//! Depth-stack layout engine.
//!
//! Lays out both sections as receding stacks along the depth axis. Focus
//! positions and z-ranges are the expensive part and live in a cache
//! ([`LayoutState`]) that survives scroll, resize and ui-mode changes. The
//! cache is rebuilt only after it has been invalidated (collection change)
//! or when a pass is requested before any cache exists.

use super::layout_params::{LayoutParams, UiMode};
use super::timeline::{merge_sections, ItemSet};
use super::transform::{placement_for, visual_transform, VisualTransform};
use super::types::{DepthPosition, ViewportDimensions};
use super::z_range::{compute_z_ranges, ZRange};
use crate::model::{ItemId, ItemKey, Section};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Cached per-item layout data.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedItem {
    pub key: ItemKey,
    pub sort_value: f64,
    pub focus_position: DepthPosition,
    pub z_range: ZRange,
    /// Rank within the item's own section; used as z-order.
    pub section_rank: usize,
}

/// Process-held cache of focus positions and z-ranges.
///
/// # Invariants
/// - `items` is in merged chronological order
/// - `index[key]` is the position of `key` in `items`
/// - `section_counts[s]` is the number of cached items in section `s`
/// - `source` lists the item set the cache was built from, in set order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    items: Vec<CachedItem>,
    index: HashMap<ItemKey, usize>,
    section_counts: [usize; 2],
    source: Vec<(Section, ItemId, u64)>,
}

impl LayoutState {
    /// Run sort & partition and the z-range calculator over `items`.
    pub fn build(items: &ItemSet, item_height: f64) -> Self {
        let timeline = merge_sections(items, item_height);
        let ranges = compute_z_ranges(&timeline, item_height);

        let mut state = Self {
            source: items
                .iter()
                .map(|item| (item.section(), item.id().clone(), item.sort_value().to_bits()))
                .collect(),
            ..Self::default()
        };
        for (entry, z_range) in timeline.entries().iter().zip(ranges) {
            state.index.insert(entry.key.clone(), state.items.len());
            state.section_counts[entry.key.section.index()] += 1;
            state.items.push(CachedItem {
                key: entry.key.clone(),
                sort_value: entry.sort_value,
                focus_position: entry.focus_position,
                z_range,
                section_rank: entry.section_rank,
            });
        }
        state
    }

    /// True when the cache was built from exactly these items and sort values.
    pub fn matches(&self, items: &ItemSet) -> bool {
        self.source.len() == items.len()
            && self
                .source
                .iter()
                .zip(items.iter())
                .all(|((section, id, bits), item)| {
                    *section == item.section()
                        && id == item.id()
                        && *bits == item.sort_value().to_bits()
                })
    }

    pub fn get(&self, key: &ItemKey) -> Option<&CachedItem> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    pub fn items(&self) -> &[CachedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, section: Section) -> usize {
        self.section_counts[section.index()]
    }

    /// Newest cached item of a section.
    pub fn newest(&self, section: Section) -> Option<&CachedItem> {
        self.items.iter().rev().find(|item| item.key.section == section)
    }

    /// Focus position of the newest item overall.
    pub fn last_focus_position(&self) -> Option<DepthPosition> {
        self.items.last().map(|item| item.focus_position)
    }
}

/// One visible item of a pass, flattened for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassRow<'a> {
    pub section: Section,
    pub id: &'a ItemId,
    pub focused: bool,
    #[serde(flatten)]
    pub transform: &'a VisualTransform,
}

/// Output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPass {
    pub depth: DepthPosition,
    pub transforms: BTreeMap<ItemKey, VisualTransform>,
    pub focused: BTreeMap<Section, ItemId>,
}

impl LayoutPass {
    pub fn get(&self, key: &ItemKey) -> Option<&VisualTransform> {
        self.transforms.get(key)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// The in-focus item of a section, if any.
    pub fn focused_item(&self, section: Section) -> Option<&ItemId> {
        self.focused.get(&section)
    }

    /// Every visible item, section 0 first, farthest first within a section.
    pub fn rows(&self) -> Vec<PassRow<'_>> {
        Section::ALL
            .iter()
            .flat_map(|&section| self.draw_order(section))
            .map(|(key, transform)| PassRow {
                section: key.section,
                id: &key.id,
                focused: transform.placement.is_focused(),
                transform,
            })
            .collect()
    }

    /// Visible items of one section, farthest first.
    pub fn draw_order(&self, section: Section) -> Vec<(&ItemKey, &VisualTransform)> {
        let mut visible: Vec<_> = self
            .transforms
            .iter()
            .filter(|(key, _)| key.section == section)
            .collect();
        visible.sort_by_key(|(_, transform)| transform.z_order);
        visible
    }
}

/// The depth-stack layout engine.
///
/// Exclusively owns its [`LayoutState`]; callers serialize passes through
/// `&mut self`.
#[derive(Debug, Clone)]
pub struct DepthStackLayout {
    params: LayoutParams,
    state: Option<LayoutState>,
}

impl DepthStackLayout {
    /// Create an engine. `params` are already validated.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            state: None,
        }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Switch spacing tables. Cached ranges stay valid.
    pub fn set_ui_mode(&mut self, mode: UiMode) {
        self.params.set_ui_mode(mode);
    }

    /// Update viewport bounds. Cached ranges stay valid.
    pub fn set_viewport(&mut self, viewport: ViewportDimensions) {
        self.params.set_viewport(viewport);
    }

    /// Drop cached ranges; the next pass rebuilds them.
    pub fn invalidate(&mut self) {
        self.state = None;
    }

    pub fn is_cached(&self) -> bool {
        self.state.is_some()
    }

    /// Cached layout data, if any pass has run since the last invalidation.
    pub fn state(&self) -> Option<&LayoutState> {
        self.state.as_ref()
    }

    /// Rebuild focus positions and z-ranges from `items`.
    pub fn rebuild(&mut self, items: &ItemSet) -> &LayoutState {
        let state = LayoutState::build(items, self.params.item_height());
        debug!(
            items = state.len(),
            outgoing = state.count(Section::Outgoing),
            incoming = state.count(Section::Incoming),
            "rebuilt depth-stack layout cache"
        );
        self.state.insert(state)
    }

    /// Compute visual transforms for every visible item at `depth`.
    ///
    /// Reuses cached ranges when they were built from `items`. Without a
    /// cache, or with one built from a different item set, the pass first
    /// performs a full recomputation.
    pub fn compute_layout(&mut self, depth: DepthPosition, items: &ItemSet) -> LayoutPass {
        match self.state.as_ref().map(|state| state.matches(items)) {
            None => {
                debug!("layout requested without cached ranges; recomputing");
                self.rebuild(items);
            }
            Some(false) => {
                debug!("cached ranges are stale for this item set; recomputing");
                self.rebuild(items);
            }
            Some(true) => {}
        }
        let Some(state) = self.state.as_ref() else {
            return LayoutPass::default();
        };

        let mut pass = LayoutPass {
            depth,
            ..LayoutPass::default()
        };
        for item in state.items() {
            let Some(placement) = placement_for(&item.z_range, depth, &self.params) else {
                continue;
            };
            let z_order = i32::try_from(item.section_rank).unwrap_or(i32::MAX);
            if placement.is_focused() {
                pass.focused.insert(item.key.section, item.key.id.clone());
            }
            pass.transforms
                .insert(item.key.clone(), visual_transform(placement, z_order, &self.params));
        }
        pass
    }

    /// Transform of a single cached item at `depth`.
    ///
    /// `None` when the item is unknown to the cache (already removed) or out of view.
    pub fn transform_for(&self, key: &ItemKey, depth: DepthPosition) -> Option<VisualTransform> {
        let item = self.state.as_ref()?.get(key)?;
        let placement = placement_for(&item.z_range, depth, &self.params)?;
        let z_order = i32::try_from(item.section_rank).unwrap_or(i32::MAX);
        Some(visual_transform(placement, z_order, &self.params))
    }

    /// Cached focus position of an item.
    pub fn focus_position(&self, key: &ItemKey) -> Option<DepthPosition> {
        self.state.as_ref()?.get(key).map(|item| item.focus_position)
    }

    /// Cached z-range of an item.
    pub fn z_range(&self, key: &ItemKey) -> Option<ZRange> {
        self.state.as_ref()?.get(key).map(|item| item.z_range)
    }

    /// Largest depth a scroll should settle on: the newest item's focus position.
    pub fn max_depth(&self) -> DepthPosition {
        self.state
            .as_ref()
            .and_then(LayoutState::last_focus_position)
            .unwrap_or(DepthPosition::ZERO)
    }

    pub fn content_extent(&self, items: &ItemSet) -> f64 {
        content_extent(items, &self.params)
    }

    pub fn snap_target(&self, proposed: DepthPosition) -> DepthPosition {
        DepthPosition::new(snap_target(proposed.get(), &self.params))
    }
}

/// Scrollable extent of the stack:
/// `(max(count0, count1) - 1) * item_height + viewport_height`, never negative.
pub fn content_extent(items: &ItemSet, params: &LayoutParams) -> f64 {
    let deepest = Section::ALL
        .iter()
        .map(|&section| items.count(section))
        .max()
        .unwrap_or(0);
    let stacked = deepest.saturating_sub(1) as f64 * params.item_height();
    stacked + params.viewport().height
}

/// Nearest resting depth for a proposed depth: the nearest multiple of
/// `item_height`, never below zero.
pub fn snap_target(proposed: f64, params: &LayoutParams) -> f64 {
    let height = params.item_height();
    let steps = (proposed / height).round();
    if !steps.is_finite() || steps <= 0.0 {
        return 0.0;
    }
    steps * height
}

/// The in-focus item of each section in a computed pass.
pub fn focused_item_per_section(pass: &LayoutPass) -> BTreeMap<Section, ItemId> {
    pass.focused.clone()
}
