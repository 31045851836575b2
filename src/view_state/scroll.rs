//! Semantic scroll position

use super::layout::DepthStackLayout;
use super::types::DepthPosition;
use crate::model::ItemKey;

/// Semantic scroll position along the depth axis.
///
/// A sum type that preserves scroll intent across layout changes:
/// - `Oldest`: the first item of the timeline is in focus
/// - `Newest`: follows the newest item as items arrive
/// - `AtItem`: keep a specific item in focus (survives relayout)
/// - `AtDepth`: a raw depth position, as left by free scrolling
///
/// # Clamping Behavior
/// Every variant resolves into `[0, max_depth]`, where `max_depth` is the
/// focus position of the newest item.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScrollPosition {
    Oldest,

    /// Resolves to the newest item's focus position.
    #[default]
    Newest,

    /// Resolves to the item's focus position. Falls back to `Newest` when
    /// the item is no longer cached.
    AtItem(ItemKey),

    AtDepth(DepthPosition),
}

impl ScrollPosition {
    /// Resolve to a depth position using the engine's cached focus positions.
    pub fn resolve(&self, layout: &DepthStackLayout) -> DepthPosition {
        let max = layout.max_depth().get();
        let depth = match self {
            ScrollPosition::Oldest => DepthPosition::ZERO,
            ScrollPosition::Newest => layout.max_depth(),
            ScrollPosition::AtItem(key) => layout.focus_position(key).unwrap_or(layout.max_depth()),
            ScrollPosition::AtDepth(depth) => *depth,
        };
        depth.clamp(0.0, max)
    }

    pub fn at_depth(depth: f64) -> Self {
        Self::AtDepth(DepthPosition::new(depth))
    }

    /// True when the position tracks the newest item.
    pub fn follows_newest(&self) -> bool {
        matches!(self, ScrollPosition::Newest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, Section, StackItem};
    use crate::view_state::layout_params::{LayoutParams, LayoutSettings};
    use crate::view_state::timeline::ItemSet;

    fn layout() -> DepthStackLayout {
        let mut layout = DepthStackLayout::new(LayoutParams::new(LayoutSettings::default()).unwrap());
        let items = ItemSet::from_items([
            StackItem::new(ItemId::new("a").unwrap(), Section::Outgoing, 1.0),
            StackItem::new(ItemId::new("b").unwrap(), Section::Incoming, 2.0),
            StackItem::new(ItemId::new("c").unwrap(), Section::Outgoing, 3.0),
        ]);
        layout.rebuild(&items);
        layout
    }

    fn key(section: Section, id: &str) -> ItemKey {
        ItemKey::new(section, ItemId::new(id).unwrap())
    }

    #[test]
    fn default_is_newest() {
        assert_eq!(ScrollPosition::default(), ScrollPosition::Newest);
        assert!(ScrollPosition::default().follows_newest());
    }

    mod resolve {
        use super::*;

        #[test]
        fn oldest_is_zero() {
            assert_eq!(ScrollPosition::Oldest.resolve(&layout()), DepthPosition::ZERO);
        }

        #[test]
        fn newest_is_last_focus_position() {
            assert_eq!(ScrollPosition::Newest.resolve(&layout()).get(), 200.0);
        }

        #[test]
        fn at_item_uses_focus_position() {
            let pos = ScrollPosition::AtItem(key(Section::Incoming, "b"));
            assert_eq!(pos.resolve(&layout()).get(), 100.0);
        }

        #[test]
        fn at_missing_item_falls_back_to_newest() {
            let pos = ScrollPosition::AtItem(key(Section::Incoming, "gone"));
            assert_eq!(pos.resolve(&layout()).get(), 200.0);
        }

        #[test]
        fn at_depth_is_clamped() {
            assert_eq!(ScrollPosition::at_depth(-50.0).resolve(&layout()).get(), 0.0);
            assert_eq!(ScrollPosition::at_depth(9_000.0).resolve(&layout()).get(), 200.0);
            assert_eq!(ScrollPosition::at_depth(150.0).resolve(&layout()).get(), 150.0);
        }

        #[test]
        fn uncached_layout_resolves_to_zero() {
            let layout = DepthStackLayout::new(LayoutParams::new(LayoutSettings::default()).unwrap());
            assert_eq!(ScrollPosition::Newest.resolve(&layout), DepthPosition::ZERO);
            assert_eq!(ScrollPosition::at_depth(10.0).resolve(&layout), DepthPosition::ZERO);
        }
    }
}
