//! Per-item visual transforms

use super::layout_params::LayoutParams;
use super::types::{DepthPosition, Offset};
use super::z_range::ZRange;
use serde::Serialize;

/// Where an item sits relative to focus for one depth position.
///
/// The payload is the normalized offset: negative while receding into the
/// stack (`-1` is the far end), positive while arriving from the future
/// (`1` is one full item away).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "offset", rename_all = "snake_case")]
pub enum Placement {
    /// The depth position lies inside the item's z-range.
    Focused,
    /// The depth position has moved past the item's z-range. Offset in `[-1, 0]`.
    Receding(f64),
    /// The depth position has not reached the item's z-range yet. Offset in `(0, 1]`.
    Advancing(f64),
}

impl Placement {
    pub fn normalized_offset(&self) -> f64 {
        match self {
            Placement::Focused => 0.0,
            Placement::Receding(offset) | Placement::Advancing(offset) => *offset,
        }
    }

    pub fn is_focused(&self) -> bool {
        matches!(self, Placement::Focused)
    }
}

/// Visual state of one item for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualTransform {
    /// Offset of the item's center from its section's resting anchor.
    pub center_offset: Offset,
    /// Scale factor, `> 0` for every laid-out item.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Draw order within the section; higher is nearer the viewer.
    pub z_order: i32,
    pub placement: Placement,
}

impl VisualTransform {
    /// Identity transform of the in-focus item.
    pub fn focused(z_order: i32) -> Self {
        Self {
            center_offset: Offset::ZERO,
            scale: 1.0,
            opacity: 1.0,
            z_order,
            placement: Placement::Focused,
        }
    }

    pub fn normalized_offset(&self) -> f64 {
        self.placement.normalized_offset()
    }
}

/// Classify an item for `depth`, or `None` when it is out of view.
///
/// Receding items are visible for `stack_depth` item heights past their
/// range, arriving items for one item height before it. Offsets outside
/// `[-1, 1]` are discarded.
pub fn placement_for(range: &ZRange, depth: DepthPosition, params: &LayoutParams) -> Option<Placement> {
    let distance = range.signed_distance(depth);
    if distance.is_nan() {
        return None;
    }

    let placement = if range.contains(depth) {
        Placement::Focused
    } else if distance >= 0.0 {
        Placement::Receding(-distance / params.recede_distance())
    } else {
        Placement::Advancing(-distance / params.item_height())
    };

    let offset = placement.normalized_offset();
    (-1.0..=1.0).contains(&offset).then_some(placement)
}

/// Build the visual transform for a placement.
pub fn visual_transform(placement: Placement, z_order: i32, params: &LayoutParams) -> VisualTransform {
    match placement {
        Placement::Focused => VisualTransform::focused(z_order),
        Placement::Receding(offset) => {
            let t = offset.abs();
            VisualTransform {
                center_offset: Offset::vertical(params.spacing().lerp(t)),
                scale: params.scaling().lerp(t),
                opacity: params.alpha().lerp(t).clamp(0.0, 1.0),
                z_order,
                placement,
            }
        }
        Placement::Advancing(offset) => VisualTransform {
            center_offset: Offset::vertical(-offset * params.item_height()),
            scale: offset + 1.0,
            opacity: (1.0 - offset).clamp(0.0, 1.0),
            z_order,
            placement,
        },
    }
}

/// Transform of an item that is animating out after removal.
///
/// `progress` runs from 0 (just removed) to 1 (gone); scale and opacity
/// shrink linearly from the item's last drawn transform.
pub fn exit_transform(from: &VisualTransform, progress: f64) -> VisualTransform {
    let remaining = 1.0 - progress.clamp(0.0, 1.0);
    VisualTransform {
        scale: from.scale * remaining,
        opacity: from.opacity * remaining,
        ..*from
    }
}
