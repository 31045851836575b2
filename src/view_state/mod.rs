//! View-state layer - depth-stack layout, scrolling, and change reconciliation
//!
//! This module turns two ordered item sections into per-item visual
//! transforms for a given depth position.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (DepthPosition, Offset, ViewportDimensions)
//! - `interpolate`: KeyPoints and piecewise-linear interpolation
//! - `layout_params`: LayoutSettings (raw) and LayoutParams (validated)
//! - `timeline`: ItemSet snapshot and the merged chronological order
//! - `z_range`: ZRange - depth interval during which an item is in focus
//! - `transform`: Placement and VisualTransform
//! - `layout`: DepthStackLayout - the engine and its range cache
//! - `reconciler`: UpdateReconciler - invalidation and auto-advance flags
//! - `scroll`: ScrollPosition - semantic scroll position enum

pub mod interpolate;
pub mod layout;
pub mod layout_params;
pub mod reconciler;
pub mod scroll;
pub mod timeline;
pub mod transform;
pub mod types;
pub mod z_range;

pub use layout::{content_extent, snap_target, DepthStackLayout, LayoutPass, PassRow};
pub use layout_params::{ConfigurationError, LayoutParams, LayoutSettings, UiMode};
pub use reconciler::{Invalidation, LayoutChange, ReconcileFlags, UpdateReconciler};
pub use scroll::ScrollPosition;
pub use timeline::ItemSet;
pub use transform::{Placement, VisualTransform};
pub use types::{DepthPosition, Offset, ViewportDimensions};
pub use z_range::ZRange;
