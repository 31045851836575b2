//! Core view-state newtypes

use serde::Serialize;

/// Scalar position along the depth axis.
///
/// Used both for the externally driven scroll position and for the derived
/// focus position of each item. Usually non-negative, but a drag may move it
/// transiently below zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct DepthPosition(f64);

impl DepthPosition {
    pub const ZERO: Self = Self(0.0);

    /// Create a new DepthPosition from a raw value.
    pub fn new(position: f64) -> Self {
        Self(position)
    }

    /// Get the raw value.
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Move by a signed amount.
    pub fn offset_by(&self, delta: f64) -> Self {
        Self(self.0 + delta)
    }

    /// Clamp into `[min, max]`.
    pub fn clamp(&self, min: f64, max: f64) -> Self {
        Self(self.0.max(min).min(max.max(min)))
    }
}

impl From<f64> for DepthPosition {
    fn from(position: f64) -> Self {
        Self(position)
    }
}

/// 2D offset of an item's center relative to its section's resting anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pure vertical shift.
    pub fn vertical(y: f64) -> Self {
        Self { x: 0.0, y }
    }
}

/// Viewport dimensions in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewportDimensions {
    /// Width in layout units.
    pub width: f64,
    /// Height in layout units.
    pub height: f64,
}

impl ViewportDimensions {
    /// Create new viewport dimensions. Negative or NaN sizes collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
