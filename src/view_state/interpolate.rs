//! Piecewise-linear interpolation over key-point tables.
//!
//! A table of `N` key points describes a function on `[0, 1]` whose value at
//! `k / (N - 1)` is `points[k]`. Between two key points the function is linear.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a key-point table is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidKeyPoints {
    /// Fewer than two entries cannot describe a segment.
    #[error("need at least 2 key points (got {0})")]
    TooShort(usize),

    /// An entry is NaN or infinite.
    #[error("key point {index} is not finite ({value})")]
    NonFinite {
        /// Index of the offending entry.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// Validated key-point table: at least two finite entries.
///
/// The first entry is the value at full focus (`t = 0`), the last entry the
/// value at the far end of the stack (`t = 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct KeyPoints(Vec<f64>);

impl KeyPoints {
    /// Smart constructor.
    pub fn new(points: Vec<f64>) -> Result<Self, InvalidKeyPoints> {
        if points.len() < 2 {
            return Err(InvalidKeyPoints::TooShort(points.len()));
        }
        if let Some((index, &value)) = points.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InvalidKeyPoints::NonFinite { index, value });
        }
        Ok(Self(points))
    }

    /// Number of key points (always >= 2).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at `t = 0`.
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// Value at `t = 1`.
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Interpolate at `t`. See [`lerp`].
    pub fn lerp(&self, t: f64) -> f64 {
        lerp(t, &self.0)
    }
}

impl TryFrom<Vec<f64>> for KeyPoints {
    type Error = InvalidKeyPoints;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<KeyPoints> for Vec<f64> {
    fn from(points: KeyPoints) -> Self {
        points.0
    }
}

/// Piecewise-linear interpolation of `t` over `key_points`.
///
/// `t` is clamped to `[0, 1]` (NaN counts as 0). Endpoints return the first
/// and last key point exactly. An empty table yields `0.0` and a single-entry
/// table yields that entry.
pub fn lerp(t: f64, key_points: &[f64]) -> f64 {
    let n = key_points.len();
    match n {
        0 => return 0.0,
        1 => return key_points[0],
        _ => {}
    }

    if t.is_nan() || t <= 0.0 {
        return key_points[0];
    }
    if t >= 1.0 {
        return key_points[n - 1];
    }

    let segments = (n - 1) as f64;
    let scaled = t * segments;
    let index = (scaled.floor() as usize).min(n - 2);
    let fraction = scaled - index as f64;

    let from = key_points[index];
    let to = key_points[index + 1];
    from + (to - from) * fraction
}
