//! Global layout parameters for the depth-stack engine.

use super::interpolate::{InvalidKeyPoints, KeyPoints};
use super::types::ViewportDimensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Interaction mode. Selects which spacing table is used for receded items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// Compact stack while reading.
    #[default]
    Read,
    /// Expanded stack while composing.
    Write,
}

impl UiMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            UiMode::Read => UiMode::Write,
            UiMode::Write => UiMode::Read,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UiMode::Read => "read",
            UiMode::Write => "write",
        }
    }
}

impl fmt::Display for UiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown ui mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ui mode '{0}' (expected 'read' or 'write')")]
pub struct UnknownUiMode(pub String);

impl FromStr for UiMode {
    type Err = UnknownUiMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(UiMode::Read),
            "write" => Ok(UiMode::Write),
            _ => Err(UnknownUiMode(s.to_string())),
        }
    }
}

/// Names the key-point table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPointTable {
    Scaling,
    Spacing,
    WriteSpacing,
    Alpha,
}

impl fmt::Display for KeyPointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyPointTable::Scaling => "scaling",
            KeyPointTable::Spacing => "spacing",
            KeyPointTable::WriteSpacing => "write spacing",
            KeyPointTable::Alpha => "alpha",
        })
    }
}

/// Invalid layout configuration. Fatal at configuration time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("item_height must be a positive finite number (got {0})")]
    InvalidItemHeight(f64),

    #[error("stack_depth must be at least 1 (got {0})")]
    InvalidStackDepth(u32),

    #[error("{table} key points: {source}")]
    InvalidKeyPoints {
        table: KeyPointTable,
        #[source]
        source: InvalidKeyPoints,
    },

    #[error("{table} key points have {actual} entries, expected {expected}")]
    MismatchedLength {
        table: KeyPointTable,
        expected: usize,
        actual: usize,
    },

    #[error("scaling key point {index} must be positive (got {value})")]
    NonPositiveScale { index: usize, value: f64 },

    #[error("alpha key point {index} must lie in [0, 1] (got {value})")]
    AlphaOutOfRange { index: usize, value: f64 },
}

/// Raw, unvalidated layout settings as they appear in configuration.
///
/// Convert with [`LayoutParams::new`] (or `TryFrom`) before handing them to
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub item_height: f64,
    pub stack_depth: u32,
    pub scaling_key_points: Vec<f64>,
    pub spacing_key_points: Vec<f64>,
    pub write_spacing_key_points: Vec<f64>,
    pub alpha_key_points: Vec<f64>,
    pub ui_mode: UiMode,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            item_height: 100.0,
            stack_depth: 3,
            scaling_key_points: vec![1.0, 0.92, 0.85, 0.8],
            spacing_key_points: vec![0.0, -30.0, -55.0, -75.0],
            write_spacing_key_points: vec![0.0, -45.0, -80.0, -110.0],
            alpha_key_points: vec![1.0, 0.7, 0.4, 0.0],
            ui_mode: UiMode::Read,
        }
    }
}

/// Validated parameters that drive every layout pass.
///
/// # Invariants
/// - `item_height` is finite and `> 0`
/// - `stack_depth >= 1`
/// - all key-point tables have the same length (>= 2) and finite entries
/// - scaling entries are `> 0`, alpha entries lie in `[0, 1]`
///
/// # Invalidation
/// None of these parameters affect focus positions or z-ranges except
/// `item_height`, which can only change by building a new engine. Changing
/// `ui_mode` or the viewport therefore never invalidates the range cache.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    item_height: f64,
    stack_depth: u32,
    scaling: KeyPoints,
    read_spacing: KeyPoints,
    write_spacing: KeyPoints,
    alpha: KeyPoints,
    ui_mode: UiMode,
    viewport: ViewportDimensions,
}

impl LayoutParams {
    /// Validate raw settings.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] for any violated invariant.
    pub fn new(settings: LayoutSettings) -> Result<Self, ConfigurationError> {
        if !settings.item_height.is_finite() || settings.item_height <= 0.0 {
            return Err(ConfigurationError::InvalidItemHeight(settings.item_height));
        }
        if settings.stack_depth < 1 {
            return Err(ConfigurationError::InvalidStackDepth(settings.stack_depth));
        }

        let scaling = table(KeyPointTable::Scaling, settings.scaling_key_points)?;
        let read_spacing = table(KeyPointTable::Spacing, settings.spacing_key_points)?;
        let write_spacing = table(KeyPointTable::WriteSpacing, settings.write_spacing_key_points)?;
        let alpha = table(KeyPointTable::Alpha, settings.alpha_key_points)?;

        let expected = scaling.len();
        for (name, points) in [
            (KeyPointTable::Spacing, &read_spacing),
            (KeyPointTable::WriteSpacing, &write_spacing),
            (KeyPointTable::Alpha, &alpha),
        ] {
            if points.len() != expected {
                return Err(ConfigurationError::MismatchedLength {
                    table: name,
                    expected,
                    actual: points.len(),
                });
            }
        }

        if let Some((index, &value)) = scaling.as_slice().iter().enumerate().find(|(_, v)| **v <= 0.0) {
            return Err(ConfigurationError::NonPositiveScale { index, value });
        }
        if let Some((index, &value)) = alpha
            .as_slice()
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(ConfigurationError::AlphaOutOfRange { index, value });
        }

        Ok(Self {
            item_height: settings.item_height,
            stack_depth: settings.stack_depth,
            scaling,
            read_spacing,
            write_spacing,
            alpha,
            ui_mode: settings.ui_mode,
            viewport: ViewportDimensions::default(),
        })
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn stack_depth(&self) -> u32 {
        self.stack_depth
    }

    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    pub fn scaling(&self) -> &KeyPoints {
        &self.scaling
    }

    pub fn alpha(&self) -> &KeyPoints {
        &self.alpha
    }

    /// Spacing table for the current ui mode.
    pub fn spacing(&self) -> &KeyPoints {
        match self.ui_mode {
            UiMode::Read => &self.read_spacing,
            UiMode::Write => &self.write_spacing,
        }
    }

    /// Depth distance over which a receding item fades out completely.
    pub fn recede_distance(&self) -> f64 {
        self.item_height * f64::from(self.stack_depth)
    }

    pub fn set_ui_mode(&mut self, mode: UiMode) {
        self.ui_mode = mode;
    }

    pub fn set_viewport(&mut self, viewport: ViewportDimensions) {
        self.viewport = viewport;
    }

    /// Builder-style viewport setter.
    pub fn with_viewport(mut self, viewport: ViewportDimensions) -> Self {
        self.viewport = viewport;
        self
    }

    /// Recover the raw settings (e.g. for `--dump`).
    pub fn settings(&self) -> LayoutSettings {
        LayoutSettings {
            item_height: self.item_height,
            stack_depth: self.stack_depth,
            scaling_key_points: self.scaling.as_slice().to_vec(),
            spacing_key_points: self.read_spacing.as_slice().to_vec(),
            write_spacing_key_points: self.write_spacing.as_slice().to_vec(),
            alpha_key_points: self.alpha.as_slice().to_vec(),
            ui_mode: self.ui_mode,
        }
    }
}

impl TryFrom<LayoutSettings> for LayoutParams {
    type Error = ConfigurationError;

    fn try_from(settings: LayoutSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}

fn table(name: KeyPointTable, points: Vec<f64>) -> Result<KeyPoints, ConfigurationError> {
    KeyPoints::new(points).map_err(|source| ConfigurationError::InvalidKeyPoints {
        table: name,
        source,
    })
}
