//! Compiler settings.
//!
//! Every field has a default, and `#[serde(default)]` lets a JSON config
//! file override only the fields it names.

use brush_types::StrokeError;
use serde::{Deserialize, Serialize};

/// Path length one dip of paint lasts for, in device units.
pub const DEFAULT_MAX_CONTINUOUS_LENGTH: f64 = 6000.0;
/// Height at which the tool travels without touching the surface.
pub const DEFAULT_CLEARANCE_Z: i16 = 2500;
/// Height at which the brush touches the surface and paints.
pub const DEFAULT_CONTACT_Z: i16 = 1600;

/// Stroke segmentation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Path length after which a reload is mandatory.
    pub max_continuous_length: f64,
    pub clearance_z: i16,
    pub contact_z: i16,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            max_continuous_length: DEFAULT_MAX_CONTINUOUS_LENGTH,
            clearance_z: DEFAULT_CLEARANCE_Z,
            contact_z: DEFAULT_CONTACT_Z,
        }
    }
}

impl StrokeConfig {
    pub fn with_max_continuous_length(mut self, length: f64) -> Self {
        self.max_continuous_length = length;
        self
    }

    pub fn with_clearance_z(mut self, z: i16) -> Self {
        self.clearance_z = z;
        self
    }

    pub fn with_contact_z(mut self, z: i16) -> Self {
        self.contact_z = z;
        self
    }

    /// Reject settings the segmenter cannot work with.
    pub fn validate(&self) -> brush_types::Result<()> {
        if !self.max_continuous_length.is_finite() || self.max_continuous_length <= 0.0 {
            return Err(StrokeError::InvalidConfig(format!(
                "max_continuous_length must be a positive number, got {}",
                self.max_continuous_length
            )));
        }
        if self.contact_z >= self.clearance_z {
            return Err(StrokeError::InvalidConfig(format!(
                "contact_z ({}) must be below clearance_z ({})",
                self.contact_z, self.clearance_z
            )));
        }
        Ok(())
    }
}

/// Settings for a whole compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub stroke: StrokeConfig,
    /// Outlines shorter than this are dropped before segmentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_outline_length: Option<f64>,
    /// Subdivide edges that alone reach `max_continuous_length`, so that
    /// every stroke stays within one dip of paint.
    pub split_long_edges: bool,
}

impl CompileOptions {
    pub fn new(stroke: StrokeConfig) -> Self {
        Self {
            stroke,
            min_outline_length: None,
            split_long_edges: false,
        }
    }

    pub fn with_min_outline_length(mut self, length: f64) -> Self {
        self.min_outline_length = Some(length);
        self
    }

    pub fn with_split_long_edges(mut self, split: bool) -> Self {
        self.split_long_edges = split;
        self
    }

    /// Read options from a JSON document.
    pub fn from_json(json: &str) -> brush_types::Result<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| StrokeError::MalformedInput(format!("config: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> brush_types::Result<()> {
        self.stroke.validate()?;
        if let Some(min) = self.min_outline_length {
            if !min.is_finite() || min < 0.0 {
                return Err(StrokeError::InvalidConfig(format!(
                    "min_outline_length must be a non-negative number, got {min}"
                )));
            }
        }
        Ok(())
    }
}
