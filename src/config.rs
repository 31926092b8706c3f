//! Configuration for a redaction sweep
//! Created: 2026-10-14 09:48:03 UTC

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clipping::ClipperBridge;
use crate::error::{ConfigError, Result};

/// Tolerances and policies shared by every filter of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Stream filters whose output is not a plain bit-packed raster
    pub unsupported_direct_filters: Vec<String>,

    /// Multiplier from user space to the clipping engine's integer grid
    pub clipper_scale: f64,

    /// Maximum deviation of round joins and caps from the true arc
    pub arc_tolerance: f64,

    /// Flatness tolerance for Bezier approximation
    pub curve_tolerance: f64,

    /// Geometric comparison tolerance
    pub epsilon: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            unsupported_direct_filters: vec!["JBIG2Decode".into(), "DCTDecode".into(), "JPXDecode".into()],
            clipper_scale: 1e8,
            arc_tolerance: 0.0025,
            curve_tolerance: 0.025,
            epsilon: 1e-4,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("clipper_scale", self.clipper_scale),
            ("arc_tolerance", self.arc_tolerance),
            ("curve_tolerance", self.curve_tolerance),
            ("epsilon", self.epsilon),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!("{} must be positive and finite, got {}", name, value)).into());
            }
        }
        if self.unsupported_direct_filters.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Validation("Empty filter name".into()).into());
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SweepConfig = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "unsupported_direct_filters" => Some(self.unsupported_direct_filters.join(",")),
            "clipper_scale" => Some(self.clipper_scale.to_string()),
            "arc_tolerance" => Some(self.arc_tolerance.to_string()),
            "curve_tolerance" => Some(self.curve_tolerance.to_string()),
            "epsilon" => Some(self.epsilon.to_string()),
            _ => None,
        }
    }

    /// Overrides one setting from its textual form, as given on a command line
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let number = || {
            value
                .parse::<f64>()
                .map_err(|_| ConfigError::Validation(format!("Invalid number for {}: {}", key, value)))
        };
        match key {
            "unsupported_direct_filters" => {
                self.unsupported_direct_filters = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }
            "clipper_scale" => self.clipper_scale = number()?,
            "arc_tolerance" => self.arc_tolerance = number()?,
            "curve_tolerance" => self.curve_tolerance = number()?,
            "epsilon" => self.epsilon = number()?,
            _ => return Err(ConfigError::Validation(format!("Unknown key: {}", key)).into()),
        }
        Ok(())
    }

    pub fn bridge(&self) -> ClipperBridge {
        ClipperBridge::new(self.clipper_scale, self.curve_tolerance)
    }
}
