//! Region filter: the per-request entry point of the redaction engine
//!
//! A `RegionFilter` holds one set of removal regions in page space together
//! with the sweep configuration. Text, path and image filtering live in
//! their own files as further `impl RegionFilter` blocks. The filter holds
//! no mutable state, so one instance may be shared across threads.

pub mod image_filter;
pub mod path_filter;
pub mod text_filter;

use tracing::{debug, warn};

use crate::clipping::ClipperBridge;
use crate::config::SweepConfig;
use crate::error::Result;
use crate::geometry::{Quad, Rectangle};
use crate::intersection::intersects_any;

/// Removal regions plus the configuration they are applied with
#[derive(Debug, Clone)]
pub struct RegionFilter {
    regions: Vec<Rectangle>,
    region_quads: Vec<Quad>,
    config: SweepConfig,
    bridge: ClipperBridge,
}

impl RegionFilter {
    pub fn new(regions: Vec<Rectangle>, config: SweepConfig) -> Result<Self> {
        config.validate()?;
        for region in &regions {
            region.validate()?;
        }
        if regions.is_empty() {
            warn!("Region filter created without regions; nothing will be redacted");
        }
        debug!("Region filter with {} regions", regions.len());

        Ok(Self {
            region_quads: regions.iter().map(Rectangle::to_quad).collect(),
            bridge: config.bridge(),
            regions,
            config,
        })
    }

    pub fn regions(&self) -> &[Rectangle] {
        &self.regions
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// True when `content` meets any region
    pub fn intersects(&self, content: &Quad) -> bool {
        intersects_any(content, &self.region_quads, &self.bridge, self.config.epsilon)
    }
}
