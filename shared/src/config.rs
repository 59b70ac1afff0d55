//! Page configuration.
//!
//! Every field has a default, so an absent or partial JSON document is
//! fine. The frontend reads the document from a JSON script element.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::reveal::RevealConfig;
use crate::viewport::AspectRatios;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// `tracing` filter directive, e.g. `info` or `shared=debug`.
    pub log_level: String,
    /// Seed for the synthetic series. `None` draws from entropy.
    pub seed: Option<u64>,
    pub mount: MountConfig,
    pub reveal: RevealConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            seed: None,
            mount: MountConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Visible fraction of a mount point needed before its chart is built.
    pub visibility_threshold: f64,
    /// Viewports at most this wide (CSS pixels) count as narrow.
    pub narrow_breakpoint: f64,
    pub aspect: AspectRatios,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.05,
            narrow_breakpoint: 768.0,
            aspect: AspectRatios::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        check_fraction("mount.visibility_threshold", self.mount.visibility_threshold)?;
        check_fraction("reveal.threshold", self.reveal.threshold)?;
        check_positive("mount.narrow_breakpoint", self.mount.narrow_breakpoint)?;

        let aspect = &self.mount.aspect;
        check_positive("mount.aspect.narrow_rectangular", aspect.narrow_rectangular)?;
        check_positive("mount.aspect.narrow_radial", aspect.narrow_radial)?;
        check_positive("mount.aspect.wide_rectangular", aspect.wide_rectangular)?;
        check_positive("mount.aspect.wide_radial", aspect.wide_radial)?;

        self.reveal.validate()
    }
}

fn check_fraction(name: &str, value: f64) -> DashboardResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(DashboardError::InvalidConfig(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}

fn check_positive(name: &str, value: f64) -> DashboardResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DashboardError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
