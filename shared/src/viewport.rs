use serde::{Deserialize, Serialize};

use crate::config::MountConfig;
use crate::descriptor::{ChartDescriptor, ChartKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    /// A width equal to the breakpoint is still narrow.
    pub fn classify(width: f64, narrow_breakpoint: f64) -> Self {
        if width <= narrow_breakpoint {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectRatios {
    pub narrow_rectangular: f64,
    pub narrow_radial: f64,
    pub wide_rectangular: f64,
    pub wide_radial: f64,
}

impl Default for AspectRatios {
    fn default() -> Self {
        Self {
            narrow_rectangular: 1.2,
            narrow_radial: 1.1,
            wide_rectangular: 2.0,
            wide_radial: 1.5,
        }
    }
}

impl AspectRatios {
    pub fn resolve(&self, class: ViewportClass, kind: ChartKind) -> f64 {
        match (class, kind.is_radial()) {
            (ViewportClass::Narrow, true) => self.narrow_radial,
            (ViewportClass::Narrow, false) => self.narrow_rectangular,
            (ViewportClass::Wide, true) => self.wide_radial,
            (ViewportClass::Wide, false) => self.wide_rectangular,
        }
    }
}

/// Forces responsive sizing and picks the aspect ratio for the current
/// viewport width.
pub fn normalize(descriptor: &mut ChartDescriptor, viewport_width: f64, config: &MountConfig) {
    let class = ViewportClass::classify(viewport_width, config.narrow_breakpoint);
    let options = &mut descriptor.options;
    options.responsive = true;
    options.maintain_aspect_ratio = true;
    options.aspect_ratio = Some(config.aspect.resolve(class, descriptor.kind));
}
