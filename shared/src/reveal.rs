//! Scroll reveal settings for decorative page elements.
//!
//! Elements carrying one of the reveal classes get `class_name` added once
//! they scroll into view. The browser side owns the observer; this module
//! only describes what to watch.

use const_format::concatcp;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

pub const FADE_IN: &str = "fade-in";
pub const REVEAL_UP: &str = "reveal-up";
pub const SCALE_IN: &str = "scale-in";
pub const VISIBLE: &str = "visible";

/// Default selector list as a single CSS query.
pub const DEFAULT_QUERY: &str = concatcp!(".", FADE_IN, ", .", REVEAL_UP, ", .", SCALE_IN);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    /// CSS margin applied to the viewport when computing intersection.
    pub root_margin: String,
    pub selectors: Vec<String>,
    pub class_name: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -20px 0px".to_owned(),
            selectors: [FADE_IN, REVEAL_UP, SCALE_IN]
                .iter()
                .map(|class| format!(".{class}"))
                .collect(),
            class_name: VISIBLE.to_owned(),
        }
    }
}

impl RevealConfig {
    pub fn query(&self) -> String {
        self.selectors.join(", ")
    }

    /// Rejects values the browser would refuse when building the observer.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.selectors.is_empty() || self.selectors.iter().any(|s| s.trim().is_empty()) {
            return Err(DashboardError::InvalidConfig(
                "reveal.selectors must be a non-empty list of non-blank selectors".to_owned(),
            ));
        }
        if self.class_name.trim().is_empty() || self.class_name.contains(char::is_whitespace) {
            return Err(DashboardError::InvalidConfig(format!(
                "reveal.class_name must be a single class, got {:?}",
                self.class_name
            )));
        }
        if !is_root_margin(&self.root_margin) {
            return Err(DashboardError::InvalidConfig(format!(
                "reveal.root_margin must be 1 to 4 px or % lengths, got {:?}",
                self.root_margin
            )));
        }
        Ok(())
    }
}

/// `IntersectionObserver` root margin: one to four `px`/`%` lengths, or `0`.
fn is_root_margin(margin: &str) -> bool {
    let parts = margin.split_whitespace().collect::<Vec<_>>();
    (1..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            let number = part
                .strip_suffix("px")
                .or_else(|| part.strip_suffix('%'))
                .unwrap_or(if *part == "0" { *part } else { "" });
            number.parse::<f64>().is_ok_and(f64::is_finite)
        })
}
