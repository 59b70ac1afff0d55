//! Everything the results dashboard does that does not need a browser:
//! chart descriptors, the lazy mounter state machine, synthetic series and
//! the report content.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod mount;
pub mod report;
pub mod reveal;
pub mod series;
pub mod theme;
pub mod viewport;

pub use config::{DashboardConfig, MountConfig};
pub use descriptor::{ChartDescriptor, ChartKind};
pub use error::{DashboardError, DashboardResult};
pub use mount::{LazyMounter, MountHost, MountOutcome, MountState, MountStats, VisibilityOutcome};
pub use theme::Theme;
