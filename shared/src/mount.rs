//! Visibility-gated, one-shot chart construction.
//!
//! Each mount point moves through `Watching -> Constructed` (or `Failed`
//! when the backend rejects the descriptor). Both end states are terminal
//! and release the visibility watch on entry.

use std::collections::BTreeMap;

use derive_more::{Add, Sum};
use tracing::{debug, info, trace, warn};

use crate::config::MountConfig;
use crate::descriptor::ChartDescriptor;
use crate::error::{DashboardError, DashboardResult};
use crate::viewport::normalize;

/// The page environment the mounter drives.
///
/// In the browser this is backed by `document`, `IntersectionObserver` and
/// Chart.js. Tests provide an in-memory fake.
pub trait MountHost {
    type Target;

    /// Looks up a mount point. `None` means the page does not include it.
    fn resolve(&self, target_id: &str) -> Option<Self::Target>;

    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Starts reporting visibility changes of `target` to
    /// [`LazyMounter::on_visibility`].
    fn watch(&mut self, target_id: &str, target: &Self::Target, threshold: f64);

    fn unwatch(&mut self, target_id: &str, target: &Self::Target);

    fn construct(&mut self, target: &Self::Target, descriptor: &ChartDescriptor)
        -> Result<(), String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    /// The mount point does not exist; nothing was registered.
    Skipped,
    Watching,
    /// The target already has a slot; the new descriptor was dropped.
    AlreadyRegistered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityOutcome {
    Constructed,
    BelowThreshold,
    /// The slot already reached a terminal state.
    Retired,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountState {
    Watching,
    Constructed,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Add, Sum)]
pub struct MountStats {
    pub watching: usize,
    pub constructed: usize,
    pub failed: usize,
}

enum Slot<T> {
    Watching {
        target: T,
        descriptor: ChartDescriptor,
    },
    Constructed,
    Failed,
}

impl<T> Slot<T> {
    fn state(&self) -> MountState {
        match self {
            Slot::Watching { .. } => MountState::Watching,
            Slot::Constructed => MountState::Constructed,
            Slot::Failed => MountState::Failed,
        }
    }

    fn stats(&self) -> MountStats {
        match self {
            Slot::Watching { .. } => MountStats {
                watching: 1,
                ..MountStats::default()
            },
            Slot::Constructed => MountStats {
                constructed: 1,
                ..MountStats::default()
            },
            Slot::Failed => MountStats {
                failed: 1,
                ..MountStats::default()
            },
        }
    }
}

pub struct LazyMounter<H: MountHost> {
    host: H,
    config: MountConfig,
    slots: BTreeMap<String, Slot<H::Target>>,
}

impl<H: MountHost> LazyMounter<H> {
    pub fn new(host: H, config: MountConfig) -> Self {
        Self {
            host,
            config,
            slots: BTreeMap::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &MountConfig {
        &self.config
    }

    /// Registers `descriptor` for `target_id` and starts watching it.
    pub fn mount(&mut self, target_id: &str, mut descriptor: ChartDescriptor) -> MountOutcome {
        if self.slots.contains_key(target_id) {
            debug!(target_id, "mount point already registered");
            return MountOutcome::AlreadyRegistered;
        }
        let Some(target) = self.host.resolve(target_id) else {
            debug!(target_id, "mount point not found, skipping");
            return MountOutcome::Skipped;
        };

        normalize(&mut descriptor, self.host.viewport_width(), &self.config);
        trace!(
            target_id,
            aspect_ratio = ?descriptor.options.aspect_ratio,
            "descriptor normalized"
        );

        self.slots.insert(
            target_id.to_owned(),
            Slot::Watching { target, descriptor },
        );
        if let Some(Slot::Watching { target, .. }) = self.slots.get(target_id) {
            self.host
                .watch(target_id, target, self.config.visibility_threshold);
        }
        MountOutcome::Watching
    }

    /// Host notification: `target_id` is now `fraction` visible.
    pub fn on_visibility(
        &mut self,
        target_id: &str,
        fraction: f64,
    ) -> DashboardResult<VisibilityOutcome> {
        let Some(slot) = self.slots.get_mut(target_id) else {
            trace!(target_id, "visibility change for unknown mount point");
            return Ok(VisibilityOutcome::Unknown);
        };
        if !matches!(slot, Slot::Watching { .. }) {
            trace!(target_id, "visibility change after construction");
            return Ok(VisibilityOutcome::Retired);
        }
        // NaN never crosses.
        if !(fraction >= self.config.visibility_threshold) {
            return Ok(VisibilityOutcome::BelowThreshold);
        }

        let Slot::Watching { target, descriptor } = std::mem::replace(slot, Slot::Constructed)
        else {
            return Ok(VisibilityOutcome::Retired);
        };
        let result = self.host.construct(&target, &descriptor);
        self.host.unwatch(target_id, &target);

        match result {
            Ok(()) => {
                info!(target_id, kind = ?descriptor.kind, fraction, "chart constructed");
                Ok(VisibilityOutcome::Constructed)
            }
            Err(reason) => {
                warn!(target_id, %reason, "chart construction failed");
                self.slots.insert(target_id.to_owned(), Slot::Failed);
                Err(DashboardError::Construction {
                    target_id: target_id.to_owned(),
                    reason,
                })
            }
        }
    }

    pub fn state(&self, target_id: &str) -> Option<MountState> {
        self.slots.get(target_id).map(Slot::state)
    }

    pub fn stats(&self) -> MountStats {
        self.slots.values().map(Slot::stats).sum()
    }
}
