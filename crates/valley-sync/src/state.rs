//! The owned sync state and its transition function.
//!
//! [`SyncState::apply`] is the only way the mirror or the statistics change.
//! It is synchronous and never suspends; the coordinator calls it around
//! the remote calls.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use valley_core::models::{Bundle, ItemStatus, ProgressStats};

use crate::aggregator;
use crate::mirror::{MirrorSnapshot, MirrorStore};

/// Whether the state currently reflects a completed full load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// A full load is in flight (initial load or rollback reload).
    Loading,
    /// The last full load succeeded.
    Ready,
    /// The last full load failed. Whatever was mirrored before stays
    /// visible but is not authoritative.
    Failed { reason: String },
}

/// Inputs to [`SyncState::apply`].
#[derive(Debug, Clone)]
pub enum SyncEvent {
    LoadStarted,
    Loaded {
        bundles: Vec<Bundle>,
        stats: ProgressStats,
    },
    LoadFailed {
        reason: String,
    },
    /// A user-initiated status change, applied optimistically.
    StatusChanged {
        item_id: String,
        status: ItemStatus,
    },
    /// A remote update was acknowledged; statistics are authoritative again.
    UpdateSettled {
        stats: ProgressStats,
    },
    /// A remote update (or its follow-up stats fetch) failed.
    UpdateAbandoned,
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The item moved from `old` to `new` locally, stats delta applied.
    ItemChanged { old: ItemStatus, new: ItemStatus },
    /// The item is not in the mirror; nothing was changed.
    UnknownItem,
}

/// Mirror, statistics and bookkeeping, owned by one coordinator.
#[derive(Debug)]
pub struct SyncState {
    mirror: MirrorStore,
    stats: Option<ProgressStats>,
    phase: LoadPhase,
    /// Status changes applied locally whose remote call has not resolved.
    in_flight: usize,
    /// Bumped on every transition that replaces the mirror or the stats.
    generation: u64,
    last_reconciled_at: Option<DateTime<Utc>>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            mirror: MirrorStore::new(),
            stats: None,
            phase: LoadPhase::Loading,
            in_flight: 0,
            generation: 0,
            last_reconciled_at: None,
        }
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    pub fn apply(&mut self, event: SyncEvent) -> Effect {
        match event {
            SyncEvent::LoadStarted => {
                self.phase = LoadPhase::Loading;
                Effect::None
            }
            SyncEvent::Loaded { bundles, stats } => {
                self.mirror.replace_all(bundles);
                self.stats = Some(stats);
                self.phase = LoadPhase::Ready;
                self.last_reconciled_at = Some(Utc::now());
                self.generation += 1;
                Effect::None
            }
            SyncEvent::LoadFailed { reason } => {
                self.phase = LoadPhase::Failed { reason };
                Effect::None
            }
            SyncEvent::StatusChanged { item_id, status } => {
                // Read the prior status before mutating: the mirror's own
                // sentinel cannot tell an unknown id from a missing item.
                let Some(old) = self.mirror.status_of(&item_id) else {
                    self.in_flight += 1;
                    return Effect::UnknownItem;
                };
                let replaced = self.mirror.mutate_item_status(&item_id, status);
                debug_assert_eq!(replaced, old);
                self.stats = self
                    .stats
                    .map(|stats| aggregator::apply_delta(&stats, old, status));
                self.in_flight += 1;
                self.generation += 1;
                Effect::ItemChanged { old, new: status }
            }
            SyncEvent::UpdateSettled { stats } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.stats = Some(stats);
                self.last_reconciled_at = Some(Utc::now());
                self.generation += 1;
                Effect::None
            }
            SyncEvent::UpdateAbandoned => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Effect::None
            }
        }
    }

    pub fn snapshot(&self) -> Arc<MirrorSnapshot> {
        self.mirror.snapshot()
    }

    pub fn stats(&self) -> Option<ProgressStats> {
        self.stats
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Statistics recomputed from the mirror alone, including a fresh
    /// `bundles_completed`.
    pub fn recompute_stats(&self) -> ProgressStats {
        aggregator::full_recompute(self.mirror.snapshot().bundles())
    }

    /// A cloned, read-only view for rendering or health checks.
    pub fn view(&self) -> SyncView {
        SyncView {
            snapshot: self.mirror.snapshot(),
            stats: self.stats,
            phase: self.phase.clone(),
            in_flight: self.in_flight,
            generation: self.generation,
            last_reconciled_at: self.last_reconciled_at,
        }
    }
}

/// Point-in-time copy of [`SyncState`] for read-only consumers.
#[derive(Debug, Clone)]
pub struct SyncView {
    pub snapshot: Arc<MirrorSnapshot>,
    pub stats: Option<ProgressStats>,
    pub phase: LoadPhase,
    pub in_flight: usize,
    pub generation: u64,
    pub last_reconciled_at: Option<DateTime<Utc>>,
}

impl SyncView {
    /// `bundles_completed` may lag while updates are in flight or after a
    /// failed load.
    pub fn is_authoritative(&self) -> bool {
        self.phase == LoadPhase::Ready && self.in_flight == 0
    }
}
