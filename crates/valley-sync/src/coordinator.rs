//! OptimisticCoordinator: drives a status change end to end.
//!
//! Per request: `Idle -> Applied -> Settled | RolledBack`.
//!
//! 1. The local transition (mirror + stats delta) is applied synchronously,
//!    before the first `.await`, so it is visible to any reader as soon as
//!    the request future is first polled.
//! 2. `update_item_status` is dispatched. Other requests and reads proceed
//!    while it is pending.
//! 3. On success the authoritative stats are fetched and replace local stats.
//!    Item data in the mirror is left as mutated.
//! 4. On any failure (update or stats fetch) everything is reloaded.
//!
//! Requests for the same item are neither deduplicated nor queued, and an
//! in-flight remote call is never cancelled. Reconciliations land in
//! completion order, so overlapping requests can leave the stats out of step
//! with the mirror until the next full reload.
//!
//! The state lock is only held inside [`SyncState::apply`] and the read
//! accessors; it is never held across a remote call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Instrument;

use valley_core::config::SyncConfig;
use valley_core::constants::span_names;
use valley_core::errors::{SyncError, ValleyError, ValleyResult};
use valley_core::models::{Bundle, ItemStatus, ProgressStats};
use valley_core::traits::IRemoteSyncClient;

use crate::aggregator;
use crate::mirror::MirrorSnapshot;
use crate::state::{Effect, LoadPhase, SyncEvent, SyncState, SyncView};

/// Lifecycle of a single status-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    Idle,
    /// Local mutation and stats delta applied, remote call pending.
    Applied,
    /// Remote accepted, authoritative stats installed.
    Settled,
    /// Remote path failed, full reload attempted.
    RolledBack,
}

/// Identifies one request in logs and outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTicket {
    pub seq: u64,
    pub item_id: String,
    /// `None` when the item was not in the mirror.
    pub old_status: Option<ItemStatus>,
    pub new_status: ItemStatus,
}

/// How a request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Settled {
        ticket: UpdateTicket,
        stats: ProgressStats,
    },
    RolledBack {
        ticket: UpdateTicket,
        reason: String,
        /// Whether the follow-up full reload succeeded.
        reloaded: bool,
    },
    /// Unknown item refused locally (`reject_unknown_items`); nothing sent.
    Refused { ticket: UpdateTicket },
}

impl UpdateOutcome {
    pub fn ticket(&self) -> &UpdateTicket {
        match self {
            Self::Settled { ticket, .. }
            | Self::RolledBack { ticket, .. }
            | Self::Refused { ticket } => ticket,
        }
    }

    pub fn phase(&self) -> UpdatePhase {
        match self {
            Self::Settled { .. } => UpdatePhase::Settled,
            Self::RolledBack { .. } => UpdatePhase::RolledBack,
            Self::Refused { .. } => UpdatePhase::Idle,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }
}

/// Owns the sync state and the remote client.
pub struct OptimisticCoordinator<C: IRemoteSyncClient> {
    client: C,
    config: SyncConfig,
    state: Mutex<SyncState>,
    next_seq: AtomicU64,
}

impl<C: IRemoteSyncClient> OptimisticCoordinator<C> {
    pub fn new(client: C, config: SyncConfig) -> Self {
        Self {
            client,
            config,
            state: Mutex::new(SyncState::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Initial full load. A failure leaves the state in
    /// [`LoadPhase::Failed`]; there is no retry.
    pub async fn load(&self) -> ValleyResult<()> {
        self.full_load("initial").await
    }

    /// Discard the current view of the world and fetch everything again.
    pub async fn reload(&self) -> ValleyResult<()> {
        self.full_load("reload").await
    }

    /// Change one item's status optimistically.
    ///
    /// Never returns an error: remote failures are absorbed into
    /// [`UpdateOutcome::RolledBack`] after the full reload.
    pub async fn set_item_status(&self, item_id: &str, status: ItemStatus) -> UpdateOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let span = tracing::info_span!(span_names::UPDATE, seq, item_id, status = %status);
        self.run_update(seq, item_id, status).instrument(span).await
    }

    async fn run_update(&self, seq: u64, item_id: &str, status: ItemStatus) -> UpdateOutcome {
        let effect = self.transition(SyncEvent::StatusChanged {
            item_id: item_id.to_string(),
            status,
        });
        let ticket = UpdateTicket {
            seq,
            item_id: item_id.to_string(),
            old_status: match effect {
                Effect::ItemChanged { old, .. } => Some(old),
                _ => None,
            },
            new_status: status,
        };

        if effect == Effect::UnknownItem {
            tracing::warn!(event = "unknown_item", "status change for item not in mirror");
            if self.config.reject_unknown_items {
                self.transition(SyncEvent::UpdateAbandoned);
                return UpdateOutcome::Refused { ticket };
            }
        } else {
            tracing::debug!(
                event = "update_applied",
                old = ?ticket.old_status,
                phase = ?UpdatePhase::Applied,
                "optimistic update applied"
            );
        }

        // Suspension point: the remote write.
        let result = match self.client.update_item_status(item_id, status).await {
            // Suspension point: authoritative stats.
            Ok(()) => self.client.fetch_progress_stats().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(stats) => {
                self.transition(SyncEvent::UpdateSettled { stats });
                tracing::debug!(
                    event = "update_settled",
                    delivered = stats.delivered_items,
                    phase = ?UpdatePhase::Settled,
                    "update reconciled"
                );
                UpdateOutcome::Settled { ticket, stats }
            }
            Err(e) => {
                tracing::warn!(
                    event = "update_rolled_back",
                    error = %e,
                    phase = ?UpdatePhase::RolledBack,
                    "update failed, reloading"
                );
                self.transition(SyncEvent::UpdateAbandoned);
                // Suspension point: the rollback reload.
                let reloaded = self.full_load("rollback").await.is_ok();
                UpdateOutcome::RolledBack {
                    ticket,
                    reason: e.to_string(),
                    reloaded,
                }
            }
        }
    }

    /// Strict variant of [`Self::set_item_status`] for callers that want a
    /// `Result`. The optimistic and rollback behavior is identical.
    pub async fn try_set_item_status(
        &self,
        item_id: &str,
        status: ItemStatus,
    ) -> ValleyResult<ProgressStats> {
        match self.set_item_status(item_id, status).await {
            UpdateOutcome::Settled { stats, .. } => Ok(stats),
            UpdateOutcome::RolledBack { reason, .. } => Err(SyncError::Rejected {
                item_id: item_id.to_string(),
                reason,
            }
            .into()),
            UpdateOutcome::Refused { .. } => Err(SyncError::UnknownItem {
                item_id: item_id.to_string(),
            }
            .into()),
        }
    }

    pub fn snapshot(&self) -> Arc<MirrorSnapshot> {
        self.lock().snapshot()
    }

    pub fn stats(&self) -> Option<ProgressStats> {
        self.lock().stats()
    }

    pub fn phase(&self) -> LoadPhase {
        self.lock().phase().clone()
    }

    pub fn view(&self) -> SyncView {
        self.lock().view()
    }

    /// Full recompute over the current mirror, ignoring local stats.
    pub fn recompute_stats(&self) -> ProgressStats {
        self.lock().recompute_stats()
    }

    /// Drop all local state and hand back the client.
    pub fn teardown(self) -> C {
        tracing::debug!("coordinator torn down");
        self.client
    }

    async fn full_load(&self, reason: &'static str) -> ValleyResult<()> {
        let span = tracing::info_span!(span_names::LOAD, reason);
        self.run_load(reason).instrument(span).await
    }

    async fn run_load(&self, reason: &'static str) -> ValleyResult<()> {
        self.transition(SyncEvent::LoadStarted);

        let (bundles, stats) = tokio::join!(
            self.client.fetch_all_bundles_with_items(),
            self.client.fetch_progress_stats(),
        );

        match bundles.and_then(|b| stats.map(|s| (b, s))) {
            Ok((bundles, stats)) => {
                if self.config.verify_after_reload {
                    verify_loaded(&bundles, &stats);
                }
                tracing::info!(
                    reason,
                    bundles = bundles.len(),
                    delivered = stats.delivered_items,
                    total = stats.total_items,
                    "full load complete"
                );
                self.transition(SyncEvent::Loaded { bundles, stats });
                Ok(())
            }
            Err(e) => {
                tracing::error!(reason, error = %e, "full load failed");
                self.transition(SyncEvent::LoadFailed {
                    reason: e.to_string(),
                });
                Err(ValleyError::from(SyncError::LoadFailed {
                    reason: e.to_string(),
                }))
            }
        }
    }

    fn transition(&self, event: SyncEvent) -> Effect {
        self.lock().apply(event)
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        // apply() cannot leave the state half-written, so a poisoned lock
        // still guards a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Warn when fetched stats disagree with a recompute of the fetched bundles.
fn verify_loaded(bundles: &[Bundle], stats: &ProgressStats) {
    let local = aggregator::full_recompute(bundles);
    if !local.same_item_counters(stats) || local.bundles_completed != stats.bundles_completed {
        tracing::warn!(
            remote_delivered = stats.delivered_items,
            local_delivered = local.delivered_items,
            remote_completed = stats.bundles_completed,
            local_completed = local.bundles_completed,
            "fetched stats disagree with fetched bundles"
        );
    }
}
