//! Aggregate health report generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use valley_core::models::ProgressStats;
use valley_sync::aggregator;
use valley_sync::{LoadPhase, SyncView};

use super::checks::SubsystemChecker;
use super::{HealthStatus, SubsystemHealth};

/// Facts about a [`SyncView`] that the checks look at.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub phase: LoadPhase,
    pub in_flight: usize,
    pub generation: u64,
    pub bundle_count: usize,
    pub item_count: usize,
    pub stats: Option<ProgressStats>,
    /// Full recompute over the mirrored bundles.
    pub recomputed: ProgressStats,
    pub last_reconciled_at: Option<DateTime<Utc>>,
}

impl HealthSnapshot {
    pub fn from_view(view: &SyncView) -> Self {
        Self {
            phase: view.phase.clone(),
            in_flight: view.in_flight,
            generation: view.generation,
            bundle_count: view.snapshot.len(),
            item_count: view.snapshot.item_count(),
            stats: view.stats,
            recomputed: aggregator::full_recompute(view.snapshot.bundles()),
            last_reconciled_at: view.last_reconciled_at,
        }
    }

    /// Local stats agree with the mirror on the item counters.
    pub fn counters_agree(&self) -> bool {
        self.stats
            .is_some_and(|s| s.same_item_counters(&self.recomputed))
    }

    /// `bundles_completed` matches what the mirror implies.
    pub fn completion_agrees(&self) -> bool {
        self.stats
            .is_some_and(|s| s.bundles_completed == self.recomputed.bundles_completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMetrics {
    pub bundles: usize,
    pub items: usize,
    pub in_flight: usize,
    pub generation: u64,
    pub delivered_items: Option<u32>,
    pub progress_percentage: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub subsystems: Vec<SubsystemHealth>,
    pub metrics: SyncMetrics,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Messages of every check that is not healthy.
    pub fn problems(&self) -> Vec<String> {
        self.subsystems
            .iter()
            .filter(|s| s.status != HealthStatus::Healthy)
            .filter_map(|s| s.message.clone())
            .collect()
    }
}

/// Builds a [`HealthReport`] from a snapshot and subsystem checks.
pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        let _span = crate::health_span!().entered();
        let subsystems = SubsystemChecker::check_all(snapshot, Utc::now());
        let overall_status = Self::derive_overall(&subsystems);

        let report = HealthReport {
            overall_status,
            subsystems,
            metrics: SyncMetrics {
                bundles: snapshot.bundle_count,
                items: snapshot.item_count,
                in_flight: snapshot.in_flight,
                generation: snapshot.generation,
                delivered_items: snapshot.stats.map(|s| s.delivered_items),
                progress_percentage: snapshot.stats.map(|s| s.progress_percentage),
            },
            checked_at: Utc::now(),
        };
        crate::tracing_setup::events::health_degraded(report.overall_status, &report.problems());
        report
    }

    pub fn from_view(view: &SyncView) -> HealthReport {
        Self::build(&HealthSnapshot::from_view(view))
    }

    /// Unhealthy if any check is unhealthy, degraded if any is degraded,
    /// otherwise healthy.
    fn derive_overall(subsystems: &[SubsystemHealth]) -> HealthStatus {
        subsystems
            .iter()
            .map(|s| s.status)
            .max()
            .unwrap_or(HealthStatus::Healthy)
    }
}
