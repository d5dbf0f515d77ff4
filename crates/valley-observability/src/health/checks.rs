//! Per-area checks: load phase, statistics, pending updates, freshness.

use chrono::{DateTime, Duration, Utc};

use valley_sync::LoadPhase;

use super::reporter::HealthSnapshot;
use super::{HealthStatus, SubsystemHealth};

/// Pending updates above this count degrade health.
pub const MAX_HEALTHY_IN_FLIGHT: usize = 16;

/// No reconciliation for this long degrades health.
pub const STALE_AFTER_MINUTES: i64 = 30;

pub struct SubsystemChecker;

impl SubsystemChecker {
    pub fn check_all(snapshot: &HealthSnapshot, now: DateTime<Utc>) -> Vec<SubsystemHealth> {
        vec![
            Self::check_load(snapshot),
            Self::check_stats(snapshot),
            Self::check_pending(snapshot),
            Self::check_freshness(snapshot, now),
        ]
    }

    fn check_load(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = match &snapshot.phase {
            LoadPhase::Ready => (HealthStatus::Healthy, None),
            LoadPhase::Loading => (HealthStatus::Degraded, Some("full load in progress".into())),
            LoadPhase::Failed { reason } => (
                HealthStatus::Unhealthy,
                Some(format!("last full load failed: {reason}")),
            ),
        };
        entry("load", status, message)
    }

    /// Stats must exist and agree with the mirror once nothing is pending.
    /// While updates are in flight, `bundles_completed` is expected to lag.
    fn check_stats(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.stats.is_none() {
            (HealthStatus::Unhealthy, Some("no statistics loaded".into()))
        } else if snapshot.in_flight > 0 {
            (HealthStatus::Healthy, None)
        } else if !snapshot.counters_agree() {
            (
                HealthStatus::Degraded,
                Some("item counters disagree with mirror, reload needed".into()),
            )
        } else if !snapshot.completion_agrees() {
            (
                HealthStatus::Degraded,
                Some("bundles_completed disagrees with mirror".into()),
            )
        } else {
            (HealthStatus::Healthy, None)
        };
        entry("stats", status, message)
    }

    fn check_pending(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.in_flight > MAX_HEALTHY_IN_FLIGHT {
            (
                HealthStatus::Degraded,
                Some(format!("{} updates in flight", snapshot.in_flight)),
            )
        } else {
            (HealthStatus::Healthy, None)
        };
        entry("pending", status, message)
    }

    fn check_freshness(snapshot: &HealthSnapshot, now: DateTime<Utc>) -> SubsystemHealth {
        let (status, message) = match snapshot.last_reconciled_at {
            None => (HealthStatus::Degraded, Some("never reconciled".into())),
            Some(at) if now - at > Duration::minutes(STALE_AFTER_MINUTES) => (
                HealthStatus::Degraded,
                Some(format!("last reconciled at {}", at.to_rfc3339())),
            ),
            Some(_) => (HealthStatus::Healthy, None),
        };
        entry("freshness", status, message)
    }
}

fn entry(name: &str, status: HealthStatus, message: Option<String>) -> SubsystemHealth {
    SubsystemHealth {
        name: name.into(),
        status,
        message,
    }
}
