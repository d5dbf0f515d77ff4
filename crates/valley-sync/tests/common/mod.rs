//! Scripted in-memory remote for coordinator tests.
//!
//! Holds the authoritative bundles, recomputes stats on every fetch, and can
//! be told to fail or to park the next update until released.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use valley_core::errors::{SyncError, ValleyResult};
use valley_core::models::{Bundle, Item, ItemStatus, ProgressStats};
use valley_core::traits::IRemoteSyncClient;
use valley_sync::aggregator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchBundles,
    FetchStats,
    Update(String, ItemStatus),
}

struct Gate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

#[derive(Default)]
struct Inner {
    bundles: Vec<Bundle>,
    fail_updates: usize,
    fail_stats: usize,
    fail_fetches: usize,
    stats_override: Option<ProgressStats>,
    gates: VecDeque<Gate>,
    calls: Vec<Call>,
}

pub struct ScriptedRemote {
    inner: Mutex<Inner>,
}

impl ScriptedRemote {
    pub fn new(bundles: Vec<Bundle>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                bundles,
                ..Inner::default()
            }),
        }
    }

    /// Fail the next `n` update calls.
    pub fn fail_updates(&self, n: usize) {
        self.lock().fail_updates = n;
    }

    /// Fail the next `n` stats fetches.
    pub fn fail_stats(&self, n: usize) {
        self.lock().fail_stats = n;
    }

    /// Fail the next `n` bundle fetches.
    pub fn fail_fetches(&self, n: usize) {
        self.lock().fail_fetches = n;
    }

    /// Serve `stats` from every stats fetch instead of recomputing them,
    /// even when they disagree with the bundles.
    pub fn override_stats(&self, stats: ProgressStats) {
        self.lock().stats_override = Some(stats);
    }

    /// Park the next update call. The first receiver fires once the call has
    /// been entered; the call completes after the sender is used or dropped.
    pub fn gate_next_update(&self) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.lock().gates.push_back(Gate {
            entered: entered_tx,
            release: release_rx,
        });
        (entered_rx, release_tx)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn update_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Update(..)))
            .count()
    }

    pub fn status_of(&self, item_id: &str) -> Option<ItemStatus> {
        self.lock()
            .bundles
            .iter()
            .flat_map(Bundle::items)
            .find(|i| i.id == item_id)
            .map(|i| i.status)
    }

    pub fn authoritative_stats(&self) -> ProgressStats {
        aggregator::full_recompute(&self.lock().bundles)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

fn remote_failure(operation: &str) -> valley_core::ValleyError {
    SyncError::RemoteFailed {
        operation: operation.to_string(),
        reason: "scripted failure".to_string(),
    }
    .into()
}

impl IRemoteSyncClient for ScriptedRemote {
    async fn fetch_all_bundles_with_items(&self) -> ValleyResult<Vec<Bundle>> {
        let mut inner = self.lock();
        inner.calls.push(Call::FetchBundles);
        if inner.fail_fetches > 0 {
            inner.fail_fetches -= 1;
            return Err(remote_failure("fetch_all_bundles_with_items"));
        }
        Ok(inner.bundles.clone())
    }

    async fn fetch_progress_stats(&self) -> ValleyResult<ProgressStats> {
        let mut inner = self.lock();
        inner.calls.push(Call::FetchStats);
        if inner.fail_stats > 0 {
            inner.fail_stats -= 1;
            return Err(remote_failure("fetch_progress_stats"));
        }
        Ok(inner
            .stats_override
            .unwrap_or_else(|| aggregator::full_recompute(&inner.bundles)))
    }

    async fn update_item_status(&self, item_id: &str, status: ItemStatus) -> ValleyResult<()> {
        let gate = {
            let mut inner = self.lock();
            inner.calls.push(Call::Update(item_id.to_string(), status));
            inner.gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.await;
        }

        let mut inner = self.lock();
        if inner.fail_updates > 0 {
            inner.fail_updates -= 1;
            return Err(remote_failure("update_item_status"));
        }
        let item = inner
            .bundles
            .iter_mut()
            .filter_map(|b| b.items.as_mut())
            .flatten()
            .find(|i| i.id == item_id);
        match item {
            Some(item) => {
                item.status = status;
                Ok(())
            }
            None => Err(SyncError::Rejected {
                item_id: item_id.to_string(),
                reason: "no such item".to_string(),
            }
            .into()),
        }
    }
}

/// Two bundles, five items, everything missing.
pub fn fixture() -> Vec<Bundle> {
    vec![
        Bundle::new("spring", "Spring Crops", "Pantry", 3).with_items(vec![
            Item::new("parsnip", "spring", "Parsnip"),
            Item::new("bean", "spring", "Green Bean"),
            Item::new("cauliflower", "spring", "Cauliflower"),
        ]),
        Bundle::new("forage", "Spring Foraging", "Crafts Room", 1).with_items(vec![
            Item::new("leek", "forage", "Leek"),
            Item::new("daffodil", "forage", "Daffodil"),
        ]),
    ]
}

/// Collects the message of every event it sees.
#[derive(Clone, Default)]
pub struct LogCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.messages.lock().unwrap().push(visitor.0);
    }
}
