//! # valley-sync
//!
//! Optimistic state synchronization and aggregation.
//!
//! A status change lands in the local [`mirror::MirrorStore`] and the
//! statistics delta is applied before any remote round trip. The
//! [`coordinator::OptimisticCoordinator`] then dispatches the authoritative
//! update and either reconciles statistics or reloads everything.
//!
//! All state transitions go through [`state::SyncState::apply`]; the
//! coordinator only sequences them around the remote calls.

pub mod aggregator;
pub mod coordinator;
pub mod mirror;
pub mod state;

pub use coordinator::{OptimisticCoordinator, UpdateOutcome, UpdatePhase, UpdateTicket};
pub use mirror::{MirrorSnapshot, MirrorStore};
pub use state::{Effect, LoadPhase, SyncEvent, SyncState, SyncView};
