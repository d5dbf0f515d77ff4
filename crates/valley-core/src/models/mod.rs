//! Wire models. Field names and the status strings are part of the remote
//! contract and must round-trip through JSON unchanged.

mod bundle;
mod item;
mod progress_stats;

pub use bundle::{Bundle, BundleProgress};
pub use item::{Item, ItemStatus};
pub use progress_stats::ProgressStats;
