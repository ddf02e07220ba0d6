//! Topic-based event bus for flexible event routing.
//!
//! Consumers subscribe per topic and only receive the lifecycle events they
//! care about; publishing is best-effort and never blocks the worker.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{LootEvent, MatchEvent, ProfileEvent};
