//! Persistence: day-keyed snapshots, retention merging, and the store seam.

pub mod daykey;
pub mod manager;
pub mod store;

pub use daykey::{day_key, is_new_day, parse_day_key, DAY_KEY_PREFIX, LIFETIME_KEY};
pub use manager::{SessionSnapshot, SnapshotManager};
pub use store::{KvStore, MemoryStore};
