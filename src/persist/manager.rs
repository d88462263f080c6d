//! Snapshot persistence: day-keyed saves, retention, and lifetime merging.
//!
//! One snapshot per calendar day. Saving on a new day first clears the
//! roster's round-scoped stats (identities stay); after every save the oldest
//! day snapshots beyond the retention window are folded into the lifetime
//! aggregate and deleted. Deserialization failures are logged and treated as
//! absent data; they never corrupt in-memory state or escape this module.

use chrono::{Local, NaiveDate};
use log::warn;
use thiserror::Error;

use crate::core::{BoardConfig, Roster};

use super::daykey::{day_key, is_new_day, parse_day_key, LIFETIME_KEY};
use super::store::KvStore;

use serde::{Deserialize, Serialize};

/// The unit persisted under one day key (and, merged, under the lifetime
/// key): board configuration plus the full roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Board shape and render options.
    pub config: BoardConfig,
    /// Players, stats, and the stored turn pointer.
    pub roster: Roster,
}

/// Failure inside the persistence boundary. Logged, never propagated.
#[derive(Debug, Error)]
enum PersistError {
    #[error("malformed snapshot under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Day-keyed snapshot manager over a generic string-keyed store.
pub struct SnapshotManager<S: KvStore> {
    store: S,
    retain_days: usize,
}

impl<S: KvStore> SnapshotManager<S> {
    /// Create a manager keeping the newest `retain_days` day snapshots.
    #[must_use]
    pub fn new(store: S, retain_days: usize) -> Self {
        assert!(retain_days > 0, "Must retain at least 1 day");
        Self { store, retain_days }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All day keys present, newest first.
    #[must_use]
    pub fn day_keys_desc(&self) -> Vec<(NaiveDate, String)> {
        let mut days: Vec<(NaiveDate, String)> = self
            .store
            .list_keys()
            .into_iter()
            .filter_map(|key| parse_day_key(&key).map(|date| (date, key)))
            .collect();
        days.sort_by(|a, b| b.0.cmp(&a.0));
        days
    }

    /// Save a snapshot under today's key, then prune expired days.
    ///
    /// If the most recent stored day differs from `today`, round-scoped stats
    /// are cleared (identities kept) before the save, mirroring the rollover
    /// applied at load time. Returns false if serialization failed; the store
    /// is untouched in that case.
    pub fn save(&mut self, snapshot: &SessionSnapshot, today: NaiveDate) -> bool {
        let mut snapshot = snapshot.clone();
        if let Some((stored_day, _)) = self.day_keys_desc().first() {
            if is_new_day(*stored_day, today) {
                snapshot.roster.clear_round_stats();
            }
        }

        if !self.write_snapshot(&day_key(today), &snapshot) {
            return false;
        }
        self.prune();
        true
    }

    /// Save under the current local date.
    pub fn save_today(&mut self, snapshot: &SessionSnapshot) -> bool {
        self.save(snapshot, Local::now().date_naive())
    }

    /// Load the most recent day snapshot, applying the rollover rule.
    ///
    /// If the newest stored day is not `today`, the returned roster has its
    /// round-scoped stats cleared exactly as a save on `today` would clear
    /// them. Missing or malformed data reads as `None`.
    #[must_use]
    pub fn load_latest(&self, today: NaiveDate) -> Option<SessionSnapshot> {
        let (stored_day, key) = self.day_keys_desc().into_iter().next()?;
        let mut snapshot = self.read_snapshot(&key)?;
        if is_new_day(stored_day, today) {
            snapshot.roster.clear_round_stats();
        }
        Some(snapshot)
    }

    /// Load the most recent snapshot relative to the current local date.
    #[must_use]
    pub fn load_latest_today(&self) -> Option<SessionSnapshot> {
        self.load_latest(Local::now().date_naive())
    }

    /// Merge the live roster, every other stored day, and the lifetime
    /// aggregate into one ephemeral roster for display.
    ///
    /// The live roster stands in for `today`; a stored snapshot under today's
    /// key is skipped to avoid double counting. Nothing in the store is
    /// mutated.
    #[must_use]
    pub fn load_all_time(&self, current: &Roster, today: NaiveDate) -> Roster {
        let mut sources: Vec<Roster> = vec![current.clone()];

        for (date, key) in self.day_keys_desc() {
            if !is_new_day(date, today) {
                continue;
            }
            if let Some(snapshot) = self.read_snapshot(&key) {
                sources.push(snapshot.roster);
            }
        }
        if let Some(lifetime) = self.read_snapshot(LIFETIME_KEY) {
            sources.push(lifetime.roster);
        }

        Roster::merge(sources.iter())
    }

    /// Fold day snapshots beyond the retention window into the lifetime
    /// aggregate and delete their keys. The lifetime key itself is never
    /// deleted.
    fn prune(&mut self) {
        let expired: Vec<(NaiveDate, String)> = self
            .day_keys_desc()
            .into_iter()
            .skip(self.retain_days)
            .collect();

        for (_, key) in expired {
            if let Some(snapshot) = self.read_snapshot(&key) {
                let merged = match self.read_snapshot(LIFETIME_KEY) {
                    Some(lifetime) => SessionSnapshot {
                        config: lifetime.config,
                        roster: Roster::merge([&lifetime.roster, &snapshot.roster]),
                    },
                    None => SessionSnapshot {
                        config: snapshot.config,
                        roster: Roster::merge([&snapshot.roster]),
                    },
                };
                if !self.write_snapshot(LIFETIME_KEY, &merged) {
                    // Do not drop a day we failed to fold in.
                    continue;
                }
            }
            self.store.delete(&key);
        }
    }

    fn read_snapshot(&self, key: &str) -> Option<SessionSnapshot> {
        let raw = self.store.get(key)?;
        let snapshot: SessionSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(source) => {
                let err = PersistError::Malformed {
                    key: key.to_string(),
                    source,
                };
                warn!("treating stored snapshot as absent: {err}");
                return None;
            }
        };
        // Well-formed JSON can still describe an unbuildable board.
        if !snapshot.config.is_valid() {
            warn!(
                "treating stored snapshot as absent: {key} has an empty board \
                 ({} columns, {} cells)",
                snapshot.config.columns, snapshot.config.total,
            );
            return None;
        }
        Some(snapshot)
    }

    fn write_snapshot(&mut self, key: &str, snapshot: &SessionSnapshot) -> bool {
        match serde_json::to_string(snapshot) {
            Ok(raw) => {
                self.store.set(key, raw);
                true
            }
            Err(err) => {
                warn!("failed to serialize snapshot for {key}: {err}");
                false
            }
        }
    }
}
