//! Players and their accumulated statistics.
//!
//! ## Identity
//!
//! A player's id is an opaque string generated once and kept for the lifetime
//! of the player, across sessions and persisted snapshots. The generation
//! scheme is hex seconds-since-epoch plus a hex 16-bit random salt, which is
//! unique enough for a party of humans and stays readable in stored blobs.
//!
//! ## Statistics
//!
//! All counters are additive, so merging two records of the same player is a
//! field-wise sum (per-target hits summed pointwise). Day rollover clears the
//! counters but never the identity.

use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Stable opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id: hex epoch seconds, a dash, a hex 16-bit salt.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let salt = rng.draw_range(1 << 16);
        Self(format!("{secs:x}-{salt:x}"))
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One player: identity, participation flag, and accumulated stats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,

    /// Display name.
    pub name: String,

    /// Whether this player takes turns. Non-participants stay on the roster
    /// for bookkeeping but are skipped by turn rotation.
    pub participating: bool,

    /// Total cells this player has detonated.
    pub detonated_count: u64,

    /// Turns this player has taken (one per committed click).
    pub turns_taken: u64,

    /// Rounds this player has sat through to completion.
    pub rounds_completed: u64,

    /// Per-cell count of secret targets this player has hit.
    pub target_hits: FxHashMap<usize, u64>,

    /// Total secret-target hits across all cells.
    pub total_hits: u64,
}

impl Player {
    /// Create a player with a freshly generated id.
    pub fn new(name: impl Into<String>, rng: &mut GameRng) -> Self {
        Self::with_id(name, PlayerId::generate(rng))
    }

    /// Create a player with a known id (e.g. loaded from a snapshot).
    pub fn with_id(name: impl Into<String>, id: PlayerId) -> Self {
        Self {
            id,
            name: name.into(),
            participating: false,
            detonated_count: 0,
            turns_taken: 0,
            rounds_completed: 0,
            target_hits: FxHashMap::default(),
            total_hits: 0,
        }
    }

    /// Get this player's id.
    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Record a hit on the secret target at `index`.
    ///
    /// Returns the updated hit count for that cell.
    pub fn record_target_hit(&mut self, index: usize) -> u64 {
        let count = self.target_hits.entry(index).or_insert(0);
        *count += 1;
        self.total_hits += 1;
        *count
    }

    /// Additively fold another record of (usually) the same player into this
    /// one. Sums every counter and pointwise-sums the per-target map; identity
    /// and participation are untouched.
    pub fn merge_from(&mut self, other: &Player) {
        self.detonated_count += other.detonated_count;
        self.turns_taken += other.turns_taken;
        self.rounds_completed += other.rounds_completed;
        self.total_hits += other.total_hits;
        for (&index, &count) in &other.target_hits {
            *self.target_hits.entry(index).or_insert(0) += count;
        }
    }

    /// Zero every accumulated counter, keeping id, name and participation.
    pub fn clear_round_stats(&mut self) {
        self.detonated_count = 0;
        self.turns_taken = 0;
        self.rounds_completed = 0;
        self.target_hits.clear();
        self.total_hits = 0;
    }
}
