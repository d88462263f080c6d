//! Ordered player roster and cyclic turn rotation.
//!
//! The roster keeps players in insertion order (de-duplicated by id, first
//! occurrence wins) plus a nullable current-turn pointer. Rotation scans
//! forward cyclically for the next participating player; "nobody eligible" is
//! `None`, never an error.
//!
//! A roster also serializes as the unit persisted under a day key, and
//! `Roster::merge` is the additive combination used for lifetime aggregates.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// Ordered unique players plus the current-turn pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    current_player_id: Option<PlayerId>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the players in order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Look up a player by id, mutably.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Iterate over all players mutably.
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Id of the player whose turn it is.
    #[must_use]
    pub fn current_id(&self) -> Option<&PlayerId> {
        self.current_player_id.as_ref()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.current_player_id.as_ref().and_then(|id| self.player(id))
    }

    /// Find the next participating player after `start`, scanning forward
    /// cyclically.
    ///
    /// - no players: `None`
    /// - exactly one player: that player iff participating
    /// - otherwise: start one position after `start` (or at position 0 when
    ///   `start` is absent or unknown) and return the first participant found
    ///   among the other players; `start` itself is not a candidate
    #[must_use]
    pub fn next_participating<'a>(
        players: &'a [Player],
        start: Option<&PlayerId>,
    ) -> Option<&'a Player> {
        if players.is_empty() {
            return None;
        }
        if players.len() == 1 {
            return players[0].participating.then(|| &players[0]);
        }

        let (start_index, first_offset) =
            match start.and_then(|id| players.iter().position(|p| p.id() == id)) {
                Some(i) => (i, 1),
                None => (0, 0),
            };

        for offset in first_offset..players.len() {
            let candidate = &players[(start_index + offset) % players.len()];
            if candidate.participating {
                return Some(candidate);
            }
        }
        None
    }

    /// Replace the whole player list.
    ///
    /// De-duplicates by id (first occurrence wins). A null current pointer is
    /// seeded with the first participant; a pointer at a player who is gone or
    /// no longer participating moves on to the next participant.
    pub fn replace_players(&mut self, players: Vec<Player>) {
        let mut seen = FxHashMap::default();
        let mut deduped = Vec::with_capacity(players.len());
        for player in players {
            if seen.insert(player.id().clone(), ()).is_none() {
                deduped.push(player);
            }
        }
        self.players = deduped;

        match self.current_player_id.clone() {
            None => {
                self.set_first();
            }
            Some(id) => {
                if !self.player(&id).is_some_and(|p| p.participating) {
                    self.current_player_id =
                        Self::next_participating(&self.players, Some(&id)).map(|p| p.id().clone());
                }
            }
        }
    }

    /// Point the turn at a specific player.
    ///
    /// A player who is unknown or not participating resolves to `None`.
    pub fn set_current(&mut self, id: Option<&PlayerId>) {
        self.current_player_id = id
            .and_then(|id| self.player(id))
            .filter(|p| p.participating)
            .map(|p| p.id().clone());
    }

    /// Move the turn to the next participating player.
    pub fn advance_turn(&mut self) -> Option<&Player> {
        self.current_player_id =
            Self::next_participating(&self.players, self.current_player_id.as_ref())
                .map(|p| p.id().clone());
        self.current()
    }

    /// Point the turn at the first participating player.
    pub fn set_first(&mut self) -> Option<&Player> {
        self.current_player_id =
            Self::next_participating(&self.players, None).map(|p| p.id().clone());
        self.current()
    }

    /// Zero every player's accumulated stats, keeping identities.
    pub fn clear_round_stats(&mut self) {
        for player in &mut self.players {
            player.clear_round_stats();
        }
    }

    /// Merge several rosters into one by summing per-player stats.
    ///
    /// Players are matched by id; a player present in only one source passes
    /// through with its stats intact. Order of first appearance is kept, and
    /// the operation is commutative and associative over all stat fields. The
    /// merged roster is display-only: participation flags are not carried
    /// over.
    #[must_use]
    pub fn merge<'a>(sources: impl IntoIterator<Item = &'a Roster>) -> Roster {
        let mut players: Vec<Player> = Vec::new();
        let mut index_by_id: FxHashMap<PlayerId, usize> = FxHashMap::default();

        for roster in sources {
            for player in roster.players() {
                let slot = match index_by_id.get(player.id()) {
                    Some(&i) => i,
                    None => {
                        index_by_id.insert(player.id().clone(), players.len());
                        players.push(Player::with_id(player.name.clone(), player.id().clone()));
                        players.len() - 1
                    }
                };
                players[slot].merge_from(player);
            }
        }

        let mut merged = Roster::new();
        merged.replace_players(players);
        merged
    }
}
