//! Session engine: orchestrates board, roster, step log and secret target.
//!
//! ## Turn resolution
//!
//! One click at a time. While a click resolves (including the cosmetic
//! end-of-round sweep) the status is `Resolving` and further clicks are
//! rejected, never queued. Malformed input is logged and ignored; nothing in
//! here throws past the click boundary.
//!
//! ## Rollback
//!
//! The first click of a round captures an anchor snapshot. Undoing `n` turns
//! restores the board from that anchor, replays the log prefix that survives,
//! and repositions the turn pointer at the actor of the first undone step, so
//! that click is about to happen again. Player statistics accumulated during
//! the undone turns are deliberately not reversed; only board and turn state
//! come back.

use log::{debug, warn};

use crate::core::{Board, BoardConfig, GameRng, Player, PlayerId, Roster};
use crate::persist::SessionSnapshot;
use crate::render::Renderer;

use super::state::{Observers, ObserverId, SessionState, Status};
use super::step_log::{Step, StepLog};

/// Log lengths before and after a rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollbackReport {
    /// Committed steps before the rollback.
    pub steps_before: usize,
    /// Committed steps after the rollback.
    pub steps_after: usize,
}

/// Pre-round state captured at the first click, restored on rollback.
#[derive(Clone)]
struct Anchor {
    board: Board,
    roster: Roster,
    target: usize,
}

/// The one live game session.
pub struct SessionEngine {
    config: BoardConfig,
    board: Board,
    roster: Roster,
    log: StepLog,
    secret_target: usize,
    status: Status,
    anchor: Option<Anchor>,
    rng: GameRng,
    renderer: Box<dyn Renderer>,
    observers: Observers,
}

impl SessionEngine {
    /// Create a session and start its first round.
    #[must_use]
    pub fn new(config: BoardConfig, renderer: Box<dyn Renderer>) -> Self {
        Self::with_rng(config, renderer, GameRng::from_entropy())
    }

    /// Create a session with an explicit random source (seeded in tests).
    #[must_use]
    pub fn with_rng(config: BoardConfig, mut renderer: Box<dyn Renderer>, rng: GameRng) -> Self {
        let board = Board::new(config.columns, config.total);
        renderer.init();

        let mut engine = Self {
            config,
            board,
            roster: Roster::new(),
            log: StepLog::new(),
            secret_target: 0,
            status: Status::Initializing,
            anchor: None,
            rng,
            renderer,
            observers: Observers::default(),
        };
        engine.new_game();
        engine
    }

    // === Accessors ===

    /// Current status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Steps committed since the last round reset.
    #[must_use]
    pub fn step_log(&self) -> &StepLog {
        &self.log
    }

    /// The secret target, visible only once the round has ended.
    #[must_use]
    pub fn revealed_target(&self) -> Option<usize> {
        (self.status == Status::Ended).then_some(self.secret_target)
    }

    /// Current observable state.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        SessionState {
            status: self.status,
            columns: self.config.columns,
            total: self.board.total(),
            unexploded: self.board.unexploded_count(),
        }
    }

    /// Clone the persistable half of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            roster: self.roster.clone(),
        }
    }

    // === Observers ===

    /// Subscribe to state changes. The callback fires after every committed
    /// mutation (new game, click resolution, rollback, reconfiguration).
    pub fn subscribe(&mut self, callback: impl FnMut(&SessionState) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self) {
        let state = self.session_state();
        self.observers.notify(&state);
    }

    // === Roster management ===

    /// Replace the player list (de-duplicated, pointer revalidated).
    pub fn replace_players(&mut self, players: Vec<Player>) {
        self.roster.replace_players(players);
        self.notify();
    }

    /// Point the turn at a specific player, or clear it.
    pub fn set_current_player(&mut self, id: Option<&PlayerId>) {
        self.roster.set_current(id);
        self.notify();
    }

    /// Adopt a loaded snapshot: rebuild the board for its config, take its
    /// roster (revalidating the stored turn pointer), and start a fresh round.
    ///
    /// A snapshot with an unbuildable board config is logged and ignored.
    pub fn adopt_snapshot(&mut self, snapshot: SessionSnapshot) {
        if !snapshot.config.is_valid() {
            warn!(
                "snapshot ignored: empty board config ({} columns, {} cells)",
                snapshot.config.columns, snapshot.config.total,
            );
            return;
        }
        self.config = snapshot.config;
        self.board = Board::new(self.config.columns, self.config.total);
        self.roster = snapshot.roster;

        let stored = self.roster.current_id().cloned();
        self.roster.set_current(stored.as_ref());
        if self.roster.current().is_none() {
            self.roster.set_first();
        }

        self.log.clear();
        self.anchor = None;
        self.new_game();
    }

    // === Round lifecycle ===

    /// Reset the board, clear the step log, pick a fresh secret target.
    pub fn new_game(&mut self) {
        self.status = Status::Initializing;
        self.board.reset();
        self.renderer.reset_cells(&self.board);
        self.log.clear();
        self.anchor = None;
        self.secret_target = self.rng.draw_range(self.board.total());
        self.status = Status::AwaitingInput;
        debug!("new round started, secret target is cell {}", self.secret_target);
        self.notify();
    }

    /// Rebuild the board for a new shape and start over.
    ///
    /// Invalidates the step log and any rollback anchor. An unbuildable
    /// config (zero columns or cells) is logged and ignored.
    pub fn change_config(&mut self, config: BoardConfig) {
        if !config.is_valid() {
            warn!(
                "reconfiguration ignored: empty board config ({} columns, {} cells)",
                config.columns, config.total,
            );
            return;
        }
        self.status = Status::Initializing;
        self.board = Board::new(config.columns, config.total);
        self.config = config;
        self.log.clear();
        self.anchor = None;
        self.new_game();
    }

    // === Turn resolution ===

    /// Resolve a click on `index`.
    ///
    /// Invalid input (bad index, exploded cell, no eligible player, busy or
    /// ended session) is logged and ignored without mutating anything.
    pub fn handle_click(&mut self, index: usize) {
        if index >= self.board.total() {
            warn!("click ignored: cell {index} out of range");
            return;
        }
        if self.board.is_exploded(index) {
            warn!("click ignored: cell {index} already detonated");
            return;
        }
        let Some(player_id) = self
            .roster
            .current()
            .filter(|p| p.participating)
            .map(|p| p.id().clone())
        else {
            warn!("click ignored: no participating player has the turn");
            return;
        };
        if self.status != Status::AwaitingInput {
            warn!("click ignored: session is {:?}", self.status);
            return;
        }

        self.status = Status::Resolving;
        self.notify();

        // First click of the round: capture the rollback anchor.
        if self.log.is_empty() {
            self.anchor = Some(Anchor {
                board: self.board.clone(),
                roster: self.roster.clone(),
                target: self.secret_target,
            });
        }

        let run = self.board.detonation_run(index, &mut self.rng);
        for &cell in &run {
            self.board.mark_exploded(cell);
        }
        let ended = run.contains(&self.secret_target);

        self.log.push(Step {
            total: self.board.total(),
            detonated: run.to_vec(),
            revealed_target: ended.then_some(self.secret_target),
            player_id: player_id.clone(),
        });

        if let Some(player) = self.roster.player_mut(&player_id) {
            player.detonated_count += run.len() as u64;
            player.turns_taken += 1;
            if ended {
                player.record_target_hit(self.secret_target);
            }
        }
        debug!(
            "player {player_id} clicked cell {index}, detonating {:?}{}",
            run.as_slice(),
            if ended { " (round over)" } else { "" },
        );

        self.renderer.detonate(&run);

        if ended {
            // Cosmetic sweep of whatever is left, then reveal.
            let mut rest = self.board.unexploded_indices();
            self.rng.shuffle(&mut rest);
            for &cell in &rest {
                self.board.mark_exploded(cell);
            }
            if !rest.is_empty() {
                self.renderer.detonate(&rest);
            }
            self.renderer.reveal_target(self.secret_target);

            for player in self.roster.players_mut() {
                player.rounds_completed += 1;
            }
            self.status = Status::Ended;
        } else {
            self.roster.advance_turn();
            self.status = Status::AwaitingInput;
        }
        self.notify();
    }

    // === Rollback ===

    /// Undo committed turns.
    ///
    /// `steps_back >= 1` undoes that many turns; `steps_back < 0` discards the
    /// whole round back to the pre-round anchor; `steps_back == 0` does
    /// nothing. Without an anchor (no click since the last reset) this is a
    /// no-op. The turn pointer lands on the actor of the first undone step.
    /// Player statistics are not reversed.
    pub fn rollback(&mut self, steps_back: i32) -> RollbackReport {
        let steps_before = self.log.len();
        let unchanged = RollbackReport {
            steps_before,
            steps_after: steps_before,
        };

        let Some(anchor) = self.anchor.clone() else {
            return unchanged;
        };
        if steps_before == 0 || steps_back == 0 {
            return unchanged;
        }

        let keep = if steps_back < 0 {
            0
        } else {
            steps_before.saturating_sub(steps_back as usize)
        };

        self.board = anchor.board;
        self.secret_target = anchor.target;
        for step in &self.log.steps()[..keep] {
            for &cell in &step.detonated {
                self.board.mark_exploded(cell);
            }
        }

        // The first undone step is about to happen again: its actor takes
        // the turn back.
        let next_actor = self.log.steps()[keep].player_id.clone();
        self.roster.set_current(Some(&next_actor));
        if self.roster.current().is_none() {
            // Actor left or stopped participating in the meantime.
            self.roster.set_current(anchor.roster.current_id());
        }

        self.log.truncate(keep);
        self.status = Status::AwaitingInput;
        self.renderer.reset_cells(&self.board);

        debug!("rolled back from {steps_before} to {keep} committed steps");
        self.notify();

        RollbackReport {
            steps_before,
            steps_after: keep,
        }
    }
}
