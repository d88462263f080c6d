//! # mine-party
//!
//! Engine for a turn-based elimination party game. Players take turns
//! clicking a numbered cell on a grid; the click detonates a contiguous run
//! of surviving cells toward whichever side of the click has fewer left. A
//! secret "unlucky" cell is drawn at the start of every round, and whoever
//! detonates it ends the round. Per-player scores persist across calendar
//! days, with expired daily snapshots folded into a lifetime total.
//!
//! ## Architecture
//!
//! - **One-directional ownership**: the [`SessionEngine`] holds a narrow
//!   [`Renderer`] handle; the UI feeds input back only through
//!   [`SessionEngine::handle_click`].
//!
//! - **Explicit observation**: session state is a plain struct mutated only
//!   by engine methods, published to subscribers after every committed
//!   mutation. No implicit reactivity.
//!
//! - **Replay-log rollback**: committed turns append to a [`StepLog`]; undo
//!   restores the pre-round anchor and replays the surviving prefix.
//!
//! - **Degradable persistence**: storage is a generic string-keyed
//!   [`KvStore`]; anything malformed reads as absent, nothing throws past
//!   the persistence boundary.
//!
//! ## Modules
//!
//! - `core`: board, elimination algorithm, players, roster rotation, RNG
//! - `session`: the turn state machine, step log, rollback, observers
//! - `persist`: day-keyed snapshots, rollover, retention and lifetime merge
//! - `render`: the display collaborator seam

pub mod core;
pub mod persist;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardConfig, Cell, DetonationRun,
    GameRng,
    Player, PlayerId, RenderOptions, Roster,
};

pub use crate::session::{
    ObserverId, RollbackReport, SessionEngine, SessionState, Status, Step, StepLog,
};

pub use crate::persist::{
    day_key, is_new_day, parse_day_key,
    KvStore, MemoryStore, SessionSnapshot, SnapshotManager,
    DAY_KEY_PREFIX, LIFETIME_KEY,
};

pub use crate::render::{NullRenderer, Renderer};
