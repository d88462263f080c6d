//! Core domain types: board, players, roster, random source, configuration.
//!
//! Everything here is plain data plus pure algorithms. Orchestration lives in
//! [`crate::session`], storage in [`crate::persist`].

pub mod board;
pub mod config;
pub mod player;
pub mod rng;
pub mod roster;

pub use board::{Board, Cell, DetonationRun};
pub use config::{BoardConfig, RenderOptions};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use roster::Roster;
