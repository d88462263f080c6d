//! Session orchestration: the turn state machine, step log and rollback.

pub mod engine;
pub mod state;
pub mod step_log;

pub use engine::{RollbackReport, SessionEngine};
pub use state::{ObserverId, SessionState, Status};
pub use step_log::{Step, StepLog};
