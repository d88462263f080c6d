//! Observable session state and the subscription interface.
//!
//! UI layers bind to the engine through explicit observers instead of any
//! implicit reactivity: the engine publishes a [`SessionState`] value after
//! every committed mutation, and subscribers are plain `FnMut` callbacks keyed
//! by an [`ObserverId`].

use serde::{Deserialize, Serialize};

/// Session status state machine.
///
/// `Initializing -> AwaitingInput <-> Resolving -> Ended`; new-game returns
/// `Ended`/`AwaitingInput` to `Initializing` and back to `AwaitingInput`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Board is being (re)built; input rejected.
    Initializing,
    /// Waiting for the current player's click.
    AwaitingInput,
    /// A click is being resolved; further clicks are rejected, not queued.
    Resolving,
    /// The secret target was hit; round over until new-game.
    Ended,
}

/// Snapshot of the observable session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Current status.
    pub status: Status,
    /// Grid column count.
    pub columns: usize,
    /// Total cell count.
    pub total: usize,
    /// Cells not yet detonated.
    pub unexploded: usize,
}

/// Handle for removing a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Subscriber registry owned by the session engine.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    subscribers: Vec<(ObserverId, Box<dyn FnMut(&SessionState)>)>,
}

impl Observers {
    pub(crate) fn subscribe(
        &mut self,
        callback: impl FnMut(&SessionState) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub(crate) fn notify(&mut self, state: &SessionState) {
        for (_, callback) in &mut self.subscribers {
            callback(state);
        }
    }
}
