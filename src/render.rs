//! Narrow seam between the session engine and whatever draws the board.
//!
//! The engine owns a boxed [`Renderer`] and drives it in a fixed order:
//! `reset_cells` on every round reset, `detonate` for each batch (the click's
//! run first, then the cosmetic end-of-round sweep), `reveal_target` last.
//! `detonate` returns only once the batch's animation has finished, so the
//! engine never mutates state while a batch is in flight. The renderer never
//! receives a reference back into the engine; user input flows the other way,
//! through [`crate::session::SessionEngine::handle_click`].

use crate::core::Board;

/// Display collaborator driven by the session engine.
pub trait Renderer {
    /// One-time setup (asset loading, canvas creation).
    fn init(&mut self);

    /// Redraw every cell from scratch to match the board's current flags.
    fn reset_cells(&mut self, board: &Board);

    /// Play the explosion animation for one batch of cells, in order.
    ///
    /// Must not return until the batch has finished animating.
    fn detonate(&mut self, indices: &[usize]);

    /// Highlight the revealed secret target.
    fn reveal_target(&mut self, index: usize);
}

/// Renderer that draws nothing. For headless sessions and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn init(&mut self) {}
    fn reset_cells(&mut self, _board: &Board) {}
    fn detonate(&mut self, _indices: &[usize]) {}
    fn reveal_target(&mut self, _index: usize) {}
}
