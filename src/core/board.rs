//! Board grid and the detonation-run selection algorithm.
//!
//! The board is a fixed sequence of numbered cells laid out row-major over a
//! column count. Cells only ever transition unexploded -> exploded; the whole
//! board resets at once when a new round starts.
//!
//! ## Run selection
//!
//! Clicking cell `c` detonates `c` plus the contiguous remainder of whichever
//! side of `c` (lower- or higher-numbered unexploded cells) is currently
//! smaller. Equal sides are settled by a single coin flip. The run is ordered
//! outward from `c`: lower side descending, higher side ascending.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Ordered cell indices detonated by one click.
pub type DetonationRun = SmallVec<[usize; 16]>;

/// One numbered board position.
///
/// `x`/`y` are derived from the index and column count at board construction
/// and never change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Position in the board sequence, `0..total`.
    pub index: usize,
    /// Column, `index % columns`.
    pub x: usize,
    /// Row, `index / columns`.
    pub y: usize,
    /// Whether this cell has been detonated.
    pub exploded: bool,
}

/// Fixed grid of numbered cells with exploded flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board of `total` unexploded cells over `columns` columns.
    #[must_use]
    pub fn new(columns: usize, total: usize) -> Self {
        assert!(columns > 0, "Board needs at least 1 column");
        assert!(total > 0, "Board needs at least 1 cell");

        let cells = (0..total)
            .map(|index| Cell {
                index,
                x: index % columns,
                y: index / columns,
                exploded: false,
            })
            .collect();

        Self { columns, cells }
    }

    /// Get the column count.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the total cell count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.len()
    }

    /// Get all cells in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a cell by index.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Check whether a cell has been detonated.
    ///
    /// Out-of-range indices read as not exploded.
    #[must_use]
    pub fn is_exploded(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|c| c.exploded)
    }

    /// Mark a cell as detonated.
    pub fn mark_exploded(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.exploded = true;
        }
    }

    /// Count of cells not yet detonated.
    #[must_use]
    pub fn unexploded_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.exploded).count()
    }

    /// Indices of cells not yet detonated, ascending.
    #[must_use]
    pub fn unexploded_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|c| !c.exploded)
            .map(|c| c.index)
            .collect()
    }

    /// Clear every exploded flag.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.exploded = false;
        }
    }

    /// Compute the ordered detonation run for a click on `clicked`.
    ///
    /// `clicked` must be in range and not yet exploded (the session engine
    /// rejects such clicks before getting here). The run always starts with
    /// `clicked`, contains no duplicates, and covers only previously
    /// unexploded cells. At most one `rng` draw happens, and only when both
    /// sides are the same size.
    #[must_use]
    pub fn detonation_run(&self, clicked: usize, rng: &mut GameRng) -> DetonationRun {
        debug_assert!(clicked < self.total());
        debug_assert!(!self.is_exploded(clicked));

        let mut before: DetonationRun = SmallVec::new();
        let mut after: DetonationRun = SmallVec::new();
        for cell in &self.cells {
            if cell.exploded || cell.index == clicked {
                continue;
            }
            if cell.index < clicked {
                before.push(cell.index);
            } else {
                after.push(cell.index);
            }
        }

        let choose_before = if before.len() == after.len() {
            !before.is_empty() && rng.draw() < 0.5
        } else {
            before.len() < after.len()
        };

        let mut run: DetonationRun = SmallVec::new();
        run.push(clicked);
        if choose_before {
            run.extend(before.into_iter().rev());
        } else {
            run.extend(after);
        }
        run
    }
}
