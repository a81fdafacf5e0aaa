use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{CellCoord, GridGeometry};

/// Places food on uniformly random free cells.
///
/// Draws come from a seeded ChaCha stream so identical seeds replay identical
/// food sequences.
#[derive(Debug)]
pub struct FoodSpawner {
    grid: GridGeometry,
    rng: ChaCha8Rng,
}

impl FoodSpawner {
    /// Creates a spawner for the provided grid.
    #[must_use]
    pub fn new(grid: GridGeometry, seed: u64) -> Self {
        Self {
            grid,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picks a free cell, or `None` once every cell is occupied.
    ///
    /// Free cells are enumerated and a single index is drawn, so the call
    /// terminates regardless of how crowded the grid is.
    pub fn spawn(&mut self, occupied: &HashSet<CellCoord>) -> Option<CellCoord> {
        let free = self
            .grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .count();
        if free == 0 {
            return None;
        }

        let pick = self.rng.gen_range(0..free);
        self.grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .nth(pick)
    }
}
