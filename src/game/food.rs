use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::error::EngineError;
use super::grid::{Cell, Grid};

/// Draws after which the placer stops guessing and enumerates the free cells
const MAX_RANDOM_DRAWS: usize = 256;

/// Picks food cells uniformly among the unoccupied cells of a grid
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    /// Placer seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Placer with a fixed seed, for reproducible games
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a random cell of `grid` that is not in `occupied`.
    ///
    /// Rejection sampling is tried first. Once `MAX_RANDOM_DRAWS` draws
    /// all hit the body, the remaining free cells are enumerated and one is
    /// chosen among them, which keeps the result uniform and the running time
    /// bounded. Fails only when the body covers the whole grid.
    pub fn place<'a, I>(&mut self, occupied: I, grid: Grid) -> Result<Cell, EngineError>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let occupied: HashSet<Cell> = occupied
            .into_iter()
            .copied()
            .filter(|cell| grid.contains(*cell))
            .collect();

        let exhausted = EngineError::ExhaustedBoard {
            width: grid.width(),
            height: grid.height(),
        };

        if occupied.len() >= grid.cell_count() {
            return Err(exhausted);
        }

        for _ in 0..MAX_RANDOM_DRAWS {
            let x = self.rng.gen_range(0..grid.width()) as i32;
            let y = self.rng.gen_range(0..grid.height()) as i32;
            let cell = Cell::new(x, y);

            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }

        grid.cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng)
            .ok_or(exhausted)
    }
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_avoids_body() {
        let grid = Grid::new(5, 5).unwrap();
        let body = vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)];
        let mut placer = FoodPlacer::seeded(7);

        for _ in 0..500 {
            let food = placer.place(&body, grid).unwrap();
            assert!(grid.contains(food));
            assert!(!body.contains(&food));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let grid = Grid::new(4, 4).unwrap();
        let free = Cell::new(3, 1);
        let body: Vec<Cell> = grid.cells().filter(|cell| *cell != free).collect();
        let mut placer = FoodPlacer::seeded(42);

        for _ in 0..20 {
            assert_eq!(placer.place(&body, grid), Ok(free));
        }
    }

    #[test]
    fn test_full_board_is_exhausted() {
        let grid = Grid::new(3, 3).unwrap();
        let body: Vec<Cell> = grid.cells().collect();
        let mut placer = FoodPlacer::seeded(1);

        assert_eq!(
            placer.place(&body, grid),
            Err(EngineError::ExhaustedBoard {
                width: 3,
                height: 3
            })
        );
    }

    #[test]
    fn test_one_by_one_board_with_snake_is_exhausted() {
        let grid = Grid::new(1, 1).unwrap();
        let mut placer = FoodPlacer::seeded(1);

        assert!(placer.place(&[Cell::new(0, 0)], grid).is_err());
        assert_eq!(
            placer.place(std::iter::empty::<&Cell>(), grid),
            Ok(Cell::new(0, 0))
        );
    }

    #[test]
    fn test_placement_covers_every_free_cell() {
        let grid = Grid::new(3, 3).unwrap();
        let body = vec![Cell::new(1, 1)];
        let mut placer = FoodPlacer::seeded(3);

        let seen: HashSet<Cell> = (0..2000)
            .map(|_| placer.place(&body, grid).unwrap())
            .collect();

        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let grid = Grid::new(10, 10).unwrap();
        let mut a = FoodPlacer::seeded(99);
        let mut b = FoodPlacer::seeded(99);

        for _ in 0..10 {
            assert_eq!(
                a.place(std::iter::empty::<&Cell>(), grid),
                b.place(std::iter::empty::<&Cell>(), grid)
            );
        }
    }
}
