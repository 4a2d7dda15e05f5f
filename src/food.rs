use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BONUS_EAT_RADIUS;
use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Places food items on unoccupied cells by rejection sampling.
///
/// Resampling is unbounded by design: the board stays sparse for the whole
/// life of a session, so a free cell is always a few draws away. Tests bound
/// the loop by construction.
#[derive(Debug)]
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    /// Creates a spawner seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic spawner for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a cell for a regular apple, anywhere on the board not occupied
    /// by the snake.
    pub fn spawn_regular(&mut self, grid: &Grid, snake: &Snake) -> Position {
        loop {
            let candidate = Position {
                x: self.rng.gen_range(0..grid.tile_count()),
                y: self.rng.gen_range(0..grid.tile_count()),
            };
            if grid.is_free(candidate, snake.segments()) {
                return candidate;
            }
        }
    }

    /// Picks an anchor cell for the bonus orange.
    ///
    /// Confined to `[0, tile_count - 2)` per axis so the 2×2 footprint never
    /// hangs off the board edge.
    pub fn spawn_bonus(&mut self, grid: &Grid, snake: &Snake) -> Position {
        let upper = grid.tile_count() - 2;
        loop {
            let candidate = Position {
                x: self.rng.gen_range(0..upper),
                y: self.rng.gen_range(0..upper),
            };
            if grid.is_free(candidate, snake.segments()) {
                return candidate;
            }
        }
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true when `head` is close enough to eat a bonus anchored at
/// `anchor`.
///
/// This is the eating rule, not a rendering detail: the bonus is visually
/// large, so its hitbox is the full Chebyshev-1 region around the anchor.
#[must_use]
pub fn bonus_reaches(head: Position, anchor: Position) -> bool {
    head.chebyshev_distance(anchor) <= BONUS_EAT_RADIUS
}

#[cfg(test)]
mod tests {
    use crate::grid::{Grid, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{bonus_reaches, FoodSpawner};

    fn grid_20() -> Grid {
        Grid::new(400, 20).expect("20×20 grid should be valid")
    }

    #[test]
    fn regular_spawn_never_overlaps_snake() {
        let grid = grid_20();
        let mut spawner = FoodSpawner::with_seed(7);
        let snake = Snake::from_cells(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
            ],
            Direction::Right,
        );

        for _ in 0..200 {
            let position = spawner.spawn_regular(&grid, &snake);
            assert!(!snake.occupies(position));
            assert!(grid.contains(position));
        }
    }

    #[test]
    fn bonus_spawn_avoids_outer_border() {
        let grid = grid_20();
        let mut spawner = FoodSpawner::with_seed(11);
        let snake = Snake::new(Position { x: 10, y: 10 }, Direction::Right);

        for _ in 0..200 {
            let anchor = spawner.spawn_bonus(&grid, &snake);
            assert!(anchor.x >= 0 && anchor.x < grid.tile_count() - 2);
            assert!(anchor.y >= 0 && anchor.y < grid.tile_count() - 2);
            assert!(!snake.occupies(anchor));
        }
    }

    #[test]
    fn spawner_finds_the_single_free_cell() {
        let grid = Grid::new(60, 20).expect("3×3 grid should be valid");
        let mut cells = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if !(x == 2 && y == 2) {
                    cells.push(Position { x, y });
                }
            }
        }
        let snake = Snake::from_cells(cells, Direction::Right);
        let mut spawner = FoodSpawner::with_seed(3);

        let position = spawner.spawn_regular(&grid, &snake);
        assert_eq!(position, Position { x: 2, y: 2 });
    }

    #[test]
    fn bonus_hitbox_is_chebyshev_one() {
        let anchor = Position { x: 8, y: 8 };

        assert!(bonus_reaches(Position { x: 8, y: 8 }, anchor));
        assert!(bonus_reaches(Position { x: 9, y: 7 }, anchor));
        assert!(bonus_reaches(Position { x: 7, y: 9 }, anchor));
        assert!(!bonus_reaches(Position { x: 10, y: 8 }, anchor));
        assert!(!bonus_reaches(Position { x: 6, y: 6 }, anchor));
    }
}
