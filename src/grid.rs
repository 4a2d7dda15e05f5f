use thiserror::Error;

use crate::input::Direction;

/// Grid position in logical tile coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the neighboring position one tile in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance: maximum of the per-axis absolute differences.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Invalid grid configuration, rejected at construction.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum GridError {
    #[error("tile size must be non-zero")]
    ZeroTileSize,
    #[error("display size must be non-zero")]
    ZeroDisplaySize,
    #[error("display size {display} is not an exact multiple of tile size {tile}")]
    UnevenTiles { display: u32, tile: u32 },
    #[error("{0}×{0} tiles is too small to place a bonus item")]
    TooSmall(u32),
    #[error("{0} tiles per axis exceeds the supported coordinate range")]
    TooLarge(u32),
}

/// Immutable square coordinate space shared by every entity.
///
/// All entity coordinates lie in `[0, tile_count)` on both axes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    tile_size: u32,
    tile_count: i32,
}

impl Grid {
    /// Derives the grid from a display size and tile size.
    ///
    /// The division must be exact; a truncated tile count would silently
    /// shrink the board.
    pub fn new(display_size: u32, tile_size: u32) -> Result<Self, GridError> {
        if tile_size == 0 {
            return Err(GridError::ZeroTileSize);
        }
        if display_size == 0 {
            return Err(GridError::ZeroDisplaySize);
        }
        if display_size % tile_size != 0 {
            return Err(GridError::UnevenTiles {
                display: display_size,
                tile: tile_size,
            });
        }

        let tile_count = display_size / tile_size;
        // The bonus spawn range [0, tile_count - 2) must be non-empty.
        if tile_count < 3 {
            return Err(GridError::TooSmall(tile_count));
        }

        Ok(Self {
            tile_size,
            tile_count: i32::try_from(tile_count).map_err(|_| GridError::TooLarge(tile_count))?,
        })
    }

    /// Returns the number of tiles per axis.
    #[must_use]
    pub fn tile_count(&self) -> i32 {
        self.tile_count
    }

    /// Returns the tile edge length in display pixels.
    #[must_use]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Returns true when the position lies inside the board.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.tile_count
            && position.y < self.tile_count
    }

    /// Returns true when the position is inside the board and not among
    /// `occupied`.
    #[must_use]
    pub fn is_free<'a, I>(&self, position: Position, occupied: I) -> bool
    where
        I: IntoIterator<Item = &'a Position>,
    {
        self.contains(position) && !occupied.into_iter().any(|cell| *cell == position)
    }

    /// Returns the center tile, where a new snake starts.
    #[must_use]
    pub fn center(&self) -> Position {
        Position {
            x: self.tile_count / 2,
            y: self.tile_count / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, GridError, Position};

    #[test]
    fn grid_derives_tile_count_from_exact_division() {
        let grid = Grid::new(400, 20).expect("400/20 grid should be valid");
        assert_eq!(grid.tile_count(), 20);
        assert_eq!(grid.center(), Position { x: 10, y: 10 });
    }

    #[test]
    fn grid_rejects_invalid_configuration() {
        assert_eq!(Grid::new(400, 0), Err(GridError::ZeroTileSize));
        assert_eq!(Grid::new(0, 20), Err(GridError::ZeroDisplaySize));
        assert_eq!(
            Grid::new(410, 20),
            Err(GridError::UnevenTiles {
                display: 410,
                tile: 20
            })
        );
        assert_eq!(Grid::new(40, 20), Err(GridError::TooSmall(2)));
    }

    #[test]
    fn contains_covers_bounds_exclusively() {
        let grid = Grid::new(100, 20).expect("5×5 grid should be valid");

        assert!(grid.contains(Position { x: 0, y: 0 }));
        assert!(grid.contains(Position { x: 4, y: 4 }));
        assert!(!grid.contains(Position { x: 5, y: 0 }));
        assert!(!grid.contains(Position { x: 0, y: -1 }));
    }

    #[test]
    fn is_free_excludes_occupied_cells() {
        let grid = Grid::new(100, 20).expect("5×5 grid should be valid");
        let occupied = vec![Position { x: 1, y: 1 }, Position { x: 2, y: 1 }];

        assert!(!grid.is_free(Position { x: 1, y: 1 }, &occupied));
        assert!(grid.is_free(Position { x: 3, y: 1 }, &occupied));
        assert!(!grid.is_free(Position { x: 5, y: 5 }, &occupied));
    }

    #[test]
    fn chebyshev_distance_takes_axis_maximum() {
        let anchor = Position { x: 4, y: 4 };

        assert_eq!(anchor.chebyshev_distance(Position { x: 4, y: 4 }), 0);
        assert_eq!(anchor.chebyshev_distance(Position { x: 5, y: 3 }), 1);
        assert_eq!(anchor.chebyshev_distance(Position { x: 7, y: 5 }), 3);
    }
}
