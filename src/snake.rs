use std::collections::VecDeque;

use crate::grid::{Grid, Position};
use crate::input::Direction;

/// Result of one movement step, reported to the session.
///
/// Wall and self collision are both computed so the caller can resolve them
/// in a fixed order (wall first).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StepOutcome {
    pub new_head: Position,
    pub hit_wall: bool,
    pub hit_self: bool,
}

impl StepOutcome {
    /// Returns true when this step ended the game.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        self.hit_wall || self.hit_self
    }
}

/// Mutable snake state: body cells, heading, and the lag-based growth target.
///
/// The body is ordered head-first; growth raises `max_cells` and manifests
/// over subsequent steps as the tail not shrinking, rather than appearing
/// instantly.
#[derive(Debug, Clone)]
pub struct Snake {
    cells: VecDeque<Position>,
    heading: Direction,
    pending_heading: Option<Direction>,
    max_cells: usize,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided heading.
    #[must_use]
    pub fn new(start: Position, heading: Direction) -> Self {
        let mut cells = VecDeque::new();
        cells.push_front(start);

        Self {
            cells,
            heading,
            pending_heading: None,
            max_cells: 1,
        }
    }

    /// Creates a snake from explicit body cells (front is head), with
    /// `max_cells` equal to the given length.
    #[must_use]
    pub fn from_cells(cells: Vec<Position>, heading: Direction) -> Self {
        let max_cells = cells.len();
        Self {
            cells: VecDeque::from(cells),
            heading,
            pending_heading: None,
            max_cells,
        }
    }

    /// Latches a heading change to be applied at the start of the next step.
    ///
    /// Rejected when the requested axis matches the axis of the latest
    /// latched heading, which covers both the instant 180° reversal and the
    /// redundant same-direction press. Commands arriving between ticks chain:
    /// each validates against the previously accepted one.
    pub fn set_heading(&mut self, direction: Direction) {
        let reference = self.pending_heading.unwrap_or(self.heading);
        if direction.axis() == reference.axis() {
            return;
        }
        self.pending_heading = Some(direction);
    }

    /// Applies one movement step and reports collisions.
    ///
    /// Order matters: the head is pushed and the tail trimmed before the
    /// self-collision scan, so moving into the cell the tail vacates this
    /// exact tick is survivable.
    pub fn advance(&mut self, grid: &Grid) -> StepOutcome {
        if let Some(pending) = self.pending_heading.take() {
            self.heading = pending;
        }

        let new_head = self.head().offset(self.heading);
        self.cells.push_front(new_head);
        if self.cells.len() > self.max_cells {
            let _ = self.cells.pop_back();
        }

        let hit_wall = !grid.contains(new_head);
        let hit_self = self.cells.iter().skip(1).any(|cell| *cell == new_head);

        StepOutcome {
            new_head,
            hit_wall,
            hit_self,
        }
    }

    /// Raises the target length by `n` segments.
    pub fn grow(&mut self, n: usize) {
        self.max_cells += n;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .cells
            .front()
            .expect("snake body must always contain at least one cell")
    }

    /// Returns true if any body cell occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Returns current body cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when there are no body cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the target body length.
    #[must_use]
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Returns the current direction of travel.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Iterates over body cells from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}
