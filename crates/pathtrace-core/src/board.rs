//! The obstacle [`Board`]: an R×C matrix of open/wall cells with designated
//! start and end coordinates.
//!
//! The board enforces its own invariants: start and end are distinct, always
//! in bounds, and always open. Wall mutations on either endpoint are
//! rejected rather than silently applied.

use crate::coord::Coord;

/// The state of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open,
    Wall,
}

/// A fixed-size obstacle grid with start and end cells.
///
/// Pure data: lookups and guarded mutation, no path logic. It is read-only
/// input while a search runs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: Vec<CellState>,
    rows: i32,
    cols: i32,
    start: Coord,
    end: Coord,
}

impl Board {
    /// Create an all-open board with start at the top-left corner and end
    /// at the bottom-right.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive or the board has fewer
    /// than two cells (start and end must be distinct).
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive");
        assert!(
            (rows as i64) * (cols as i64) >= 2,
            "board needs at least two cells"
        );
        Self {
            cells: vec![CellState::Open; (rows * cols) as usize],
            rows,
            cols,
            start: Coord::ZERO,
            end: Coord::new(rows - 1, cols - 1),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total cell count.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The start coordinate.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// The end coordinate.
    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Whether `c` lies within the board.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        (c.row * self.cols + c.col) as usize
    }

    /// The state of the cell at `c`, or `None` if out of bounds.
    pub fn state(&self, c: Coord) -> Option<CellState> {
        if !self.in_bounds(c) {
            return None;
        }
        Some(self.cells[self.index(c)])
    }

    /// Whether the cell at `c` is a wall. Out-of-bounds coordinates are
    /// not walls (they are simply not cells).
    #[inline]
    pub fn is_wall(&self, c: Coord) -> bool {
        self.state(c) == Some(CellState::Wall)
    }

    /// Whether the cell at `c` is in bounds and open.
    #[inline]
    pub fn is_open(&self, c: Coord) -> bool {
        self.state(c) == Some(CellState::Open)
    }

    /// Move the start and end cells. Returns `false` (leaving the board
    /// unchanged) if either is out of bounds or they coincide. On success
    /// both cells are forced open.
    pub fn set_endpoints(&mut self, start: Coord, end: Coord) -> bool {
        if start == end || !self.in_bounds(start) || !self.in_bounds(end) {
            return false;
        }
        self.start = start;
        self.end = end;
        let si = self.index(start);
        let ei = self.index(end);
        self.cells[si] = CellState::Open;
        self.cells[ei] = CellState::Open;
        true
    }

    /// Toggle the wall state at `c`. Returns whether anything changed:
    /// out-of-bounds coordinates and the start/end cells are rejected.
    pub fn toggle_wall(&mut self, c: Coord) -> bool {
        if !self.in_bounds(c) || c == self.start || c == self.end {
            return false;
        }
        let i = self.index(c);
        self.cells[i] = match self.cells[i] {
            CellState::Open => CellState::Wall,
            CellState::Wall => CellState::Open,
        };
        true
    }

    /// Place a wall at `c`, subject to the same guards as
    /// [`toggle_wall`](Board::toggle_wall).
    pub fn set_wall(&mut self, c: Coord) -> bool {
        if !self.in_bounds(c) || c == self.start || c == self.end {
            return false;
        }
        let i = self.index(c);
        self.cells[i] = CellState::Wall;
        true
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        self.cells.fill(CellState::Open);
    }

    /// Count of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&s| s == CellState::Wall)
            .count()
    }

    /// Append the in-bounds, open orthogonal neighbours of `c` to `buf`,
    /// in the fixed order up, down, left, right. The caller clears `buf`
    /// beforehand. A cell with no open neighbour appends nothing; that is
    /// a dead end, not an error.
    pub fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for n in c.orthogonal() {
            if self.is_open(n) {
                buf.push(n);
            }
        }
    }
}
