//! **pathtrace-search** — shortest-path search over an obstacle board.
//!
//! Two algorithm variants on a 4-connected unit grid:
//!
//! - **Uniform-cost** (Dijkstra) search ([`SearchBuffers::uniform_cost`])
//! - **Heuristic-guided** (A*) search ([`SearchBuffers::guided`])
//!
//! Both produce a [`SearchResult`]: the ordered visitation trace (each
//! cell in the order it was finalized) and the reconstructed path. The
//! engine is a pure function of (board, start, end, algorithm) — it holds
//! no state between runs and performs no I/O, so any playback strategy
//! (timed animation, synchronous dump, headless tests) can consume its
//! output uniformly.
//!
//! [`SearchBuffers`] reuses internal allocations across runs; the
//! [`search`] free function is the one-shot entry point.

mod astar;
mod dijkstra;
mod distance;
mod engine;
mod topology;

use std::fmt;

use pathtrace_core::{Board, Coord};

pub use distance::manhattan;
pub use engine::{SearchBuffers, UNREACHABLE};
pub use topology::Topology;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The search variant to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Frontier ordered by accumulated cost alone (Dijkstra).
    UniformCost,
    /// Frontier ordered by accumulated cost plus the Manhattan estimate
    /// to the end (A*).
    Heuristic,
}

impl Algorithm {
    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::UniformCost => "Dijkstra",
            Self::Heuristic => "A*",
        }
    }

    /// The other variant.
    pub fn toggle(self) -> Self {
        match self {
            Self::UniformCost => Self::Heuristic,
            Self::Heuristic => Self::UniformCost,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// The complete output of a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Cells in finalization order. Never empty (contains at least the
    /// start) and never contains a cell twice.
    pub visited: Vec<Coord>,
    /// The reconstructed route from start to end inclusive when `found`,
    /// or the degenerate `[start]` when the end is unreachable.
    pub path: Vec<Coord>,
    /// Whether the end was reached. When `false`, `path` is not a route;
    /// callers must not treat it as one.
    pub found: bool,
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Precondition violations. Unreachable ends are not errors (see
/// [`SearchResult::found`]); these cover malformed input only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the board.
    OutOfBounds(Coord),
    /// An endpoint sits on a wall cell.
    Blocked(Coord),
    /// Start and end coincide.
    CoincidentEndpoints(Coord),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "endpoint {c} is outside the board"),
            Self::Blocked(c) => write!(f, "endpoint {c} is a wall"),
            Self::CoincidentEndpoints(c) => {
                write!(f, "start and end coincide at {c}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

impl SearchBuffers {
    /// Validate preconditions and run the selected algorithm over `board`.
    ///
    /// Fails fast on malformed input instead of producing a meaningless
    /// result; an unreachable end is normal termination.
    pub fn search(
        &mut self,
        board: &Board,
        start: Coord,
        end: Coord,
        algorithm: Algorithm,
    ) -> Result<SearchResult, SearchError> {
        for c in [start, end] {
            if !board.in_bounds(c) {
                return Err(SearchError::OutOfBounds(c));
            }
            if board.is_wall(c) {
                return Err(SearchError::Blocked(c));
            }
        }
        if start == end {
            return Err(SearchError::CoincidentEndpoints(start));
        }

        self.resize(board.rows(), board.cols());
        let result = match algorithm {
            Algorithm::UniformCost => self.uniform_cost(board, start, end),
            Algorithm::Heuristic => self.guided(board, start, end),
        };
        log::debug!(
            "{algorithm} {start}->{end}: visited {} cells, path length {}{}",
            result.visited.len(),
            result.path.len(),
            if result.found { "" } else { " (no route)" },
        );
        Ok(result)
    }
}

/// One-shot search: allocate fresh buffers and run. See
/// [`SearchBuffers::search`] for the precondition and output contract.
pub fn search(
    board: &Board,
    start: Coord,
    end: Coord,
    algorithm: Algorithm,
) -> Result<SearchResult, SearchError> {
    SearchBuffers::new(board.rows(), board.cols()).search(board, start, end, algorithm)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn search_result_round_trip() {
        let board = Board::new(3, 3);
        let result = search(
            &board,
            board.start(),
            board.end(),
            Algorithm::Heuristic,
        )
        .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }

    #[test]
    fn algorithm_round_trip() {
        let json = serde_json::to_string(&Algorithm::UniformCost).unwrap();
        let back: Algorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Algorithm::UniformCost);
    }
}
