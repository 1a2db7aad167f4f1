use pathtrace_core::{Board, Coord};

use crate::distance::manhattan;

/// Neighbour enumeration for a search space, plus the heuristic estimate
/// used by the guided variant.
pub trait Topology {
    /// Append the traversable neighbours of `c` into `buf`, in a fixed
    /// order. The caller clears `buf` before calling.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);

    /// Heuristic estimate of the remaining distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible). The default is
    /// the Manhattan distance, exact up to obstacles on a 4-connected
    /// grid.
    fn estimate(&self, from: Coord, to: Coord) -> u32 {
        manhattan(from, to)
    }
}

impl Topology for Board {
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        Board::neighbors(self, c, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_topology_filters_walls() {
        let mut b = Board::new(3, 3);
        b.set_wall(Coord::new(0, 1));
        let mut buf = Vec::new();
        Topology::neighbors(&b, Coord::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![Coord::new(2, 1), Coord::new(1, 0), Coord::new(1, 2)]
        );
    }

    #[test]
    fn default_estimate_is_manhattan() {
        let b = Board::new(3, 3);
        assert_eq!(b.estimate(Coord::new(0, 0), Coord::new(2, 2)), 4);
    }
}
