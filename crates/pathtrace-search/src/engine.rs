//! Reusable search state: the flat node array, the frontier entry type,
//! and index/coordinate mapping.
//!
//! [`SearchBuffers`] owns all per-run allocations and invalidates them
//! lazily with a generation counter, so repeated runs on the same board
//! size allocate only the output vectors.

use pathtrace_core::Coord;

/// Sentinel cost meaning "not yet improved".
pub const UNREACHABLE: u32 = u32::MAX;

/// Per-cell search state, addressed by flat cell index.
#[derive(Clone)]
pub(crate) struct Node {
    /// Accumulated cost from the start.
    pub(crate) g: u32,
    /// Frontier ordering key (equals `g` for the uniform-cost variant).
    pub(crate) f: u32,
    /// Flat index of the predecessor, `usize::MAX` for the start.
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    /// Discovered and pending in the frontier. Cleared on finalization;
    /// a popped entry whose node is no longer open is a stale duplicate.
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Frontier entry, ordered for use in a max-[`BinaryHeap`]: the smallest
/// `f` pops first, ties broken by insertion order (`seq`), which makes the
/// visitation trace deterministic.
///
/// [`BinaryHeap`]: std::collections::BinaryHeap
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct HeapEntry {
    pub(crate) idx: usize,
    pub(crate) f: u32,
    pub(crate) seq: u64,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchBuffers
// ---------------------------------------------------------------------------

/// Reusable state for repeated searches over boards of a given size.
///
/// Holds no semantic state between runs: each run bumps the generation
/// counter, which lazily invalidates every node.
pub struct SearchBuffers {
    rows: i32,
    cols: i32,
    pub(crate) nodes: Vec<Node>,
    generation: u32,
    /// Scratch buffer for neighbour queries.
    pub(crate) nbuf: Vec<Coord>,
}

impl SearchBuffers {
    /// Create buffers for an `rows` × `cols` board.
    pub fn new(rows: i32, cols: i32) -> Self {
        let len = (rows.max(0) as usize) * (cols.max(0) as usize);
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
            nodes: vec![Node::default(); len],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Adapt the buffers to a new board size. If the new cell count fits
    /// within the existing allocation only the mapping changes; otherwise
    /// the node array is reallocated.
    pub fn resize(&mut self, rows: i32, cols: i32) {
        self.rows = rows.max(0);
        self.cols = cols.max(0);
        let len = (self.rows as usize) * (self.cols as usize);
        if len > self.nodes.len() {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
    }

    /// Begin a run: bump the generation, invalidating all nodes.
    pub(crate) fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Flat index of `c`, or `None` if outside the buffer dimensions.
    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }

    /// Coordinate of a flat index.
    #[inline]
    pub(crate) fn coord(&self, idx: usize) -> Coord {
        Coord::new(idx as i32 / self.cols, idx as i32 % self.cols)
    }

    /// Rebuild the path by walking parent links back from `goal`.
    ///
    /// When the goal was never reached the path degrades to `[start]`;
    /// callers flag that case explicitly rather than error.
    pub(crate) fn reconstruct(&self, start: Coord, goal: Coord, found: bool) -> Vec<Coord> {
        if !found {
            return vec![start];
        }
        let mut path = Vec::new();
        let mut ci = match self.idx(goal) {
            Some(i) => i,
            None => return vec![start],
        };
        while ci != usize::MAX {
            path.push(self.coord(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_smallest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { idx: 0, f: 5, seq: 0 });
        heap.push(HeapEntry { idx: 1, f: 2, seq: 1 });
        heap.push(HeapEntry { idx: 2, f: 9, seq: 2 });
        assert_eq!(heap.pop().unwrap().idx, 1);
        assert_eq!(heap.pop().unwrap().idx, 0);
        assert_eq!(heap.pop().unwrap().idx, 2);
    }

    #[test]
    fn heap_ties_break_by_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { idx: 7, f: 3, seq: 2 });
        heap.push(HeapEntry { idx: 4, f: 3, seq: 0 });
        heap.push(HeapEntry { idx: 5, f: 3, seq: 1 });
        assert_eq!(heap.pop().unwrap().idx, 4);
        assert_eq!(heap.pop().unwrap().idx, 5);
        assert_eq!(heap.pop().unwrap().idx, 7);
    }

    #[test]
    fn idx_coord_round_trip() {
        let buf = SearchBuffers::new(4, 7);
        for row in 0..4 {
            for col in 0..7 {
                let c = Coord::new(row, col);
                let i = buf.idx(c).unwrap();
                assert_eq!(buf.coord(i), c);
            }
        }
        assert!(buf.idx(Coord::new(4, 0)).is_none());
        assert!(buf.idx(Coord::new(0, 7)).is_none());
        assert!(buf.idx(Coord::new(-1, 0)).is_none());
    }

    #[test]
    fn resize_within_capacity_keeps_allocation() {
        let mut buf = SearchBuffers::new(10, 10);
        let cap = buf.nodes.len();
        buf.resize(5, 5);
        assert_eq!(buf.nodes.len(), cap);
        buf.resize(20, 20);
        assert_eq!(buf.nodes.len(), 400);
    }
}
