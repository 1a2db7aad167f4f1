use std::collections::BinaryHeap;

use pathtrace_core::Coord;

use crate::SearchResult;
use crate::engine::{HeapEntry, SearchBuffers, UNREACHABLE};
use crate::topology::Topology;

impl SearchBuffers {
    /// Heuristic-guided (A*) search from `from` to `to`.
    ///
    /// Same structure as the uniform-cost variant, with two differences:
    /// the frontier orders by `g + estimate` rather than raw cost, and a
    /// neighbour already pending in the open set is updated in place
    /// instead of gaining a second frontier entry (expansion reads the
    /// node array, not the stale entry, so the improved values are used
    /// when it pops). With an admissible, consistent estimate the first
    /// pop of the goal carries an optimal cost.
    pub fn guided<T: Topology>(&mut self, topo: &T, from: Coord, to: Coord) -> SearchResult {
        let cur_gen = self.begin();
        let mut visited = Vec::new();
        let mut found = false;

        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return SearchResult {
                visited,
                path: vec![from],
                found: false,
            };
        };

        let start_f = topo.estimate(from, to);
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = start_f;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<HeapEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(HeapEntry {
            idx: start_idx,
            f: start_f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;

            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }
            self.nodes[ci].open = false;

            let cp = self.coord(ci);
            visited.push(cp);
            if ci == goal_idx {
                found = true;
                break;
            }

            let current_g = self.nodes[ci].g;

            nbuf.clear();
            topo.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + 1;

                let n = &mut self.nodes[ni];
                let already_open = if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                    n.open
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                    false
                };

                n.g = tentative;
                n.f = tentative + topo.estimate(np, to);
                n.parent = ci;
                n.open = true;

                if !already_open {
                    seq += 1;
                    open.push(HeapEntry {
                        idx: ni,
                        f: n.f,
                        seq,
                    });
                }
            }
        }

        self.nbuf = nbuf;

        let path = self.reconstruct(from, to, found);
        SearchResult {
            visited,
            path,
            found,
        }
    }
}
