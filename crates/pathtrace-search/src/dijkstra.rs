use std::collections::BinaryHeap;

use pathtrace_core::Coord;

use crate::SearchResult;
use crate::engine::{HeapEntry, SearchBuffers, UNREACHABLE};
use crate::topology::Topology;

impl SearchBuffers {
    /// Uniform-cost (Dijkstra) search from `from` to `to`.
    ///
    /// The frontier pops the lowest accumulated cost first, so the
    /// visitation trace is non-decreasing in cost. Improving relaxations
    /// push fresh frontier entries without removing stale ones; a popped
    /// entry whose node is already finalized is discarded, never
    /// re-appended to the trace.
    pub fn uniform_cost<T: Topology>(&mut self, topo: &T, from: Coord, to: Coord) -> SearchResult {
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

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<HeapEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(HeapEntry {
            idx: start_idx,
            f: 0,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale duplicates of already-finalized cells.
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
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                n.g = tentative;
                n.f = tentative;
                n.parent = ci;
                n.open = true;

                seq += 1;
                open.push(HeapEntry {
                    idx: ni,
                    f: tentative,
                    seq,
                });
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
