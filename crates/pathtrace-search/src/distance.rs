use pathtrace_core::Coord;

/// Manhattan (L1) distance between two coordinates. Admissible and
/// consistent as a heuristic on a 4-connected unit grid.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    (a.row - b.row).unsigned_abs() + (a.col - b.col).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_basics() {
        assert_eq!(manhattan(Coord::new(0, 0), Coord::new(4, 4)), 8);
        assert_eq!(manhattan(Coord::new(2, 3), Coord::new(2, 3)), 0);
        assert_eq!(manhattan(Coord::new(-1, 0), Coord::new(1, 0)), 2);
        // Symmetric.
        assert_eq!(
            manhattan(Coord::new(1, 7), Coord::new(5, 2)),
            manhattan(Coord::new(5, 2), Coord::new(1, 7))
        );
    }
}
