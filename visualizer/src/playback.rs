//! Playback of a finished search run.
//!
//! [`Playback`] consumes the complete, already-computed visitation trace
//! and path and reveals them one cell per tick: all stepping logic is
//! synchronous and timer-free, so it is testable headlessly. The model
//! schedules the actual delays as commands using [`Playback::tick_delay`].

use std::time::Duration;

use pathtrace_core::Coord;
use pathtrace_search::SearchResult;

/// Delay between revealed exploration cells at 1× speed.
pub const VISITED_DELAY_MS: u64 = 20;
/// Delay between revealed path cells at 1× speed.
pub const PATH_DELAY_MS: u64 = 50;

const MAX_SPEED: u32 = 8;

/// Which sequence the next tick reveals from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Visited,
    Path,
    Done,
}

/// Animates a [`SearchResult`] cell by cell: the full exploration order
/// first, then the reconstructed path.
pub struct Playback {
    visited: Vec<Coord>,
    path: Vec<Coord>,
    shown_visited: usize,
    shown_path: usize,
    paused: bool,
    speed: u32,
}

impl Playback {
    /// Take ownership of a search result for animation. A run whose end
    /// was unreachable animates its exploration but no path (the
    /// degenerate single-cell path is not a route).
    pub fn new(result: SearchResult) -> Self {
        let path = if result.found { result.path } else { Vec::new() };
        Self {
            visited: result.visited,
            path,
            shown_visited: 0,
            shown_path: 0,
            paused: false,
            speed: 1,
        }
    }

    /// The currently revealed prefix of the visitation trace.
    pub fn visited_shown(&self) -> &[Coord] {
        &self.visited[..self.shown_visited]
    }

    /// The currently revealed prefix of the path.
    pub fn path_shown(&self) -> &[Coord] {
        &self.path[..self.shown_path]
    }

    /// The sequence the next step reveals from.
    pub fn phase(&self) -> Phase {
        if self.shown_visited < self.visited.len() {
            Phase::Visited
        } else if self.shown_path < self.path.len() {
            Phase::Path
        } else {
            Phase::Done
        }
    }

    /// Whether every cell has been revealed.
    pub fn is_done(&self) -> bool {
        self.phase() == Phase::Done
    }

    /// Reveal the next cell. Returns `false` once everything is shown.
    /// Stepping ignores the pause flag; pausing is the scheduler's
    /// concern (see [`tick_delay`](Playback::tick_delay)).
    pub fn step(&mut self) -> bool {
        match self.phase() {
            Phase::Visited => {
                self.shown_visited += 1;
                true
            }
            Phase::Path => {
                self.shown_path += 1;
                true
            }
            Phase::Done => false,
        }
    }

    /// Delay until the next tick, or `None` when paused or done.
    pub fn tick_delay(&self) -> Option<Duration> {
        if self.paused {
            return None;
        }
        let base = match self.phase() {
            Phase::Visited => VISITED_DELAY_MS,
            Phase::Path => PATH_DELAY_MS,
            Phase::Done => return None,
        };
        Some(Duration::from_millis(base / self.speed as u64))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set the speed multiplier, clamped to 1–8. Used to carry the
    /// user's speed choice across runs.
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed.clamp(1, MAX_SPEED);
        self
    }

    /// Current speed multiplier (1–8).
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Double the speed, capped at 8×.
    pub fn speed_up(&mut self) {
        self.speed = (self.speed * 2).min(MAX_SPEED);
    }

    /// Halve the speed, floored at 1×.
    pub fn speed_down(&mut self) {
        self.speed = (self.speed / 2).max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(found: bool) -> SearchResult {
        SearchResult {
            visited: vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)],
            path: if found {
                vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]
            } else {
                vec![Coord::new(0, 0)]
            },
            found,
        }
    }

    #[test]
    fn reveals_visited_then_path_in_order() {
        let mut pb = Playback::new(result(true));
        assert_eq!(pb.phase(), Phase::Visited);
        assert!(pb.visited_shown().is_empty());

        for i in 1..=3 {
            assert!(pb.step());
            assert_eq!(pb.visited_shown().len(), i);
        }
        assert_eq!(pb.phase(), Phase::Path);
        assert_eq!(pb.visited_shown()[0], Coord::new(0, 0));

        for i in 1..=3 {
            assert!(pb.step());
            assert_eq!(pb.path_shown().len(), i);
        }
        assert!(pb.is_done());
        assert!(!pb.step());
    }

    #[test]
    fn unreachable_run_skips_path_phase() {
        let mut pb = Playback::new(result(false));
        while pb.step() {}
        assert_eq!(pb.visited_shown().len(), 3);
        assert!(pb.path_shown().is_empty());
    }

    #[test]
    fn tick_delay_tracks_phase_and_speed() {
        let mut pb = Playback::new(result(true));
        assert_eq!(pb.tick_delay(), Some(Duration::from_millis(VISITED_DELAY_MS)));

        pb.speed_up();
        assert_eq!(
            pb.tick_delay(),
            Some(Duration::from_millis(VISITED_DELAY_MS / 2))
        );

        for _ in 0..3 {
            pb.step();
        }
        assert_eq!(pb.phase(), Phase::Path);
        assert_eq!(
            pb.tick_delay(),
            Some(Duration::from_millis(PATH_DELAY_MS / 2))
        );

        while pb.step() {}
        assert_eq!(pb.tick_delay(), None);
    }

    #[test]
    fn pause_suppresses_scheduling() {
        let mut pb = Playback::new(result(true));
        assert!(pb.toggle_pause());
        assert_eq!(pb.tick_delay(), None);
        assert!(!pb.toggle_pause());
        assert!(pb.tick_delay().is_some());
    }

    #[test]
    fn speed_is_clamped() {
        let mut pb = Playback::new(result(true));
        for _ in 0..10 {
            pb.speed_up();
        }
        assert_eq!(pb.speed(), 8);
        for _ in 0..10 {
            pb.speed_down();
        }
        assert_eq!(pb.speed(), 1);
    }
}
