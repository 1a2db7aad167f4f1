//! The interactive visualizer model.
//!
//! Holds the editable board, the selected algorithm, and (while a run is
//! animating) a [`Playback`]. Animation is driven by self-rescheduling
//! tick commands; a serial number on each tick lets the model discard
//! ticks that were scheduled before a pause or restart.

use pathtrace_core::{
    Board, Coord, Effect, Key, Model, Msg, Rgb, Surface, TextStyle, Tile, cmd,
};
use pathtrace_search::{Algorithm, SearchBuffers};

use crate::playback::Playback;

/// Board dimensions.
pub const ROWS: i32 = 20;
pub const COLS: i32 = 20;

/// Terminal surface size: the board plus a status row and two help rows.
pub const WIDTH: i32 = 60;
pub const HEIGHT: i32 = ROWS + 3;

const WALL_FG: Rgb = Rgb::new(0x60, 0x60, 0x70);
const FLOOR_FG: Rgb = Rgb::new(0x3a, 0x3a, 0x42);
const VISITED_FG: Rgb = Rgb::new(0x4f, 0xb8, 0xd8);
const PATH_FG: Rgb = Rgb::new(0xe8, 0xc5, 0x4a);
const START_FG: Rgb = Rgb::new(0x5a, 0xd0, 0x5a);
const END_FG: Rgb = Rgb::new(0xe0, 0x50, 0x50);
const TEXT_FG: Rgb = Rgb::new(0xb0, 0xb0, 0xb8);

/// Animation tick, tagged with the serial it was scheduled under.
struct StepTick(u64);

pub struct Visualizer {
    board: Board,
    buffers: SearchBuffers,
    algorithm: Algorithm,
    playback: Option<Playback>,
    speed: u32,
    tick_serial: u64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            board: Board::new(ROWS, COLS),
            buffers: SearchBuffers::new(ROWS, COLS),
            algorithm: Algorithm::UniformCost,
            playback: None,
            speed: 1,
            tick_serial: 0,
        }
    }

    /// Whether a run is currently revealing cells. A finished run keeps
    /// its overlay but no longer blocks editing.
    fn animating(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| !p.is_done())
    }

    /// Run the selected algorithm and start animating the result.
    /// Ignored while a previous run is still revealing.
    fn start_run(&mut self) -> Option<Effect> {
        if self.animating() {
            log::debug!("run requested while animating, ignored");
            return None;
        }
        let (start, end) = (self.board.start(), self.board.end());
        match self.buffers.search(&self.board, start, end, self.algorithm) {
            Ok(result) => {
                self.playback = Some(Playback::new(result).with_speed(self.speed));
                self.schedule_tick()
            }
            Err(e) => {
                // Board editing keeps endpoints open and in bounds, so
                // this is unreachable in practice.
                log::warn!("search rejected: {e}");
                None
            }
        }
    }

    /// Schedule the next animation tick, if playback wants one. Bumps
    /// the serial so that any previously scheduled tick is discarded on
    /// arrival.
    fn schedule_tick(&mut self) -> Option<Effect> {
        let delay = self.playback.as_ref()?.tick_delay()?;
        self.tick_serial += 1;
        let serial = self.tick_serial;
        Some(cmd(move || {
            std::thread::sleep(delay);
            Some(Msg::custom(StepTick(serial)))
        }))
    }

    fn handle_tick(&mut self, serial: u64) -> Option<Effect> {
        if serial != self.tick_serial {
            return None;
        }
        let pb = self.playback.as_mut()?;
        pb.step();
        if pb.is_done() {
            log::debug!(
                "{} finished: {} visited, path {}",
                self.algorithm,
                pb.visited_shown().len(),
                pb.path_shown().len()
            );
        }
        self.schedule_tick()
    }

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => Some(Effect::End),
            Key::Enter | Key::Char('s') => self.start_run(),
            Key::Tab => {
                self.algorithm = self.algorithm.toggle();
                None
            }
            Key::Space => {
                let pb = self.playback.as_mut()?;
                if pb.is_done() {
                    return None;
                }
                if pb.toggle_pause() {
                    // Invalidate the in-flight tick.
                    self.tick_serial += 1;
                    None
                } else {
                    self.schedule_tick()
                }
            }
            Key::Char('+') => {
                self.speed = (self.speed * 2).min(8);
                if let Some(pb) = self.playback.as_mut() {
                    pb.speed_up();
                }
                None
            }
            Key::Char('-') => {
                self.speed = (self.speed / 2).max(1);
                if let Some(pb) = self.playback.as_mut() {
                    pb.speed_down();
                }
                None
            }
            Key::Char('c') => {
                if !self.animating() {
                    self.board.clear_walls();
                    self.playback = None;
                }
                None
            }
            Key::Char('m') => {
                if !self.animating() {
                    self.scatter_walls();
                    self.playback = None;
                }
                None
            }
            _ => None,
        }
    }

    /// Replace the walls with a random scatter at roughly 1/4 density,
    /// leaving the endpoints open.
    fn scatter_walls(&mut self) {
        use rand::RngExt;

        self.board.clear_walls();
        let mut rng = rand::rng();
        for row in 0..self.board.rows() {
            for col in 0..self.board.cols() {
                if rng.random_bool(0.25) {
                    self.board.set_wall(Coord::new(row, col));
                }
            }
        }
    }

    /// Toggle the wall under a primary click. Board edits are locked
    /// while a run is animating.
    fn handle_click(&mut self, x: i32, y: i32) {
        if self.animating() {
            return;
        }
        let c = Coord::new(y, x);
        if self.board.in_bounds(c) && self.board.toggle_wall(c) {
            self.playback = None;
        }
    }

    fn draw_board(&self, surface: &mut Surface) {
        for row in 0..self.board.rows() {
            for col in 0..self.board.cols() {
                let c = Coord::new(row, col);
                let tile = if self.board.is_wall(c) {
                    Tile::new('█', TextStyle::default().with_fg(WALL_FG))
                } else {
                    Tile::new('·', TextStyle::default().with_fg(FLOOR_FG))
                };
                surface.set(col, row, tile);
            }
        }

        if let Some(pb) = &self.playback {
            let visited = TextStyle::default().with_fg(VISITED_FG);
            for &c in pb.visited_shown() {
                surface.set(c.col, c.row, Tile::new('•', visited));
            }
            let path = TextStyle::default().with_fg(PATH_FG).bold();
            for &c in pb.path_shown() {
                surface.set(c.col, c.row, Tile::new('*', path));
            }
        }

        let start = self.board.start();
        let end = self.board.end();
        surface.set(
            start.col,
            start.row,
            Tile::new('S', TextStyle::default().with_fg(START_FG).bold()),
        );
        surface.set(
            end.col,
            end.row,
            Tile::new('E', TextStyle::default().with_fg(END_FG).bold()),
        );
    }

    fn status_line(&self) -> String {
        let mut s = format!("[{}]", self.algorithm);
        match &self.playback {
            Some(pb) => {
                s.push_str(&format!("  visited {}", pb.visited_shown().len()));
                if pb.is_done() && pb.path_shown().is_empty() {
                    s.push_str("  no path");
                } else {
                    s.push_str(&format!("  path {}", pb.path_shown().len()));
                }
                s.push_str(&format!("  {}x", pb.speed()));
                if pb.is_paused() {
                    s.push_str("  paused");
                }
            }
            None => s.push_str("  walls: click to toggle"),
        }
        s
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse {
                action: pathtrace_core::MouseAction::Main,
                x,
                y,
                ..
            } => {
                self.handle_click(x, y);
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Custom(_) => {
                let serial = msg.downcast_ref::<StepTick>()?.0;
                self.handle_tick(serial)
            }
            _ => None,
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fill(Tile::default());
        self.draw_board(surface);

        let text = TextStyle::default().with_fg(TEXT_FG);
        surface.print(0, ROWS, &self.status_line(), text);
        surface.print(
            0,
            ROWS + 1,
            "enter/s run  tab algorithm  space pause  +/- speed",
            text,
        );
        surface.print(0, ROWS + 2, "c clear  m scatter  q quit", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathtrace_core::{ModMask, MouseAction};
    use std::time::Instant;

    fn click(x: i32, y: i32) -> Msg {
        Msg::Mouse {
            action: MouseAction::Main,
            x,
            y,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// Drive the playback to completion by feeding ticks directly,
    /// without executing the scheduled sleep commands.
    fn run_to_completion(vis: &mut Visualizer) {
        let mut guard = 0;
        while vis.animating() {
            vis.tick_serial += 1;
            vis.handle_tick(vis.tick_serial);
            guard += 1;
            assert!(guard < 10_000, "animation did not terminate");
        }
    }

    #[test]
    fn click_toggles_wall() {
        let mut vis = Visualizer::new();
        let c = Coord::new(3, 5);
        assert!(!vis.board.is_wall(c));
        vis.update(click(5, 3));
        assert!(vis.board.is_wall(c));
        vis.update(click(5, 3));
        assert!(!vis.board.is_wall(c));
    }

    #[test]
    fn click_on_endpoints_is_rejected() {
        let mut vis = Visualizer::new();
        vis.update(click(0, 0));
        assert!(!vis.board.is_wall(vis.board.start()));
        vis.update(click(COLS - 1, ROWS - 1));
        assert!(!vis.board.is_wall(vis.board.end()));
    }

    #[test]
    fn enter_starts_a_run_and_ticks_reveal_cells() {
        let mut vis = Visualizer::new();
        let effect = vis.update(Msg::key(Key::Enter));
        assert!(effect.is_some());
        assert!(vis.animating());
        assert!(vis.playback.as_ref().unwrap().visited_shown().is_empty());

        let effect = vis.handle_tick(vis.tick_serial);
        assert!(effect.is_some());
        assert_eq!(vis.playback.as_ref().unwrap().visited_shown().len(), 1);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut vis = Visualizer::new();
        vis.update(Msg::key(Key::Enter));
        let stale = vis.tick_serial - 1;
        assert!(vis.handle_tick(stale).is_none());
        assert!(vis.playback.as_ref().unwrap().visited_shown().is_empty());
    }

    #[test]
    fn run_rejected_while_animating() {
        let mut vis = Visualizer::new();
        vis.update(Msg::key(Key::Enter));
        let serial_before = vis.tick_serial;
        assert!(vis.update(Msg::key(Key::Enter)).is_none());
        assert_eq!(vis.tick_serial, serial_before);
    }

    #[test]
    fn completed_run_reveals_everything() {
        let mut vis = Visualizer::new();
        vis.update(Msg::key(Key::Enter));
        run_to_completion(&mut vis);
        let pb = vis.playback.as_ref().unwrap();
        // Open 20x20 board: shortest path has 39 cells.
        assert_eq!(pb.path_shown().len(), 39);
        assert!(pb.visited_shown().len() >= 39);
    }

    #[test]
    fn edits_locked_during_animation_unlocked_after() {
        let mut vis = Visualizer::new();
        vis.update(Msg::key(Key::Enter));
        vis.update(click(5, 3));
        assert!(!vis.board.is_wall(Coord::new(3, 5)));

        run_to_completion(&mut vis);
        vis.update(click(5, 3));
        assert!(vis.board.is_wall(Coord::new(3, 5)));
        // Editing the board drops the stale overlay.
        assert!(vis.playback.is_none());
    }

    #[test]
    fn tab_toggles_algorithm() {
        let mut vis = Visualizer::new();
        assert_eq!(vis.algorithm, Algorithm::UniformCost);
        vis.update(Msg::key(Key::Tab));
        assert_eq!(vis.algorithm, Algorithm::Heuristic);
        vis.update(Msg::key(Key::Tab));
        assert_eq!(vis.algorithm, Algorithm::UniformCost);
    }

    #[test]
    fn clear_resets_walls_and_overlay() {
        let mut vis = Visualizer::new();
        vis.update(click(5, 3));
        vis.update(Msg::key(Key::Enter));
        run_to_completion(&mut vis);
        vis.update(Msg::key(Key::Char('c')));
        assert_eq!(vis.board.wall_count(), 0);
        assert!(vis.playback.is_none());
    }

    #[test]
    fn pause_invalidates_pending_tick_and_resume_reschedules() {
        let mut vis = Visualizer::new();
        vis.update(Msg::key(Key::Enter));
        let serial = vis.tick_serial;

        assert!(vis.update(Msg::key(Key::Space)).is_none());
        assert!(vis.playback.as_ref().unwrap().is_paused());
        // The tick that was in flight before the pause no longer lands.
        assert!(vis.handle_tick(serial).is_none());

        let effect = vis.update(Msg::key(Key::Space));
        assert!(effect.is_some());
        assert!(!vis.playback.as_ref().unwrap().is_paused());
    }

    #[test]
    fn speed_keys_clamp_and_persist_across_runs() {
        let mut vis = Visualizer::new();
        for _ in 0..5 {
            vis.update(Msg::key(Key::Char('+')));
        }
        assert_eq!(vis.speed, 8);

        vis.update(Msg::key(Key::Enter));
        assert_eq!(vis.playback.as_ref().unwrap().speed(), 8);

        for _ in 0..5 {
            vis.update(Msg::key(Key::Char('-')));
        }
        assert_eq!(vis.speed, 1);
    }

    #[test]
    fn scatter_leaves_endpoints_open() {
        let mut vis = Visualizer::new();
        vis.update(Msg::key(Key::Char('m')));
        assert!(vis.board.is_open(vis.board.start()));
        assert!(vis.board.is_open(vis.board.end()));
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut vis = Visualizer::new();
        assert!(matches!(
            vis.update(Msg::key(Key::Escape)),
            Some(Effect::End)
        ));
        assert!(matches!(
            vis.update(Msg::key(Key::Char('q'))),
            Some(Effect::End)
        ));
    }

    #[test]
    fn draw_renders_endpoints_and_status() {
        let vis = Visualizer::new();
        let mut surface = Surface::new(WIDTH, HEIGHT);
        vis.draw(&mut surface);
        assert_eq!(surface.at(0, 0).ch, 'S');
        assert_eq!(surface.at(COLS - 1, ROWS - 1).ch, 'E');
        assert_eq!(surface.at(0, ROWS).ch, '[');
    }
}
