//! Terminal front end for the pathtrace search crates: an editable
//! 20x20 board on which Dijkstra and A* runs are animated cell by cell.

pub mod model;
pub mod playback;

pub use model::{HEIGHT, Visualizer, WIDTH};
pub use playback::{PATH_DELAY_MS, Phase, Playback, VISITED_DELAY_MS};
