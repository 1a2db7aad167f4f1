//! **pathtrace-core** — core types for the grid pathfinding visualizer.
//!
//! Provides the obstacle [`Board`] and [`Coord`] model consumed by the
//! search engine, plus the presentation plumbing shared by front-ends:
//! input messages, the Elm-style application loop, and the character
//! [`Surface`] with frame diffing.

pub mod app;
pub mod board;
pub mod coord;
pub mod display;
pub mod messages;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, cmd};
pub use board::{Board, CellState};
pub use coord::Coord;
pub use display::{Patch, PatchCell, Rgb, Surface, TextStyle, Tile, diff};
pub use messages::{Key, ModMask, MouseAction, Msg};
