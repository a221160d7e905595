//! **eller_mazes** generates perfect mazes one row at a time with Eller's algorithm.
//!
//! Only the row under construction is ever held in memory. Finished rows are handed to a
//! [`RowSink`](sinks/trait.RowSink.html), which may stream them out as text or an image, count
//! them, or collect them into a [`MazeGrid`](grid/struct.MazeGrid.html).

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod random;
pub mod renderers;
pub mod row_state;
pub mod sinks;
pub mod units;
mod utils;

pub use crate::cells::Cell;
pub use crate::config::MazeConfig;
pub use crate::generators::{generate, EngineState, MazeEngine};
pub use crate::grid::MazeGrid;
pub use crate::sinks::RowSink;
