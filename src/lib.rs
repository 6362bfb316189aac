//! Perfect maze generation on rectangular grids, observable one carved link at a time.
//!
//! A [`Grid`] is a snapshot value. Generators and analyses publish snapshots through a
//! [`report::Reporter`] while they work, and a consumer reads them from a
//! [`report::ReportStream`] before taking the final result.

pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod render;
pub mod report;
pub mod solvers;

pub use error::{MazeError, Result};
pub use generators::{Generator, algorithm_function, algorithm_names, generate_maze};
pub use maze::{Cell, Coord, Direction, Grid};
pub use report::{GridEvent, ReportStream, Reporter};
pub use solvers::{find_distances, find_path};
