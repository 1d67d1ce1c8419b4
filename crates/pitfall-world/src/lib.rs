//! Maze grids and the simulator boundary for the Pitfall maze agent.
//!
//! The agent never sees the true maze. It receives a masked [`Grid`] at the
//! start of a mission and one [`Observation`] per tick from whatever
//! implements [`Environment`]. [`GridWorld`] is the reference simulator used
//! by the tests and the demo engine.
//!
//! # Modules
//!
//! - [`environment`] -- The [`Environment`] trait the mission loop drives.
//! - [`error`] -- Error types for maze parsing.
//! - [`grid`] -- [`Grid`]: a rectangular maze of [`Cell`]s with bounds-checked
//!   access and row-major iteration.
//! - [`grid_world`] -- [`GridWorld`]: a fixed text maze with hidden pits.
//!
//! [`Cell`]: pitfall_types::Cell
//! [`Observation`]: pitfall_types::Observation

pub mod environment;
pub mod error;
pub mod grid;
pub mod grid_world;

pub use environment::Environment;
pub use error::WorldError;
pub use grid::Grid;
pub use grid_world::GridWorld;
