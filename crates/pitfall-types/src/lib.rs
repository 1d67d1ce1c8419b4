//! Shared type definitions for the Pitfall maze agent.
//!
//! This crate is the single source of truth for the small value types that
//! cross every boundary in the workspace: the simulator hands out
//! [`Observation`]s, the knowledge base reasons about [`Symbol`]s at
//! [`Location`]s, and the planner answers with a [`Direction`].
//!
//! # Modules
//!
//! - [`location`] -- Grid coordinates and neighbour enumeration
//! - [`enums`] -- Directions, run symbols, and grid cell characters
//! - [`observation`] -- The per-tick record delivered by the simulator

pub mod enums;
pub mod location;
pub mod observation;

// Re-export all public types at crate root for convenience.
pub use enums::{Cell, Direction, Symbol};
pub use location::Location;
pub use observation::Observation;
