//! The Pitfall maze agent.
//!
//! The agent cannot see the tiles of the maze. It is shown the walls, the
//! start and the goal, then perceives one tile per tick at its own
//! location. From those perceptions it builds a propositional knowledge
//! base, draws conclusions with a fixed rule table and resolution, and
//! plans its next step over a cost model that rewards exploring cells known
//! to be pit-free.
//!
//! # Modules
//!
//! - [`agent`] -- [`MazeAgent`], the per-tick think loop.
//! - [`cost`] -- [`CostConfig`], step costs per cell class.
//! - [`epistemic`] -- [`EpistemicMap`], what the agent knows about each cell.
//! - [`error`] -- [`AgentError`].
//! - [`inference`] -- [`Inference`], perception, propagation and consultation.
//! - [`planner`] -- [`Planner`], label-correcting search with frontier fallback.
//! - [`rules`] -- [`Rule`], the propagation table.

pub mod agent;
pub mod cost;
pub mod epistemic;
pub mod error;
pub mod inference;
pub mod planner;
pub mod rules;

pub use agent::MazeAgent;
pub use cost::CostConfig;
pub use epistemic::{CellClass, EpistemicMap};
pub use error::AgentError;
pub use inference::Inference;
pub use planner::{Plan, PlanKind, Planner};
pub use rules::Rule;
