//! Error types for the pitfall-agents crate.
//!
//! Thinking never fails: an agent always answers with an action or with
//! "no action". Errors arise only when an agent is set up with a maze or a
//! cost table it cannot work with.

use pitfall_types::Location;

/// Errors that can occur while building a maze agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The start or goal does not lie on an open cell of the maze.
    #[error("{role} {location} is not an open maze cell")]
    NotOpen {
        /// `"start"` or `"goal"`.
        role: &'static str,
        /// The offending location.
        location: Location,
    },

    /// The cost table would make the planner prefer dangerous cells.
    #[error("invalid cost table: {reason}")]
    InvalidCosts {
        /// Which ordering is violated.
        reason: String,
    },
}
