//! Tick observer that logs each tick and the agent's picture of the maze.

use pitfall_agents::MazeAgent;
use pitfall_core::{TickObserver, TickSummary};
use tracing::{debug, info};

/// Logs a line per tick, and the belief grid at debug level.
pub struct BeliefLog {
    maze: String,
}

impl BeliefLog {
    /// Create a logger for the named maze.
    pub fn new(maze: impl Into<String>) -> Self {
        Self { maze: maze.into() }
    }
}

impl TickObserver for BeliefLog {
    fn on_tick(&mut self, summary: &TickSummary, agent: &MazeAgent) {
        info!(
            maze = %self.maze,
            tick = summary.tick,
            at = %summary.location,
            tile = %summary.tile,
            score = summary.score,
            next = ?summary.next,
            "tick"
        );
        debug!(maze = %self.maze, tick = summary.tick, "belief\n{}", agent.belief_grid());
    }
}
