//! The mission loop.
//!
//! [`run_mission`] drives one agent through one [`Environment`] until the
//! agent stands on the goal or the score falls to the configured floor.
//! Each tick:
//!
//! 1. stop if the score is at or below `min_score`,
//! 2. apply the action chosen last tick (nothing on the first tick, so the
//!    start tile is perceived),
//! 3. deduct the pit penalty if the agent now stands on a pit, else the move
//!    penalty,
//! 4. stop if the agent stands on the goal,
//! 5. let the agent think about what it perceived,
//! 6. sleep for `tick_delay_ms`, if set.

use std::time::Duration;

use pitfall_agents::{AgentError, CostConfig, MazeAgent};
use pitfall_types::{Direction, Location, Symbol};
use pitfall_world::Environment;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::MissionConfig;

/// Errors that can occur when preparing a mission.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    /// The agent could not be built for this maze.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Where a mission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissionState {
    /// Still looking for the goal.
    Exploring,
    /// The agent reached the goal.
    GoalReached,
    /// The score fell to the floor first.
    FloorBreached,
}

/// What happened in one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// Tick number, starting at 0.
    pub tick: u64,
    /// The action applied this tick.
    pub action: Option<Direction>,
    /// Where the agent stands after the action.
    pub location: Location,
    /// The tile perceived there.
    pub tile: Symbol,
    /// Penalty deducted this tick.
    pub penalty: i64,
    /// Score after the penalty.
    pub score: i64,
    /// The action the agent chose for the next tick.
    pub next: Option<Direction>,
    /// Mission state after this tick.
    pub state: MissionState,
}

/// Callback invoked after each tick completes.
///
/// Implementations can render the agent's beliefs, record a replay, and so
/// on. The callback receives the tick summary and the agent.
pub trait TickObserver {
    /// Called after every tick.
    fn on_tick(&mut self, summary: &TickSummary, agent: &MazeAgent);
}

/// A tick observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl TickObserver for NoOpObserver {
    fn on_tick(&mut self, _summary: &TickSummary, _agent: &MazeAgent) {}
}

/// Result of a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionResult {
    /// [`MissionState::GoalReached`] or [`MissionState::FloorBreached`].
    pub state: MissionState,
    /// Final score.
    pub score: i64,
    /// Ticks executed.
    pub ticks: u64,
    /// Location after every tick, in order.
    pub trail: Vec<Location>,
    /// Ticks that ended on a pit.
    pub pit_entries: u64,
}

/// Build an agent for `env` from the masked grid it hands out.
///
/// # Errors
///
/// Returns [`MissionError::Agent`] if the agent rejects the maze or the
/// cost table.
pub fn prepare_agent<E: Environment + ?Sized>(
    env: &E,
    costs: &CostConfig,
) -> Result<MazeAgent, MissionError> {
    let agent = MazeAgent::new(
        env.agent_grid(),
        env.current_location(),
        env.goal_location(),
        costs.clone(),
    )?;
    Ok(agent)
}

/// Run a mission until it reaches a terminal state.
///
/// The mission never ends for lack of a plan: an agent with nothing to do
/// stays in place and pays the move penalty until the floor is reached.
pub fn run_mission<E: Environment + ?Sized>(
    env: &mut E,
    agent: &mut MazeAgent,
    config: &MissionConfig,
    observer: &mut dyn TickObserver,
) -> MissionResult {
    let mut score: i64 = 0;
    let mut tick: u64 = 0;
    let mut trail = Vec::new();
    let mut pit_entries: u64 = 0;
    let mut pending: Option<Direction> = None;

    info!(
        start = %env.current_location(),
        goal = %env.goal_location(),
        min_score = config.min_score,
        "mission starting"
    );

    let state = loop {
        if score <= config.min_score {
            break MissionState::FloorBreached;
        }

        let action = pending.take();
        let observation = env.apply(action);
        let location = observation.location;
        trail.push(location);

        let penalty = if env.is_pit(location) {
            pit_entries = pit_entries.saturating_add(1);
            config.pit_penalty
        } else {
            config.move_penalty
        };
        score = score.saturating_sub(penalty);

        let state = if env.is_goal(location) {
            MissionState::GoalReached
        } else {
            pending = agent.think(&observation);
            MissionState::Exploring
        };

        let summary = TickSummary {
            tick,
            action,
            location,
            tile: observation.tile,
            penalty,
            score,
            next: pending,
            state,
        };
        debug!(
            tick,
            action = ?action,
            at = %location,
            tile = %observation.tile,
            score,
            next = ?pending,
            "tick"
        );
        observer.on_tick(&summary, agent);
        tick = tick.saturating_add(1);

        if state == MissionState::GoalReached {
            break state;
        }
        if config.tick_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(config.tick_delay_ms));
        }
    };

    info!(
        state = ?state,
        score,
        ticks = tick,
        pit_entries,
        "mission ended"
    );

    MissionResult {
        state,
        score,
        ticks: tick,
        trail,
        pit_entries,
    }
}
