//! The maze agent.
//!
//! A [`MazeAgent`] owns everything it believes: the masked grid it was
//! handed, its knowledge base, its epistemic map and its cost table. Each
//! tick it absorbs one observation and answers with one action.

use pitfall_logic::KnowledgeBase;
use pitfall_types::{Cell, Direction, Location, Observation, Symbol};
use pitfall_world::Grid;
use tracing::{debug, info};

use crate::cost::CostConfig;
use crate::epistemic::EpistemicMap;
use crate::error::AgentError;
use crate::inference::Inference;
use crate::planner::{Plan, Planner};

/// A blind agent that navigates by logic.
#[derive(Debug, Clone)]
pub struct MazeAgent {
    /// The maze as the agent was shown it: walls, goal and start.
    grid: Grid,
    /// Where the agent started.
    start: Location,
    /// Where it is going.
    goal: Location,
    /// Where it last perceived itself.
    location: Location,
    /// Clauses known about the maze.
    kb: KnowledgeBase,
    /// Explored, curious, warning and pit sets.
    map: EpistemicMap,
    /// Step costs for planning.
    costs: CostConfig,
    /// The most recent plan.
    last_plan: Option<Plan>,
}

impl MazeAgent {
    /// Create an agent for a maze.
    ///
    /// The start, the goal and every wall are known to be pit-free from the
    /// outset.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotOpen`] if the start or goal is not an open
    /// cell of `grid`, or [`AgentError::InvalidCosts`] if the cost table
    /// fails [`CostConfig::validate`].
    pub fn new(
        grid: Grid,
        start: Location,
        goal: Location,
        costs: CostConfig,
    ) -> Result<Self, AgentError> {
        costs.validate()?;
        for (role, location) in [("start", start), ("goal", goal)] {
            if !grid.is_open(location) {
                return Err(AgentError::NotOpen { role, location });
            }
        }

        let mut kb = KnowledgeBase::new();
        let mut map = EpistemicMap::new();
        let walls: Vec<Location> = grid.find(Cell::Wall).collect();
        let mut inference = Inference::new(&grid, &mut kb, &mut map);
        inference.assert_false(Symbol::Pit, start);
        inference.assert_false(Symbol::Pit, goal);
        for wall in walls {
            inference.assert_false(Symbol::Pit, wall);
        }
        info!(%start, %goal, clauses = kb.len(), "agent ready");

        Ok(Self {
            grid,
            start,
            goal,
            location: start,
            kb,
            map,
            costs,
            last_plan: None,
        })
    }

    /// Absorb an observation and choose the next action.
    ///
    /// Returns `None` at the goal, and when no move is possible.
    pub fn think(&mut self, observation: &Observation) -> Option<Direction> {
        self.location = observation.location;
        Inference::new(&self.grid, &mut self.kb, &mut self.map).absorb(observation);

        let plan = Planner::new(&self.grid, &self.map, &self.costs).plan(self.location, self.goal);
        debug!(
            at = %self.location,
            action = ?plan.action,
            kind = ?plan.kind,
            cost = %plan.cost,
            clauses = self.kb.len(),
            explored = self.map.explored().len(),
            curious = self.map.curious().len(),
            warning = self.map.warning().len(),
            "thought"
        );
        let action = plan.action;
        self.last_plan = Some(plan);
        action
    }

    /// The agent's picture of the maze.
    ///
    /// Walls, goal and start are drawn as given. Elsewhere a confirmed pit
    /// shows `P`, a known safe tile `.`, and a known pit-free warning tile
    /// `1` (preferred) or `2`. Everything else stays `?`.
    pub fn belief_grid(&self) -> Grid {
        let mut belief = self.grid.clone();
        let cells: Vec<Location> = self.grid.locations().collect();
        for at in cells {
            if !matches!(self.grid.cell(at), Some(Cell::Unknown)) {
                continue;
            }
            let pit_free = self.kb.holds(Symbol::Pit, at, false);
            let shown = if self.map.is_pit(at) {
                Cell::Pit
            } else if self.kb.holds(Symbol::Safe, at, true) {
                Cell::Safe
            } else if pit_free && self.kb.holds(Symbol::Warn1, at, true) {
                Cell::Warn1
            } else if pit_free && self.kb.holds(Symbol::Warn2, at, true) {
                Cell::Warn2
            } else {
                continue;
            };
            belief.set(at, shown);
        }
        belief
    }

    /// The knowledge base.
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// The epistemic map.
    pub const fn epistemic(&self) -> &EpistemicMap {
        &self.map
    }

    /// The most recent plan.
    pub const fn last_plan(&self) -> Option<&Plan> {
        self.last_plan.as_ref()
    }

    /// Where the agent last perceived itself.
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Where the agent started.
    pub const fn start(&self) -> Location {
        self.start
    }

    /// The goal.
    pub const fn goal(&self) -> Location {
        self.goal
    }

    /// The cost table in use.
    pub const fn costs(&self) -> &CostConfig {
        &self.costs
    }
}

#[cfg(test)]
mod tests {
    use pitfall_world::WorldError;
    use rust_decimal_macros::dec;

    use super::*;

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    fn masked() -> Result<Grid, WorldError> {
        Ok(Grid::parse(&[
            "XXXXXXX", //
            "X..G..X",
            "X.....X",
            "X..P..X",
            "X.....X",
            "X..@..X",
            "XXXXXXX",
        ])?
        .masked())
    }

    fn agent() -> Result<Option<MazeAgent>, WorldError> {
        Ok(MazeAgent::new(masked()?, loc(3, 5), loc(3, 1), CostConfig::default()).ok())
    }

    #[test]
    fn new_knows_walls_start_and_goal() -> Result<(), WorldError> {
        let Some(agent) = agent()? else {
            return Err(WorldError::EmptyMaze);
        };
        let kb = agent.knowledge();
        assert!(kb.holds(Symbol::Pit, loc(3, 5), false));
        assert!(kb.holds(Symbol::Pit, loc(3, 1), false));
        assert!(kb.holds(Symbol::Pit, loc(0, 0), false));
        assert!(agent.epistemic().promise(loc(3, 1)).is_some());
        assert!(!agent.epistemic().is_tracked(loc(0, 0)));
        Ok(())
    }

    #[test]
    fn new_rejects_bad_setup() -> Result<(), WorldError> {
        let grid = masked()?;
        let walled = MazeAgent::new(grid.clone(), loc(0, 0), loc(3, 1), CostConfig::default());
        assert_eq!(
            walled.err(),
            Some(AgentError::NotOpen {
                role: "start",
                location: loc(0, 0)
            })
        );
        let costs = CostConfig {
            pit: dec!(1),
            ..CostConfig::default()
        };
        let cheap = MazeAgent::new(grid, loc(3, 5), loc(3, 1), costs);
        assert!(matches!(cheap, Err(AgentError::InvalidCosts { .. })));
        Ok(())
    }

    #[test]
    fn first_thought_avoids_the_warning() -> Result<(), WorldError> {
        let Some(mut agent) = agent()? else {
            return Err(WorldError::EmptyMaze);
        };
        let action = agent.think(&Observation::new(loc(3, 5), Symbol::Warn2));
        // All neighbours are pit-free after Warn2; up is the shortest way.
        assert!(action.is_some());
        assert!(agent.epistemic().is_explored(loc(3, 5)));
        assert!(agent.last_plan().is_some());
        Ok(())
    }

    #[test]
    fn thinking_at_goal_stays_put() -> Result<(), WorldError> {
        let Some(mut agent) = agent()? else {
            return Err(WorldError::EmptyMaze);
        };
        let action = agent.think(&Observation::new(loc(3, 1), Symbol::Warn2));
        assert_eq!(action, None);
        assert_eq!(agent.location(), loc(3, 1));
        Ok(())
    }

    #[test]
    fn belief_grid_shows_what_is_known() -> Result<(), WorldError> {
        let Some(mut agent) = agent()? else {
            return Err(WorldError::EmptyMaze);
        };
        agent.think(&Observation::new(loc(3, 5), Symbol::Warn2));
        agent.think(&Observation::new(loc(2, 5), Symbol::Safe));
        let belief = agent.belief_grid();
        assert_eq!(belief.cell(loc(2, 5)), Some(Cell::Safe));
        assert_eq!(belief.cell(loc(3, 5)), Some(Cell::Start));
        assert_eq!(belief.cell(loc(0, 0)), Some(Cell::Wall));
        assert_eq!(belief.cell(loc(3, 1)), Some(Cell::Goal));
        Ok(())
    }
}
