//! End-to-end missions over text mazes.
//!
//! Each test builds a [`GridWorld`], prepares an agent from the masked grid
//! it hands out, and runs the full tick loop.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use pitfall_agents::{CostConfig, MazeAgent};
use pitfall_core::{
    MissionConfig, MissionResult, MissionState, NoOpObserver, PitfallConfig, TickObserver,
    TickSummary, prepare_agent, run_mission,
};
use pitfall_types::{Location, Symbol};
use pitfall_world::{Environment, GridWorld};

const SEVEN: [&str; 7] = [
    "XXXXXXX", //
    "X..G..X",
    "X.....X",
    "X..P..X",
    "X.....X",
    "X..@..X",
    "XXXXXXX",
];

const TWO_PITS: [&str; 8] = [
    "XXXXXXXX", //
    "X..G...X",
    "X.X..P.X",
    "X......X",
    "X.P..X.X",
    "X......X",
    "X...@..X",
    "XXXXXXXX",
];

fn run(rows: &[&str], config: &PitfallConfig, observer: &mut dyn TickObserver) -> MissionResult {
    let mut world = GridWorld::parse(rows).unwrap();
    let mut agent = prepare_agent(&world, &config.costs).unwrap();
    run_mission(&mut world, &mut agent, &config.mission, observer)
}

/// Checks, after every tick, that the agent only ever learns.
#[derive(Default)]
struct Monotone {
    explored: BTreeSet<Location>,
    pits: BTreeSet<Location>,
    clauses: usize,
    ticks: usize,
}

impl TickObserver for Monotone {
    fn on_tick(&mut self, _summary: &TickSummary, agent: &MazeAgent) {
        let map = agent.epistemic();
        assert!(self.explored.is_subset(map.explored()));
        assert!(self.pits.is_subset(map.pits()));
        assert!(agent.knowledge().len() >= self.clauses);
        for location in map.curious().keys() {
            assert!(!map.is_explored(*location));
            assert!(!map.is_pit(*location));
            assert!(agent.knowledge().holds(Symbol::Pit, *location, false));
        }
        for location in map.warning() {
            assert!(!map.is_explored(*location));
            assert!(map.promise(*location).is_none());
        }
        self.explored.clone_from(map.explored());
        self.pits.clone_from(map.pits());
        self.clauses = agent.knowledge().len();
        self.ticks = self.ticks.saturating_add(1);
    }
}

#[test]
fn seven_by_seven_reaches_goal_without_falling() {
    let config = PitfallConfig::default();
    let mut monotone = Monotone::default();
    let result = run(&SEVEN, &config, &mut monotone);

    assert_eq!(result.state, MissionState::GoalReached);
    assert_eq!(result.pit_entries, 0);
    assert!(!result.trail.contains(&Location::new(3, 3)));
    assert_eq!(result.trail.first(), Some(&Location::new(3, 5)));
    assert_eq!(result.trail.last(), Some(&Location::new(3, 1)));
    assert!(result.score > config.mission.min_score);
    assert_eq!(monotone.ticks, usize::try_from(result.ticks).unwrap());
}

#[test]
fn trail_moves_one_step_at_a_time() {
    let result = run(&SEVEN, &PitfallConfig::default(), &mut NoOpObserver);
    for pair in result.trail.windows(2) {
        let [a, b] = pair else { continue };
        assert!(a == b || a.neighbors().any(|(_, n)| n == *b), "{a} -> {b}");
    }
}

#[test]
fn missions_are_deterministic() {
    let config = PitfallConfig::default();
    let first = run(&TWO_PITS, &config, &mut NoOpObserver);
    let second = run(&TWO_PITS, &config, &mut NoOpObserver);
    assert_eq!(first, second);
}

#[test]
fn two_pit_maze_ends() {
    let config = PitfallConfig::default();
    let mut monotone = Monotone::default();
    let result = run(&TWO_PITS, &config, &mut monotone);
    assert_ne!(result.state, MissionState::Exploring);
    assert_eq!(monotone.ticks, usize::try_from(result.ticks).unwrap());
    if result.state == MissionState::GoalReached {
        assert_eq!(result.trail.last(), Some(&Location::new(3, 1)));
    }
}

#[test]
fn yaml_penalties_drive_the_score() {
    let yaml = "mission:\n  move_penalty: 2\n";
    let config = PitfallConfig::parse(yaml).unwrap();
    let result = run(&["XXXXX", "X@.GX", "XXXXX"], &config, &mut NoOpObserver);
    assert_eq!(result.state, MissionState::GoalReached);
    assert_eq!(result.ticks, 3);
    assert_eq!(result.score, -6);
}

#[test]
fn agent_sees_only_the_masked_grid() {
    let world = GridWorld::parse(&SEVEN).unwrap();
    let agent = prepare_agent(&world, &CostConfig::default()).unwrap();
    assert_eq!(agent.location(), world.current_location());
    assert_eq!(agent.goal(), world.goal_location());
    assert_eq!(
        agent.belief_grid().to_string(),
        [
            "XXXXXXX", //
            "X??G??X",
            "X?????X",
            "X?????X",
            "X?????X",
            "X??@??X",
            "XXXXXXX",
        ]
        .join("\n")
    );
}

#[test]
fn floor_ends_a_hopeless_mission() {
    let config = MissionConfig {
        min_score: -3,
        ..MissionConfig::default()
    };
    let mut world = GridWorld::parse(&["XXXXX", "X@XGX", "XXXXX"]).unwrap();
    let mut agent = prepare_agent(&world, &CostConfig::default()).unwrap();
    let result = run_mission(&mut world, &mut agent, &config, &mut NoOpObserver);
    assert_eq!(result.state, MissionState::FloorBreached);
    assert_eq!(result.ticks, 3);
}
