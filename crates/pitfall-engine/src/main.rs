//! Demo binary for the Pitfall maze agent.
//!
//! Runs the agent over text mazes and prints one JSON result per maze.
//!
//! ```text
//! pitfall-engine                 # the built-in demo mazes
//! pitfall-engine a.txt b.txt     # mazes read from files
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `pitfall-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing) at the configured level
//! 3. For each maze: build the world, prepare the agent, run the mission
//! 4. Print the mission result

mod belief_log;
mod mazes;

use std::path::Path;

use anyhow::Context;
use pitfall_core::{LoggingConfig, MissionResult, PitfallConfig, prepare_agent, run_mission};
use pitfall_world::GridWorld;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::belief_log::BeliefLog;
use crate::mazes::DEMOS;

const CONFIG_PATH: &str = "pitfall-config.yaml";

fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config.logging);
    info!(
        min_score = config.mission.min_score,
        pit_penalty = config.mission.pit_penalty,
        move_penalty = config.mission.move_penalty,
        tick_delay_ms = config.mission.tick_delay_ms,
        "pitfall-engine starting"
    );

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        for demo in DEMOS {
            let world = GridWorld::parse(demo.rows)
                .with_context(|| format!("demo maze {} is malformed", demo.name))?;
            report(demo.name, &run(demo.name, world, &config)?)?;
        }
    } else {
        for path in &paths {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read maze {path}"))?;
            let world: GridWorld = text
                .parse()
                .with_context(|| format!("failed to parse maze {path}"))?;
            report(path, &run(path, world, &config)?)?;
        }
    }
    Ok(())
}

/// Load `pitfall-config.yaml` from the working directory, or defaults.
fn load_config() -> anyhow::Result<PitfallConfig> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        PitfallConfig::from_file(path).with_context(|| format!("failed to load {CONFIG_PATH}"))
    } else {
        let mut config = PitfallConfig::default();
        config.logging.apply_env_override();
        Ok(config)
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(name: &str, mut world: GridWorld, config: &PitfallConfig) -> anyhow::Result<MissionResult> {
    let mut agent = prepare_agent(&world, &config.costs)
        .with_context(|| format!("cannot prepare agent for {name}"))?;
    let mut observer = BeliefLog::new(name);
    Ok(run_mission(&mut world, &mut agent, &config.mission, &mut observer))
}

fn report(name: &str, result: &MissionResult) -> anyhow::Result<()> {
    if result.pit_entries > 0 {
        warn!(maze = name, pit_entries = result.pit_entries, "agent fell into a pit");
    }
    let line = serde_json::json!({ "maze": name, "result": result });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
