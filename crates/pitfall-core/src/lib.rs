//! Configuration and the mission loop for the Pitfall maze agent.
//!
//! This crate wires a [`MazeAgent`](pitfall_agents::MazeAgent) to an
//! [`Environment`](pitfall_world::Environment) and scores the run.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `pitfall-config.yaml` into
//!   strongly-typed structs.
//! - [`mission`] -- [`run_mission`], the tick loop, and the
//!   [`TickObserver`] hook.
//!
//! [`run_mission`]: mission::run_mission
//! [`TickObserver`]: mission::TickObserver

pub mod config;
pub mod mission;

pub use config::{ConfigError, LoggingConfig, MissionConfig, PitfallConfig};
pub use mission::{
    MissionError, MissionResult, MissionState, NoOpObserver, TickObserver, TickSummary,
    prepare_agent, run_mission,
};
