//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `Simulation::tick`
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod lane;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use autopilot::autopilot;
pub use collision::{CollisionBridge, boxes_overlap, player_hits};
pub use difficulty::{DifficultyModel, DifficultyState};
pub use lane::{LaneStep, Obstacle, ObstacleId, Player};
pub use spawner::{
    ObstacleSink, ObstacleSpawn, SpawnBatch, SpawnPlacement, SpawnScheduler, SpawnerPhase,
};
pub use state::{GamePhase, GameStateMachine, RunState, SimEvent};
pub use tick::{Simulation, TickInput};
pub use world::World;
