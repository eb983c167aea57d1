//! Lane Runner - a three-lane endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, spawning, run state)
//! - `platform`: Input/display collaborator contracts for a host layer
//! - `hud`: Read-only views handed to the presentation layer
//! - `config`: Data-driven game balance

pub mod config;
pub mod error;
pub mod hud;
pub mod platform;
pub mod sim;

pub use config::{GameConfig, LaneTable};
pub use error::ConfigError;
pub use hud::{FrameSnapshot, HudSnapshot};
pub use sim::{Simulation, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lane Y positions: bottom, middle, top
    pub const DEFAULT_LANES: [f32; 3] = [-2.0, 1.0, 4.0];
    /// Points earned per second of survival
    pub const DEFAULT_SCORE_RATE: f32 = 10.0;
}

/// Move `current` toward `target` by fraction `t`, clamped to [0, 1]
#[inline]
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}
