//! Game configuration and tunables
//!
//! Loaded from JSON; every section falls back to the stock tuning when a field
//! is missing.

use std::ops::Index;
use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{
    ConfigError, ensure_finite, ensure_non_negative, ensure_ordered, ensure_positive,
};

/// Ordered lane Y positions, shared read-only by the player and the spawner.
///
/// Cloning is cheap; every clone views the same table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct LaneTable(Arc<[f32]>);

impl LaneTable {
    pub fn new(lanes: Vec<f32>) -> Result<Self, ConfigError> {
        if lanes.is_empty() {
            return Err(ConfigError::EmptyLaneTable);
        }
        for &y in &lanes {
            ensure_finite("lanes", y)?;
        }
        Ok(Self(lanes.into()))
    }

    /// Number of lanes (always at least one)
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Y position of a lane, if the index is in range
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// Index of the topmost lane
    #[inline]
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }

    /// True when both tables view the same allocation
    pub fn shares_storage(&self, other: &LaneTable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Index<usize> for LaneTable {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl TryFrom<Vec<f32>> for LaneTable {
    type Error = ConfigError;

    fn try_from(lanes: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(lanes)
    }
}

impl From<LaneTable> for Vec<f32> {
    fn from(table: LaneTable) -> Self {
        table.0.to_vec()
    }
}

impl Default for LaneTable {
    fn default() -> Self {
        Self(DEFAULT_LANES.to_vec().into())
    }
}

/// Difficulty ramp tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Obstacle speed at the start of a run (units/s)
    pub initial_speed: f32,
    /// Speed cap
    pub max_speed: f32,
    /// Speed added per speed ramp
    pub speed_increment: f32,
    /// Seconds between speed ramps
    pub speed_ramp_period: f32,

    /// Starting spawn interval bounds (seconds)
    pub interval_min: f32,
    pub interval_max: f32,
    /// Lowest values the interval bounds can ramp down to
    pub interval_floor_min: f32,
    pub interval_floor_max: f32,
    /// Seconds subtracted from both bounds per interval ramp
    pub interval_reduction: f32,
    /// Seconds between interval ramps (also drives the dual-spawn chance)
    pub interval_ramp_period: f32,

    /// Extra-obstacle chance in percent (0-100)
    pub dual_chance: f32,
    pub dual_chance_increment: f32,
    pub dual_chance_max: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_speed: 12.0,
            max_speed: 25.0,
            speed_increment: 2.0,
            speed_ramp_period: 3.0,

            interval_min: 0.3,
            interval_max: 0.7,
            interval_floor_min: 0.15,
            interval_floor_max: 0.3,
            interval_reduction: 0.15,
            interval_ramp_period: 5.0,

            dual_chance: 30.0,
            dual_chance_increment: 15.0,
            dual_chance_max: 80.0,
        }
    }
}

impl DifficultyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("difficulty.initial_speed", self.initial_speed)?;
        ensure_positive("difficulty.max_speed", self.max_speed)?;
        ensure_ordered("difficulty.speed", self.initial_speed, self.max_speed)?;
        ensure_non_negative("difficulty.speed_increment", self.speed_increment)?;
        ensure_positive("difficulty.speed_ramp_period", self.speed_ramp_period)?;

        ensure_positive("difficulty.interval_min", self.interval_min)?;
        ensure_positive("difficulty.interval_max", self.interval_max)?;
        ensure_ordered("difficulty.interval", self.interval_min, self.interval_max)?;
        ensure_positive("difficulty.interval_floor_min", self.interval_floor_min)?;
        ensure_positive("difficulty.interval_floor_max", self.interval_floor_max)?;
        ensure_ordered(
            "difficulty.interval_floor",
            self.interval_floor_min,
            self.interval_floor_max,
        )?;
        // Ramps only lower the bounds, so they must start at or above the floors
        ensure_ordered(
            "difficulty.interval_floor_min",
            self.interval_floor_min,
            self.interval_min,
        )?;
        ensure_ordered(
            "difficulty.interval_floor_max",
            self.interval_floor_max,
            self.interval_max,
        )?;
        ensure_non_negative("difficulty.interval_reduction", self.interval_reduction)?;
        ensure_positive("difficulty.interval_ramp_period", self.interval_ramp_period)?;

        self.validate_chance("difficulty.dual_chance", self.dual_chance)?;
        self.validate_chance("difficulty.dual_chance_max", self.dual_chance_max)?;
        ensure_ordered("difficulty.dual_chance", self.dual_chance, self.dual_chance_max)?;
        ensure_non_negative("difficulty.dual_chance_increment", self.dual_chance_increment)?;
        Ok(())
    }

    fn validate_chance(&self, field: &'static str, value: f32) -> Result<(), ConfigError> {
        ensure_finite(field, value)?;
        if !(0.0..=100.0).contains(&value) {
            return Err(ConfigError::RangeViolation {
                field,
                min: 0.0,
                max: 100.0,
                value,
            });
        }
        Ok(())
    }
}

/// Spawn batch layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// X of the first obstacle in a batch
    pub base_x: f32,
    /// Obstacles placed one behind the other per batch
    pub obstacles_per_batch: u32,
    /// Horizontal gap between consecutive obstacles in a batch
    pub spacing: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_x: 6.0,
            obstacles_per_batch: 2,
            spacing: 2.0,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("spawn.base_x", self.base_x)?;
        ensure_finite("spawn.spacing", self.spacing)?;
        if self.obstacles_per_batch == 0 {
            return Err(ConfigError::ZeroObstaclesPerBatch);
        }
        Ok(())
    }
}

/// Player placement and lane switching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_lane: usize,
    /// Fixed horizontal position
    pub x: f32,
    /// Lerp rate toward the target lane (per second)
    pub lane_switch_rate: f32,
    pub half_extents: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_lane: 1,
            x: -6.0,
            lane_switch_rate: 15.0,
            half_extents: Vec2::splat(0.4),
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self, lanes: &LaneTable) -> Result<(), ConfigError> {
        if self.start_lane >= lanes.len() {
            return Err(ConfigError::StartLaneOutOfRange {
                index: self.start_lane,
                lanes: lanes.len(),
            });
        }
        ensure_finite("player.x", self.x)?;
        ensure_positive("player.lane_switch_rate", self.lane_switch_rate)?;
        ensure_positive("player.half_extents.x", self.half_extents.x)?;
        ensure_positive("player.half_extents.y", self.half_extents.y)?;
        Ok(())
    }
}

/// Obstacle culling and hitbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Obstacles with `x` below this are removed
    pub left_boundary: f32,
    pub half_extents: Vec2,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            left_boundary: -10.0,
            half_extents: Vec2::splat(0.4),
        }
    }
}

impl ObstacleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("obstacle.left_boundary", self.left_boundary)?;
        ensure_positive("obstacle.half_extents.x", self.half_extents.x)?;
        ensure_positive("obstacle.half_extents.y", self.half_extents.y)?;
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub lanes: LaneTable,
    /// Points per second while running
    pub score_rate: f32,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    pub player: PlayerConfig,
    pub obstacle: ObstacleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lanes: LaneTable::default(),
            score_rate: DEFAULT_SCORE_RATE,
            difficulty: DifficultyConfig::default(),
            spawn: SpawnConfig::default(),
            player: PlayerConfig::default(),
            obstacle: ObstacleConfig::default(),
        }
    }
}

impl GameConfig {
    /// Check every section; the first violation wins
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("score_rate", self.score_rate)?;
        self.difficulty.validate()?;
        self.spawn.validate()?;
        self.player.validate(&self.lanes)?;
        self.obstacle.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
