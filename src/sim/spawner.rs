//! Randomized obstacle scheduling
//!
//! Waits a random interval drawn from the current difficulty bounds, then
//! places a batch of obstacles on random lanes. Stopping is permanent for the
//! run; a restart builds a new scheduler.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyModel, DifficultyState};
use super::lane::ObstacleId;
use crate::config::{LaneTable, SpawnConfig};

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnerPhase {
    /// Next batch fires once the scheduler clock reaches `until`
    Idle { until: f32 },
    Stopped,
}

/// One obstacle placement decided by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPlacement {
    pub lane: usize,
    pub x: f32,
}

/// Everything created at one scheduling point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnBatch {
    /// One obstacle per slot, slot `i` at `base_x + i * spacing`
    pub placements: Vec<SpawnPlacement>,
    /// The optional extra obstacle, aligned to a random slot's x
    pub extra: Option<SpawnPlacement>,
}

impl SpawnBatch {
    pub fn iter(&self) -> impl Iterator<Item = &SpawnPlacement> {
        self.placements.iter().chain(self.extra.iter())
    }

    pub fn len(&self) -> usize {
        self.placements.len() + usize::from(self.extra.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Request to create an obstacle, handed to the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpawn {
    pub x: f32,
    pub lane: usize,
    pub lane_y: f32,
    pub speed: f32,
}

/// Receives obstacle creation requests. Creation is fire-and-forget; the
/// returned handle is only informational.
pub trait ObstacleSink {
    fn create_obstacle(&mut self, spawn: ObstacleSpawn) -> ObstacleId;
}

/// Collects requests in order; handle is the request's index
impl ObstacleSink for Vec<ObstacleSpawn> {
    fn create_obstacle(&mut self, spawn: ObstacleSpawn) -> ObstacleId {
        self.push(spawn);
        (self.len() - 1) as ObstacleId
    }
}

/// Obstacle spawn scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    lanes: LaneTable,
    phase: SpawnerPhase,
    /// Seconds since the scheduler was created (only advances while idle)
    clock: f32,
    batches: u32,
}

impl SpawnScheduler {
    /// Create an idle scheduler with its first wait already drawn
    pub fn new(
        config: &SpawnConfig,
        lanes: LaneTable,
        difficulty: &DifficultyState,
        rng: &mut impl Rng,
    ) -> Self {
        let mut scheduler = Self {
            config: config.clone(),
            lanes,
            phase: SpawnerPhase::Stopped,
            clock: 0.0,
            batches: 0,
        };
        scheduler.schedule_next(difficulty, rng);
        scheduler
    }

    /// Advance the difficulty and fire a batch when due. No-op once stopped.
    ///
    /// Returns the batch that fired this step, if any.
    pub fn update(
        &mut self,
        dt: f32,
        difficulty: &mut DifficultyModel,
        rng: &mut impl Rng,
        sink: &mut impl ObstacleSink,
    ) -> Option<SpawnBatch> {
        let SpawnerPhase::Idle { until } = self.phase else {
            return None;
        };

        let tunables = difficulty.advance(dt);
        self.clock += dt.max(0.0);

        if self.clock < until {
            return None;
        }

        let batch = self.plan_batch(&tunables, rng);
        for placement in batch.iter() {
            sink.create_obstacle(ObstacleSpawn {
                x: placement.x,
                lane: placement.lane,
                lane_y: self.lanes[placement.lane],
                speed: tunables.obstacle_speed,
            });
        }
        self.batches += 1;
        log::debug!(
            "Batch #{} at t={:.2}s: {} obstacles",
            self.batches,
            self.clock,
            batch.len()
        );

        self.schedule_next(&tunables, rng);
        Some(batch)
    }

    /// Draw lanes for one batch plus the optional extra obstacle.
    ///
    /// Lanes are independent, so slots may share a lane. The extra obstacle's
    /// lane and slot are drawn on their own and may duplicate an existing one.
    pub fn plan_batch(&self, tunables: &DifficultyState, rng: &mut impl Rng) -> SpawnBatch {
        let lane_count = self.lanes.len();
        let slots = self.config.obstacles_per_batch as usize;

        let placements = (0..slots)
            .map(|slot| SpawnPlacement {
                lane: rng.random_range(0..lane_count),
                x: self.slot_x(slot),
            })
            .collect();

        let extra = if rng.random_range(0.0f32..100.0) < tunables.dual_spawn_chance {
            let lane = rng.random_range(0..lane_count);
            let slot = rng.random_range(0..slots);
            Some(SpawnPlacement {
                lane,
                x: self.slot_x(slot),
            })
        } else {
            None
        };

        SpawnBatch { placements, extra }
    }

    fn slot_x(&self, slot: usize) -> f32 {
        self.config.base_x + slot as f32 * self.config.spacing
    }

    fn schedule_next(&mut self, tunables: &DifficultyState, rng: &mut impl Rng) {
        let wait = rng.random_range(tunables.spawn_interval_min..=tunables.spawn_interval_max);
        self.phase = SpawnerPhase::Idle {
            until: self.clock + wait,
        };
    }

    /// Halt spawning and ramping for the rest of the run. Idempotent.
    pub fn stop(&mut self) {
        if self.phase != SpawnerPhase::Stopped {
            log::debug!("Spawner stopped after {} batches", self.batches);
            self.phase = SpawnerPhase::Stopped;
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.phase == SpawnerPhase::Stopped
    }

    #[inline]
    pub fn phase(&self) -> SpawnerPhase {
        self.phase
    }

    pub fn lanes(&self) -> &LaneTable {
        &self.lanes
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Batches fired so far
    pub fn batches(&self) -> u32 {
        self.batches
    }
}
