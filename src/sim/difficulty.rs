//! Time-driven difficulty ramps
//!
//! Two independent clocks: one raises obstacle speed, the other shortens the
//! spawn interval bounds and raises the extra-obstacle chance.

use serde::{Deserialize, Serialize};

use crate::config::DifficultyConfig;

/// Current difficulty tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Speed given to newly spawned obstacles
    pub obstacle_speed: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// Extra-obstacle chance in percent
    pub dual_spawn_chance: f32,
    /// Seconds accumulated toward the next speed ramp
    pub since_speed_ramp: f32,
    /// Seconds accumulated toward the next interval/chance ramp
    pub since_interval_ramp: f32,
}

/// Difficulty over elapsed time. A fresh model is built for every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyModel {
    config: DifficultyConfig,
    state: DifficultyState,
    speed_ramps: u32,
    interval_ramps: u32,
}

impl DifficultyModel {
    pub fn new(config: &DifficultyConfig) -> Self {
        Self {
            config: config.clone(),
            state: DifficultyState {
                obstacle_speed: config.initial_speed,
                spawn_interval_min: config.interval_min,
                spawn_interval_max: config.interval_max,
                dual_spawn_chance: config.dual_chance,
                since_speed_ramp: 0.0,
                since_interval_ramp: 0.0,
            },
            speed_ramps: 0,
            interval_ramps: 0,
        }
    }

    /// Accumulate `dt` seconds and apply at most one step of each ramp
    pub fn advance(&mut self, dt: f32) -> DifficultyState {
        let dt = dt.max(0.0);

        self.state.since_speed_ramp += dt;
        if self.state.since_speed_ramp >= self.config.speed_ramp_period {
            // Keeps firing after the cap; the min() makes that a no-op
            self.state.since_speed_ramp = 0.0;
            self.ramp_speed();
        }

        self.state.since_interval_ramp += dt;
        if self.state.since_interval_ramp >= self.config.interval_ramp_period {
            self.state.since_interval_ramp = 0.0;
            self.ramp_intervals();
        }

        self.state
    }

    fn ramp_speed(&mut self) {
        let cfg = &self.config;
        self.state.obstacle_speed =
            (self.state.obstacle_speed + cfg.speed_increment).min(cfg.max_speed);
        self.speed_ramps += 1;
        log::debug!(
            "Speed ramp #{}: obstacle speed {:.2}",
            self.speed_ramps,
            self.state.obstacle_speed
        );
    }

    fn ramp_intervals(&mut self) {
        let cfg = &self.config;
        let s = &mut self.state;
        s.spawn_interval_min =
            (s.spawn_interval_min - cfg.interval_reduction).max(cfg.interval_floor_min);
        s.spawn_interval_max =
            (s.spawn_interval_max - cfg.interval_reduction).max(cfg.interval_floor_max);
        s.dual_spawn_chance =
            (s.dual_spawn_chance + cfg.dual_chance_increment).min(cfg.dual_chance_max);
        self.interval_ramps += 1;
        log::debug!(
            "Spawn ramp #{}: interval [{:.2}, {:.2}], extra chance {:.0}%",
            self.interval_ramps,
            s.spawn_interval_min,
            s.spawn_interval_max,
            s.dual_spawn_chance
        );
    }

    /// Current tunables without advancing time
    #[inline]
    pub fn state(&self) -> DifficultyState {
        self.state
    }

    #[inline]
    pub fn obstacle_speed(&self) -> f32 {
        self.state.obstacle_speed
    }

    /// Number of speed ramps applied so far (including capped no-ops)
    pub fn speed_ramps(&self) -> u32 {
        self.speed_ramps
    }

    /// Number of interval/chance ramps applied so far
    pub fn interval_ramps(&self) -> u32 {
        self.interval_ramps
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }
}
