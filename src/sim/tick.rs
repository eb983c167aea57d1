//! Per-tick simulation driver
//!
//! `Simulation` owns one run and advances it in a fixed order:
//! input, difficulty and spawning, movement, collisions, then scoring.
//! A run that ends this tick earns nothing for it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{CollisionBridge, player_hits};
use super::difficulty::DifficultyModel;
use super::lane::{LaneStep, Obstacle, ObstacleId, Player};
use super::spawner::SpawnScheduler;
use super::state::{GamePhase, GameStateMachine, SimEvent};
use super::world::World;
use crate::config::{GameConfig, LaneTable};
use crate::error::ConfigError;
use crate::hud::{FrameSnapshot, HudSnapshot, ObstacleView};
use crate::platform::DisplaySink;

/// Input commands for a single tick (already edge-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub lane_up: bool,
    pub lane_down: bool,
    /// Only honoured after game over
    pub restart: bool,
}

/// One complete run plus everything needed to start the next
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    seed: u64,
    rng: Pcg32,
    difficulty: DifficultyModel,
    spawner: SpawnScheduler,
    machine: GameStateMachine,
    world: World,
    /// Seconds simulated in this run
    elapsed: f32,
    ticks: u64,
}

impl Simulation {
    /// Validate `config` and start a run with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Simulation starting with seed {} ({} lanes)",
            seed,
            config.lanes.len()
        );
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let difficulty = DifficultyModel::new(&config.difficulty);
        let spawner = SpawnScheduler::new(
            &config.spawn,
            config.lanes.clone(),
            &difficulty.state(),
            &mut rng,
        );
        let player = Player::new(
            config.lanes.clone(),
            config.player.start_lane,
            config.player.x,
            config.player.lane_switch_rate,
        );
        Self {
            machine: GameStateMachine::new(config.score_rate),
            world: World::new(player),
            config,
            seed,
            rng,
            difficulty,
            spawner,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Throw the current run away and start a fresh one.
    ///
    /// The new seed is drawn from the old run's RNG, so a whole session
    /// replays identically from its first seed.
    pub fn reset(&mut self) {
        let seed = self.rng.random::<u64>();
        self.reset_with_seed(seed);
    }

    /// Start a fresh run with an explicit seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        let config = self.config.clone();
        *self = Self::build(config, seed);
        self.world.events.push(SimEvent::Restarted { seed });
        log::info!("Run restarted with seed {}", seed);
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        let dt = dt.max(0.0);

        if self.machine.is_game_over() && input.restart {
            self.reset();
            return;
        }

        if self.machine.phase() == GamePhase::Running {
            if let Some(player) = self.world.player.as_mut() {
                // Up wins when both arrive together
                if input.lane_up {
                    player.step(LaneStep::Up);
                } else if input.lane_down {
                    player.step(LaneStep::Down);
                }
            }
        }

        self.spawner
            .update(dt, &mut self.difficulty, &mut self.rng, &mut self.world);

        if let Some(player) = self.world.player.as_mut() {
            player.update(dt);
        }
        self.world
            .update_obstacles(dt, self.config.obstacle.left_boundary);

        let hits = match &self.world.player {
            Some(player) => player_hits(
                player,
                self.config.player.half_extents,
                &self.world.obstacles,
                self.config.obstacle.half_extents,
            ),
            None => Vec::new(),
        };
        for id in hits {
            self.report_collision(id);
        }
        self.machine.update(dt);

        self.elapsed += dt;
        self.ticks += 1;
    }

    /// Report an overlap from an external collision source.
    ///
    /// Redundant reports are harmless. Returns true if this report ended the
    /// run.
    pub fn report_collision(&mut self, id: ObstacleId) -> bool {
        CollisionBridge::relay(id, &mut self.machine, &mut self.spawner, &mut self.world)
    }

    /// Events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.world.drain_events()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.machine.display_score(),
            is_game_over: self.machine.is_game_over(),
        }
    }

    /// Read-only view of everything a renderer needs
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            hud: self.hud(),
            player: self.world.player.as_ref().map(Player::pos),
            player_lane: self.world.player.as_ref().map(Player::lane),
            obstacles: self
                .world
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    pos: o.pos,
                    lane: o.lane,
                })
                .collect(),
            obstacle_speed: self.obstacle_speed(),
            elapsed: self.elapsed,
        }
    }

    /// Hand the HUD to a display sink
    pub fn render(&self, sink: &mut impl DisplaySink) {
        sink.present(&self.hud());
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    #[inline]
    pub fn score(&self) -> f32 {
        self.machine.score()
    }

    /// Speed newly spawned obstacles receive
    #[inline]
    pub fn obstacle_speed(&self) -> f32 {
        self.machine.current_obstacle_speed(&self.difficulty)
    }

    pub fn player(&self) -> Option<&Player> {
        self.world.player.as_ref()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.world.obstacles
    }

    pub fn difficulty(&self) -> &DifficultyModel {
        &self.difficulty
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    pub fn lanes(&self) -> &LaneTable {
        &self.config.lanes
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::spawner::{ObstacleSink, ObstacleSpawn};

    fn sim(seed: u64) -> Simulation {
        Simulation::new(GameConfig::default(), seed).unwrap()
    }

    /// Drop an obstacle right on top of the player
    fn hit_player(sim: &mut Simulation) -> ObstacleId {
        let player = sim.player().expect("player alive");
        let spawn = ObstacleSpawn {
            x: player.x,
            lane: player.lane(),
            lane_y: player.y,
            speed: 0.0,
        };
        sim.world.create_obstacle(spawn)
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = GameConfig::default();
        config.spawn.obstacles_per_batch = 0;
        assert!(matches!(
            Simulation::new(config, 1),
            Err(ConfigError::ZeroObstaclesPerBatch)
        ));
    }

    #[test]
    fn test_lane_tables_are_shared() {
        let s = sim(1);
        let player = s.player().expect("player alive");
        assert!(player.lanes().shares_storage(s.lanes()));
        assert!(s.spawner().lanes().shares_storage(s.lanes()));
        assert_eq!(s.player().map(Player::lane), Some(1));
    }

    #[test]
    fn test_up_wins_over_down() {
        let mut s = sim(1);
        let both = TickInput {
            lane_up: true,
            lane_down: true,
            restart: false,
        };
        s.tick(&both, SIM_DT);
        assert_eq!(s.player().map(Player::lane), Some(2));
    }

    #[test]
    fn test_score_accrues_per_tick() {
        let mut s = sim(1);
        for _ in 0..4 {
            s.tick(&TickInput::default(), 0.25);
        }
        assert!((s.score() - 10.0).abs() < 1e-4);
        assert_eq!(s.ticks(), 4);
    }

    #[test]
    fn test_no_score_for_the_tick_that_ends_the_run() {
        let mut s = sim(3);
        s.tick(&TickInput::default(), 0.25);
        hit_player(&mut s);
        s.tick(&TickInput::default(), 0.25);

        assert_eq!(s.phase(), GamePhase::GameOver);
        assert!((s.score() - 2.5).abs() < 1e-4);
        assert!(
            s.drain_events()
                .contains(&SimEvent::GameOver { score: 2 })
        );
    }

    #[test]
    fn test_collision_freezes_run() {
        let mut s = sim(3);
        s.tick(&TickInput::default(), 0.5);
        hit_player(&mut s);
        s.tick(&TickInput::default(), SIM_DT);

        assert_eq!(s.phase(), GamePhase::GameOver);
        assert!(s.player().is_none());
        assert!(s.spawner().is_stopped());

        let score = s.score();
        let batches = s.spawner().batches();
        for _ in 0..600 {
            s.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(s.score(), score);
        assert_eq!(s.spawner().batches(), batches);
        // Leftover obstacles drift off and get culled
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut s = sim(3);
        // Shorter than the first spawn wait
        s.tick(&TickInput::default(), 0.1);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        s.tick(&restart, SIM_DT);
        assert_eq!(s.seed(), 3);
        assert_eq!(s.phase(), GamePhase::Running);
        assert!(s.score() > 1.0);
    }

    #[test]
    fn test_restart_rebuilds_everything() {
        let mut s = sim(3);
        for _ in 0..(25 * 120) {
            s.tick(&TickInput::default(), SIM_DT);
            if s.phase() == GamePhase::GameOver {
                break;
            }
        }
        if s.phase() == GamePhase::Running {
            hit_player(&mut s);
            s.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(s.phase(), GamePhase::GameOver);
        s.drain_events();

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        s.tick(&restart, SIM_DT);

        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.score(), 0.0);
        assert_eq!(s.obstacle_speed(), 12.0);
        assert!(s.obstacles().is_empty());
        assert_eq!(s.player().map(Player::lane), Some(1));
        assert!(!s.spawner().is_stopped());
        assert_eq!(s.elapsed(), 0.0);
        assert!(matches!(
            s.drain_events().as_slice(),
            [SimEvent::Restarted { .. }]
        ));
    }

    #[test]
    fn test_restart_sequence_is_reproducible() {
        let mut a = sim(77);
        let mut b = sim(77);
        for s in [&mut a, &mut b] {
            hit_player(s);
            s.tick(&TickInput::default(), SIM_DT);
            s.tick(
                &TickInput {
                    restart: true,
                    ..Default::default()
                },
                SIM_DT,
            );
        }
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), 77);
    }

    #[test]
    fn test_obstacles_snapshot_speed_at_spawn() {
        // Player sits past the cull line, so nothing can reach it
        let mut config = GameConfig::default();
        config.player.x = -20.0;
        let mut s = Simulation::new(config, 8).unwrap();

        let spawn = ObstacleSpawn {
            x: 100.0,
            lane: 0,
            lane_y: s.lanes()[0],
            speed: s.obstacle_speed(),
        };
        let early = s.world.create_obstacle(spawn);
        for _ in 0..(4 * 120) {
            s.tick(&TickInput::default(), SIM_DT);
        }

        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.obstacle_speed(), 14.0);
        let obstacle = s.world.obstacle(early).expect("still on the field");
        assert_eq!(obstacle.speed, 12.0);
        assert!(s.obstacles().iter().any(|o| o.speed == 14.0));
    }
}
