//! Run state and the running/game-over machine
//!
//! Score accrues continuously while running. A collision ends the run once;
//! anything after that is ignored until the host rebuilds the simulation.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyModel;
use super::lane::ObstacleId;
use super::spawner::SpawnScheduler;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Run ended, waiting for a restart request
    GameOver,
}

/// Score and liveness for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: f32,
    pub active: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0.0,
            active: true,
        }
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    ObstacleSpawned { id: ObstacleId, lane: usize, x: f32 },
    /// Obstacle left the field on the left
    ObstacleDespawned { id: ObstacleId },
    /// Player overlapped an obstacle; both were removed
    Collision { id: ObstacleId },
    GameOver { score: u64 },
    Restarted { seed: u64 },
}

/// Running / game-over state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateMachine {
    run: RunState,
    phase: GamePhase,
    score_rate: f32,
}

impl GameStateMachine {
    pub fn new(score_rate: f32) -> Self {
        Self {
            run: RunState::default(),
            phase: GamePhase::Running,
            score_rate,
        }
    }

    /// Accrue score for `dt` seconds; frozen after game over
    pub fn update(&mut self, dt: f32) {
        if self.phase == GamePhase::Running {
            self.run.score += self.score_rate * dt.max(0.0);
        }
    }

    /// Handle a collision report.
    ///
    /// Returns true only for the report that ended the run; later reports are
    /// no-ops and leave the scheduler untouched.
    pub fn notify_collision(&mut self, spawner: &mut SpawnScheduler) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.run.active = false;
        spawner.stop();
        log::info!("Game over with score {}", self.display_score());
        true
    }

    /// Whether a restart request should be acted on
    pub fn accepts_restart(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Speed a newly created obstacle should travel at
    #[inline]
    pub fn current_obstacle_speed(&self, difficulty: &DifficultyModel) -> f32 {
        difficulty.obstacle_speed()
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn run(&self) -> RunState {
        self.run
    }

    #[inline]
    pub fn score(&self) -> f32 {
        self.run.score
    }

    /// Score rounded down for display
    pub fn display_score(&self) -> u64 {
        self.run.score.max(0.0).floor() as u64
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DifficultyConfig, LaneTable, SpawnConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner() -> SpawnScheduler {
        let mut rng = Pcg32::seed_from_u64(1);
        let difficulty = DifficultyModel::new(&DifficultyConfig::default());
        SpawnScheduler::new(
            &SpawnConfig::default(),
            LaneTable::default(),
            &difficulty.state(),
            &mut rng,
        )
    }

    #[test]
    fn test_score_accrues_while_running() {
        let mut machine = GameStateMachine::new(10.0);
        for _ in 0..4 {
            machine.update(0.25);
        }
        assert_eq!(machine.score(), 10.0);
        assert_eq!(machine.display_score(), 10);
        machine.update(0.05);
        assert_eq!(machine.display_score(), 10);
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut machine = GameStateMachine::new(10.0);
        let mut spawner = spawner();
        machine.update(1.0);

        assert!(machine.notify_collision(&mut spawner));
        assert!(spawner.is_stopped());
        assert_eq!(machine.phase(), GamePhase::GameOver);
        assert!(!machine.run().active);

        let frozen = machine.score();
        machine.update(5.0);
        assert!(!machine.notify_collision(&mut spawner));
        assert_eq!(machine.score(), frozen);
        assert!(spawner.is_stopped());
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut machine = GameStateMachine::new(10.0);
        assert!(!machine.accepts_restart());
        machine.notify_collision(&mut spawner());
        assert!(machine.accepts_restart());
    }

    #[test]
    fn test_obstacle_speed_reads_difficulty() {
        let machine = GameStateMachine::new(10.0);
        let mut difficulty = DifficultyModel::new(&DifficultyConfig::default());
        assert_eq!(machine.current_obstacle_speed(&difficulty), 12.0);
        difficulty.advance(3.0);
        assert_eq!(machine.current_obstacle_speed(&difficulty), 14.0);
    }
}
