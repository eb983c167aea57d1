//! Read-only views for the presentation layer
//!
//! Nothing here feeds back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::lane::ObstacleId;

pub const GAME_OVER_TITLE: &str = "GAME OVER!";
pub const RESTART_HINT: &str = "Press R to Restart";

/// What the score/game-over overlay shows each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Score rounded down
    pub score: u64,
    pub is_game_over: bool,
}

impl HudSnapshot {
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Overlay text, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.score_label()];
        if self.is_game_over {
            lines.push(GAME_OVER_TITLE.to_string());
            lines.push(RESTART_HINT.to_string());
        }
        lines
    }
}

/// Obstacle as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub pos: Vec2,
    pub lane: usize,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub hud: HudSnapshot,
    /// `None` after the player was hit
    pub player: Option<Vec2>,
    pub player_lane: Option<usize>,
    pub obstacles: Vec<ObstacleView>,
    /// Speed the next spawned obstacle will get
    pub obstacle_speed: f32,
    /// Seconds into the current run
    pub elapsed: f32,
}
