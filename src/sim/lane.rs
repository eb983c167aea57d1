//! Lane entities: the player and the obstacles
//!
//! Both only ever translate along one axis. The player eases vertically
//! toward its target lane; obstacles slide left at a fixed speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::approach;
use crate::config::LaneTable;

/// Direction of a lane change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneStep {
    Up,
    Down,
}

/// The player, pinned at a fixed x and switching between lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Rendered vertical position (eases toward `target_y`)
    pub y: f32,
    pub target_y: f32,
    lane: usize,
    lanes: LaneTable,
    switch_rate: f32,
}

impl Player {
    /// Place the player directly on `start_lane`. The lane must exist.
    pub fn new(lanes: LaneTable, start_lane: usize, x: f32, switch_rate: f32) -> Self {
        let lane = start_lane.min(lanes.last_index());
        let y = lanes[lane];
        Self {
            x,
            y,
            target_y: y,
            lane,
            lanes,
            switch_rate,
        }
    }

    #[inline]
    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn lanes(&self) -> &LaneTable {
        &self.lanes
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Move one lane; returns false (and does nothing) at the edge
    pub fn step(&mut self, step: LaneStep) -> bool {
        let next = match step {
            LaneStep::Up if self.lane < self.lanes.last_index() => self.lane + 1,
            LaneStep::Down if self.lane > 0 => self.lane - 1,
            _ => return false,
        };
        self.lane = next;
        self.target_y = self.lanes[next];
        true
    }

    /// Ease toward the target lane
    pub fn update(&mut self, dt: f32) {
        self.y = approach(self.y, self.target_y, self.switch_rate * dt);
    }
}

/// Stable handle for a spawned obstacle
pub type ObstacleId = u32;

/// An obstacle travelling left at the speed it was spawned with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub pos: Vec2,
    pub lane: usize,
    /// Snapshot of the difficulty speed at spawn time
    pub speed: f32,
}

impl Obstacle {
    pub fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
    }

    /// True once the obstacle has left the field on the left
    #[inline]
    pub fn is_past(&self, left_boundary: f32) -> bool {
        self.pos.x < left_boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(LaneTable::default(), 1, -6.0, 15.0)
    }

    #[test]
    fn test_up_is_clamped_at_top() {
        let mut p = player();
        assert!(p.step(LaneStep::Up));
        assert!(!p.step(LaneStep::Up));
        assert_eq!(p.lane(), 2);
        assert_eq!(p.target_y, 4.0);
    }

    #[test]
    fn test_down_is_clamped_at_bottom() {
        let mut p = player();
        p.step(LaneStep::Up);
        for _ in 0..4 {
            p.step(LaneStep::Down);
        }
        assert_eq!(p.lane(), 0);
        assert_eq!(p.target_y, -2.0);
    }

    #[test]
    fn test_player_eases_toward_target() {
        let mut p = player();
        p.step(LaneStep::Up);
        p.update(1.0 / 120.0);
        // 15/120 of the 3-unit gap
        assert!((p.y - 1.375).abs() < 1e-5);

        for _ in 0..240 {
            p.update(1.0 / 120.0);
        }
        assert!((p.y - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_large_dt_does_not_overshoot() {
        let mut p = player();
        p.step(LaneStep::Down);
        p.update(1.0);
        assert_eq!(p.y, -2.0);
    }

    #[test]
    fn test_single_lane_never_moves() {
        let lanes = LaneTable::new(vec![0.5]).unwrap();
        let mut p = Player::new(lanes, 0, 0.0, 10.0);
        assert!(!p.step(LaneStep::Up));
        assert!(!p.step(LaneStep::Down));
        assert_eq!(p.lane(), 0);
    }

    #[test]
    fn test_obstacle_moves_left_at_snapshot_speed() {
        let mut o = Obstacle {
            id: 1,
            pos: Vec2::new(6.0, 1.0),
            lane: 1,
            speed: 12.0,
        };
        o.update(0.5);
        assert_eq!(o.pos, Vec2::new(0.0, 1.0));
        assert!(!o.is_past(-10.0));
        o.update(1.0);
        assert!(o.is_past(-10.0));
    }
}
