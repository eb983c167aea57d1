//! Entity storage for one run
//!
//! Owns the player and the live obstacles. Obstacles are kept sorted by id so
//! iteration order is deterministic.

use serde::{Deserialize, Serialize};

use super::lane::{Obstacle, ObstacleId, Player};
use super::spawner::{ObstacleSink, ObstacleSpawn};
use super::state::SimEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// `None` once the player has been hit
    pub player: Option<Player>,
    pub obstacles: Vec<Obstacle>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<SimEvent>,
    next_id: ObstacleId,
}

impl World {
    pub fn new(player: Player) -> Self {
        Self {
            player: Some(player),
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle id
    pub fn next_obstacle_id(&mut self) -> ObstacleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move every obstacle, then drop the ones past `left_boundary`
    pub fn update_obstacles(&mut self, dt: f32, left_boundary: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }

        let events = &mut self.events;
        self.obstacles.retain(|o| {
            if o.is_past(left_boundary) {
                events.push(SimEvent::ObstacleDespawned { id: o.id });
                false
            } else {
                true
            }
        });
    }

    /// Remove an obstacle; false if it is already gone
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> bool {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.id != id);
        self.obstacles.len() != before
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ObstacleSink for World {
    fn create_obstacle(&mut self, spawn: ObstacleSpawn) -> ObstacleId {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle {
            id,
            pos: glam::Vec2::new(spawn.x, spawn.lane_y),
            lane: spawn.lane,
            speed: spawn.speed,
        });
        self.events.push(SimEvent::ObstacleSpawned {
            id,
            lane: spawn.lane,
            x: spawn.x,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaneTable;

    fn world() -> World {
        World::new(Player::new(LaneTable::default(), 1, -6.0, 15.0))
    }

    fn spawn(x: f32) -> ObstacleSpawn {
        ObstacleSpawn {
            x,
            lane: 0,
            lane_y: -2.0,
            speed: 10.0,
        }
    }

    #[test]
    fn test_created_obstacles_get_increasing_ids() {
        let mut w = world();
        let a = w.create_obstacle(spawn(6.0));
        let b = w.create_obstacle(spawn(8.0));
        assert!(b > a);
        assert_eq!(w.obstacle(b).map(|o| o.pos.x), Some(8.0));
        assert_eq!(w.drain_events().len(), 2);
        assert!(w.events.is_empty());
    }

    #[test]
    fn test_culled_exactly_once() {
        let mut w = world();
        let id = w.create_obstacle(spawn(-9.5));
        w.drain_events();

        w.update_obstacles(0.1, -10.0);
        assert!(w.obstacle(id).is_none());
        assert_eq!(w.drain_events(), vec![SimEvent::ObstacleDespawned { id }]);

        w.update_obstacles(0.1, -10.0);
        assert!(w.drain_events().is_empty());
        assert!(!w.remove_obstacle(id));
    }
}
