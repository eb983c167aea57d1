//! Player/obstacle overlap detection and the game-over relay
//!
//! Detection is a plain box test on lane-aligned hitboxes. Hosts with their
//! own physics can skip it and feed overlaps straight into
//! [`CollisionBridge::relay`].

use glam::Vec2;

use super::lane::{Obstacle, ObstacleId, Player};
use super::spawner::SpawnScheduler;
use super::state::{GameStateMachine, SimEvent};
use super::world::World;

/// Axis-aligned box overlap (touching edges do not count)
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    let gap = (a_pos - b_pos).abs();
    let reach = a_half + b_half;
    gap.x < reach.x && gap.y < reach.y
}

/// Ids of every obstacle currently overlapping the player, in id order
pub fn player_hits(
    player: &Player,
    player_half: Vec2,
    obstacles: &[Obstacle],
    obstacle_half: Vec2,
) -> Vec<ObstacleId> {
    obstacles
        .iter()
        .filter(|o| boxes_overlap(player.pos(), player_half, o.pos, obstacle_half))
        .map(|o| o.id)
        .collect()
}

/// Forwards overlaps to the state machine and removes the entities involved.
/// Holds no state.
pub struct CollisionBridge;

impl CollisionBridge {
    /// Report that the player overlapped obstacle `id`.
    ///
    /// Safe to call repeatedly: only the first report while running ends the
    /// run. Returns true if this call did so.
    pub fn relay(
        id: ObstacleId,
        machine: &mut GameStateMachine,
        spawner: &mut SpawnScheduler,
        world: &mut World,
    ) -> bool {
        let ended = machine.notify_collision(spawner);

        let removed_obstacle = world.remove_obstacle(id);
        let removed_player = world.player.take().is_some();
        if removed_obstacle || removed_player {
            world.events.push(SimEvent::Collision { id });
        }
        if ended {
            world.events.push(SimEvent::GameOver {
                score: machine.display_score(),
            });
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DifficultyConfig, LaneTable, SpawnConfig};
    use crate::sim::difficulty::DifficultyModel;
    use crate::sim::spawner::{ObstacleSink, ObstacleSpawn};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_boxes_overlap() {
        let half = Vec2::splat(0.4);
        assert!(boxes_overlap(Vec2::ZERO, half, Vec2::new(0.7, 0.0), half));
        assert!(!boxes_overlap(Vec2::ZERO, half, Vec2::new(0.8, 0.0), half));
        // Adjacent lanes are 3 apart and never touch
        assert!(!boxes_overlap(Vec2::ZERO, half, Vec2::new(0.0, 3.0), half));
    }

    #[test]
    fn test_player_hits_only_same_lane() {
        let player = Player::new(LaneTable::default(), 1, -6.0, 15.0);
        let obstacles = vec![
            Obstacle {
                id: 1,
                pos: Vec2::new(-6.2, 1.0),
                lane: 1,
                speed: 12.0,
            },
            Obstacle {
                id: 2,
                pos: Vec2::new(-6.0, 4.0),
                lane: 2,
                speed: 12.0,
            },
        ];
        let half = Vec2::splat(0.4);
        assert_eq!(player_hits(&player, half, &obstacles, half), vec![1]);
    }

    #[test]
    fn test_relay_is_idempotent() {
        let mut rng = Pcg32::seed_from_u64(9);
        let difficulty = DifficultyModel::new(&DifficultyConfig::default());
        let mut spawner = SpawnScheduler::new(
            &SpawnConfig::default(),
            LaneTable::default(),
            &difficulty.state(),
            &mut rng,
        );
        let mut machine = GameStateMachine::new(10.0);
        machine.update(2.0);
        let mut world = World::new(Player::new(LaneTable::default(), 1, -6.0, 15.0));
        let id = world.create_obstacle(ObstacleSpawn {
            x: -6.0,
            lane: 1,
            lane_y: 1.0,
            speed: 12.0,
        });
        world.drain_events();

        assert!(CollisionBridge::relay(id, &mut machine, &mut spawner, &mut world));
        assert!(world.player.is_none());
        assert!(world.obstacle(id).is_none());
        assert_eq!(
            world.drain_events(),
            vec![
                SimEvent::Collision { id },
                SimEvent::GameOver { score: 20 }
            ]
        );

        assert!(!CollisionBridge::relay(id, &mut machine, &mut spawner, &mut world));
        assert!(world.drain_events().is_empty());
        assert_eq!(machine.display_score(), 20);
        assert!(spawner.is_stopped());
    }
}
