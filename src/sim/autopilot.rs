//! Idle/demo mode: picks lanes on the player's behalf
//!
//! Looks at the nearest obstacle still ahead of the player in every lane and
//! heads for the lane where that obstacle is farthest away.

use super::lane::Player;
use super::tick::{Simulation, TickInput};

/// Distance treated as "nothing coming" for an empty lane
const CLEAR_LANE: f32 = f32::INFINITY;

/// Lane the autopilot wants to be in. Ties keep the current lane, then prefer
/// the lane closest to it.
pub fn preferred_lane(sim: &Simulation) -> Option<usize> {
    let player = sim.player()?;
    let reach = sim.config().player.half_extents.x + sim.config().obstacle.half_extents.x;

    let mut clearance = vec![CLEAR_LANE; sim.lanes().len()];
    for obstacle in sim.obstacles() {
        let ahead = obstacle.pos.x - player.x;
        if ahead + reach < 0.0 {
            continue; // already behind the player
        }
        if let Some(slot) = clearance.get_mut(obstacle.lane) {
            *slot = slot.min(ahead);
        }
    }

    let current = player.lane();
    (0..clearance.len()).max_by(|&a, &b| {
        clearance[a]
            .total_cmp(&clearance[b])
            .then_with(|| current.abs_diff(b).cmp(&current.abs_diff(a)))
    })
}

/// One tick of autopilot input: a single lane step toward the preferred lane
pub fn autopilot(sim: &Simulation) -> TickInput {
    let (Some(player), Some(target)) = (sim.player(), preferred_lane(sim)) else {
        return TickInput::default();
    };
    step_toward(player, target)
}

fn step_toward(player: &Player, target: usize) -> TickInput {
    TickInput {
        lane_up: target > player.lane(),
        lane_down: target < player.lane(),
        restart: false,
    }
}
