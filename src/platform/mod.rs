//! Platform abstraction layer
//!
//! Contracts between the simulation and whatever hosts it:
//! - Input: held keys in, edge-triggered `TickInput` out
//! - Display: HUD snapshots out, fire-and-forget

use crate::hud::HudSnapshot;
use crate::sim::TickInput;

/// Keys held down this frame, as reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// W
    pub up: bool,
    /// S
    pub down: bool,
    /// R
    pub restart: bool,
}

/// Turns held keys into one signal per press
#[derive(Debug, Clone, Default)]
pub struct KeyEdges {
    previous: HeldKeys,
}

impl KeyEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals for keys that went down since the last poll
    pub fn poll(&mut self, held: HeldKeys) -> TickInput {
        let prev = self.previous;
        self.previous = held;
        TickInput {
            lane_up: held.up && !prev.up,
            lane_down: held.down && !prev.down,
            restart: held.restart && !prev.restart,
        }
    }

    /// Forget held state (e.g. after focus loss)
    pub fn clear(&mut self) {
        self.previous = HeldKeys::default();
    }
}

/// Presentation consumer for the HUD
pub trait DisplaySink {
    fn present(&mut self, hud: &HudSnapshot);
}

/// Logs the HUD whenever it changes
#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<HudSnapshot>,
}

impl DisplaySink for LogDisplay {
    fn present(&mut self, hud: &HudSnapshot) {
        if self.last.as_ref() == Some(hud) {
            return;
        }
        self.last = Some(*hud);
        log::info!("{}", hud.lines().join(" | "));
    }
}

/// Keeps every presented frame (handy for tests and replays)
impl DisplaySink for Vec<HudSnapshot> {
    fn present(&mut self, hud: &HudSnapshot) {
        self.push(*hud);
    }
}
