//! Lane Runner entry point
//!
//! Headless native runner: drives the simulation with the autopilot at a fixed
//! timestep, logs the HUD, and restarts once after the first game over.
//!
//! Usage: `lane-runner [seed] [config.json]` (set `RUST_LOG=info` to see output)

use std::process::ExitCode;

use lane_runner::consts::*;
use lane_runner::platform::{HeldKeys, KeyEdges, LogDisplay};
use lane_runner::sim::{GamePhase, SimEvent, autopilot};
use lane_runner::{GameConfig, Simulation};

const DEFAULT_SEED: u64 = 12345;
/// Host frame time (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up on a run after this many seconds
const RUN_LIMIT_SECS: f32 = 120.0;
/// Runs to play before exiting
const RUNS: u32 = 2;

/// Host-side state wrapped around the simulation
struct Runner {
    sim: Simulation,
    accumulator: f32,
    keys: KeyEdges,
    display: LogDisplay,
    runs_finished: u32,
}

impl Runner {
    fn new(sim: Simulation) -> Self {
        Self {
            sim,
            accumulator: 0.0,
            keys: KeyEdges::new(),
            display: LogDisplay::default(),
            runs_finished: 0,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        // "Press" R as soon as the run is over, if another run is wanted
        let wants_restart =
            self.sim.phase() == GamePhase::GameOver && self.runs_finished < RUNS;
        let mut pending = self.keys.poll(HeldKeys {
            restart: wants_restart,
            ..Default::default()
        });

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut input = autopilot(&self.sim);
            input.restart = pending.restart;
            self.sim.tick(&input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            pending.restart = false;
        }

        for event in self.sim.drain_events() {
            match event {
                SimEvent::GameOver { score } => {
                    self.runs_finished += 1;
                    log::info!(
                        "Run {} over after {:.1}s with {} points",
                        self.runs_finished,
                        self.sim.elapsed(),
                        score
                    );
                }
                SimEvent::Restarted { seed } => log::info!("New run, seed {}", seed),
                other => log::trace!("{:?}", other),
            }
        }

        self.sim.render(&mut self.display);
    }

    fn done(&self) -> bool {
        let over = self.sim.phase() == GamePhase::GameOver;
        (over && self.runs_finished >= RUNS) || self.sim.elapsed() >= RUN_LIMIT_SECS
    }
}

fn parse_args() -> Result<(u64, GameConfig), String> {
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("invalid seed {raw:?}: {e}"))?,
        None => DEFAULT_SEED,
    };
    let config = match args.next() {
        Some(path) => GameConfig::load(&path).map_err(|e| format!("{path}: {e}"))?,
        None => GameConfig::default(),
    };
    Ok((seed, config))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lane Runner (headless) starting...");

    let (seed, config) = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sim = match Simulation::new(config, seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::warn!("Rejected config: {e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut runner = Runner::new(sim);
    while !runner.done() {
        runner.update(FRAME_DT);
    }

    match serde_json::to_string_pretty(&runner.sim.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not encode final snapshot: {e}"),
    }
    ExitCode::SUCCESS
}
