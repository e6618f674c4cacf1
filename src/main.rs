//! Tilt Maze entry point
//!
//! Plays a scripted sensor session through the orientation estimator and
//! the ball simulation, logging snapshots as JSON.
//!
//! Usage: `tilt-maze [settings.json] [--ticks N] [--realtime]`

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;

use tilt_maze::consts::SEA_LEVEL_PRESSURE;
use tilt_maze::platform::{Clock, FixedTicker, ManualClock, SystemClock};
use tilt_maze::readouts::{SimulatedBarometer, pressure_to_altitude};
use tilt_maze::sensors::{ScriptStep, ScriptedSource, SensorKind};
use tilt_maze::{OrientationEstimator, Settings, Simulator, Snapshot};

/// Board size reported by the (imaginary) layout pass
const BOARD_SIZE: (f32, f32) = (400.0, 800.0);
/// Log a snapshot every this many ticks
const SNAPSHOT_EVERY: u64 = 60;

struct Args {
    settings: Option<PathBuf>,
    ticks: u64,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        settings: None,
        ticks: 600,
        realtime: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--realtime" => args.realtime = true,
            "--ticks" => match iter.next().and_then(|n| n.parse().ok()) {
                Some(n) => args.ticks = n,
                None => log::warn!("--ticks needs a number, keeping {}", args.ticks),
            },
            path => args.settings = Some(PathBuf::from(path)),
        }
    }
    args
}

/// Tilt the device toward the user, then sway left and right
fn demo_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::still(500, 0.0),
        ScriptStep::new(600, 15.0, Vec3::new(-0.6, 0.0, 0.0)),
        ScriptStep::still(2_000, 30.0),
        ScriptStep::new(400, 60.0, Vec3::new(0.0, 0.8, 0.0)),
        ScriptStep::still(1_500, 90.0),
        ScriptStep::new(800, 120.0, Vec3::new(0.0, -0.8, 0.0)),
        ScriptStep::still(3_000, 150.0),
    ]
}

/// Everything one screen session owns
struct Session {
    settings: Settings,
    source: ScriptedSource,
    estimator: OrientationEstimator,
    simulator: Simulator,
    samples_per_tick: usize,
}

impl Session {
    fn new(settings: Settings) -> Self {
        let source = ScriptedSource::new(demo_script(), settings.sensor_interval_ms, settings.seed)
            .with_noise(0.01);
        let frames_per_tick = (settings.tick_ms as usize / settings.sensor_interval_ms as usize).max(1);
        Self {
            source,
            estimator: OrientationEstimator::new(),
            simulator: Simulator::new(settings.physics, settings.layout.clone()),
            samples_per_tick: frames_per_tick * SensorKind::ALL.len(),
            settings,
        }
    }

    fn start(&mut self) {
        if let Err(e) = self.estimator.start(&mut self.source) {
            log::warn!("Continuing without full sensor set: {}", e);
        }
        if let Err(e) = self.simulator.resize(BOARD_SIZE.0, BOARD_SIZE.1) {
            log::error!("Board not ready: {}", e);
        }
    }

    fn stop(&mut self) {
        self.estimator.stop(&mut self.source);
    }

    fn log_snapshot(&self) {
        let snapshot = Snapshot::capture(&self.estimator, &self.simulator);
        match serde_json::to_string(&snapshot) {
            Ok(json) => log::info!("{}", json),
            Err(e) => log::warn!("Snapshot not serializable: {}", e),
        }
        log::info!("{}", self.estimator.status_line());
    }

    fn run<C: Clock>(&mut self, ticker: &mut FixedTicker<C>, max_ticks: u64) -> u64 {
        let mut ticks = 0u64;
        ticker.run(|dt| {
            self.estimator.pump(&mut self.source, self.samples_per_tick);
            let tilt = self.estimator.tilt();
            let outcome = self.simulator.tick(dt, tilt.roll, tilt.pitch);
            ticks += 1;

            if outcome.goal_reached || ticks % SNAPSHOT_EVERY == 0 {
                self.log_snapshot();
            }
            if outcome.goal_reached || ticks >= max_ticks {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

fn log_altimeter(settings: &Settings) {
    let mut baro = SimulatedBarometer::new(settings.seed);
    for _ in 0..5 {
        baro.step();
    }
    let pressure = baro.pressure();
    log::info!(
        "Altimeter (simulated): {:.1} hPa -> {:.0} m",
        pressure,
        pressure_to_altitude(pressure, settings.sea_level_pressure)
    );
    if settings.sea_level_pressure != SEA_LEVEL_PRESSURE {
        log::debug!("Using custom sea level pressure {}", settings.sea_level_pressure);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tilt Maze starting...");

    let args = parse_args();
    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log_altimeter(&settings);

    let interval = Duration::from_millis(settings.tick_ms);
    let mut session = Session::new(settings);
    session.start();

    let ticks = if args.realtime {
        let mut ticker = FixedTicker::new(SystemClock::new(), interval);
        session.run(&mut ticker, args.ticks)
    } else {
        // Simulated time: same cadence, no waiting
        let clock = ManualClock::new();
        let mut ticker = FixedTicker::new(&clock, interval);
        session.run(&mut ticker, args.ticks)
    };

    session.stop();
    session.log_snapshot();
    log::info!(
        "Session finished after {} ticks ({:.1} s simulated), goal {}",
        ticks,
        ticks as f32 * session.settings.tick_dt(),
        if session.simulator.goal_reached() { "reached" } else { "not reached" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host for this crate; the library is the product
}
