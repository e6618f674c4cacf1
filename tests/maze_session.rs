//! End-to-end: scripted sensors -> estimator -> simulator -> snapshot

use std::ops::ControlFlow;
use std::time::Duration;

use glam::{Vec2, Vec3};

use tilt_maze::platform::{FixedTicker, ManualClock};
use tilt_maze::sensors::{ScriptStep, ScriptedSource, SensorKind, SensorSource, SensorStatus};
use tilt_maze::sim::{MazeLayout, Physics, SimPhase};
use tilt_maze::{OrientationEstimator, SetupError, Simulator, Snapshot};

const TICK_MS: u64 = 16;
const SENSOR_MS: u32 = 4;
const SAMPLES_PER_TICK: usize = (TICK_MS as usize / SENSOR_MS as usize) * 3;

/// Tip the top edge of the device down about 20 degrees and hold
fn tip_forward_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::still(100, 0.0),
        ScriptStep::new(600, 0.0, Vec3::new(-0.6, 0.0, 0.0)),
        ScriptStep::still(60_000, 0.0),
    ]
}

fn run_ticks(
    source: &mut ScriptedSource,
    estimator: &mut OrientationEstimator,
    simulator: &mut Simulator,
    max_ticks: u64,
) -> u64 {
    let clock = ManualClock::new();
    let mut ticker = FixedTicker::new(&clock, Duration::from_millis(TICK_MS));
    let mut ticks = 0;
    ticker.run(|dt| {
        estimator.pump(source, SAMPLES_PER_TICK);
        let tilt = estimator.tilt();
        let outcome = simulator.tick(dt, tilt.roll, tilt.pitch);
        ticks += 1;
        if outcome.goal_reached || ticks >= max_ticks {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
}

#[test]
fn test_tipping_forward_rolls_ball_into_goal() {
    let mut source = ScriptedSource::new(tip_forward_script(), SENSOR_MS, 11);
    let mut estimator = OrientationEstimator::new();
    let mut simulator = Simulator::new(Physics::default(), MazeLayout::open());

    estimator.start(&mut source).unwrap();
    simulator.resize(400.0, 800.0).unwrap();

    let ticks = run_ticks(&mut source, &mut estimator, &mut simulator, 1_000);
    assert!(ticks < 1_000, "goal not reached");
    assert!(simulator.goal_reached());

    let tilt = estimator.tilt();
    assert!(tilt.roll < -15.0 && tilt.roll > -25.0, "roll {}", tilt.roll);
    assert_eq!(tilt.pitch, 0.0);

    let snapshot = Snapshot::capture(&estimator, &simulator);
    assert!(snapshot.goal_reached);
    assert_eq!(snapshot.heading_label(), "0°");
    let ball = snapshot.ball.unwrap();
    assert_eq!(ball.x, 200.0);
    assert!(snapshot.goal.unwrap().contains_point(ball));

    estimator.stop(&mut source);
    assert!(source.next_sample().is_none());
}

#[test]
fn test_missing_gyroscope_keeps_ball_still() {
    let mut source =
        ScriptedSource::new(tip_forward_script(), SENSOR_MS, 11).without(SensorKind::Gyroscope);
    let mut estimator = OrientationEstimator::new();
    let mut simulator = Simulator::default();

    let err = estimator.start(&mut source).unwrap_err();
    assert_eq!(err, SetupError::SensorUnavailable(SensorKind::Gyroscope));
    assert_eq!(estimator.status(SensorKind::Gyroscope), SensorStatus::Unavailable);
    simulator.resize(400.0, 800.0).unwrap();

    run_ticks(&mut source, &mut estimator, &mut simulator, 120);

    // Compass still works without the gyroscope
    assert!(estimator.heading().is_some());
    let board = simulator.board().unwrap();
    assert_eq!(board.ball.pos, Vec2::new(200.0, 680.0));
    assert_eq!(board.phase, SimPhase::Running);
}

#[test]
fn test_ticks_wait_for_board_size() {
    let mut source = ScriptedSource::new(tip_forward_script(), SENSOR_MS, 11);
    let mut estimator = OrientationEstimator::new();
    let mut simulator = Simulator::new(Physics::default(), MazeLayout::open());
    estimator.start(&mut source).unwrap();

    // Layout pass has not reported a size yet
    assert!(simulator.resize(0.0, 0.0).is_err());
    run_ticks(&mut source, &mut estimator, &mut simulator, 60);
    assert_eq!(simulator.phase(), SimPhase::Idle);
    assert!(Snapshot::capture(&estimator, &simulator).ball.is_none());

    simulator.resize(400.0, 800.0).unwrap();
    run_ticks(&mut source, &mut estimator, &mut simulator, 60);
    let ball = simulator.board().unwrap().ball.pos;
    assert!(ball.y < 680.0);
}

#[test]
fn test_resize_mid_run_reresolves_maze() {
    let mut simulator = Simulator::default();
    simulator.resize(400.0, 800.0).unwrap();
    let before: Vec<_> = simulator.board().unwrap().obstacles().collect();

    simulator.resize(200.0, 400.0).unwrap();
    let after: Vec<_> = simulator.board().unwrap().obstacles().collect();

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert!((a.width() - b.width() / 2.0).abs() < 1e-3);
        assert!((a.height() - b.height() / 2.0).abs() < 1e-3);
    }
}
