//! Renderer-facing view of the current state
//!
//! Built once per UI refresh. The renderer gets plain values and never
//! touches the estimator or simulator directly.

use glam::Vec2;
use serde::Serialize;

use crate::orientation::{OrientationEstimator, TiltState, cardinal};
use crate::sim::{Rect, SimPhase, Simulator};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Degrees in [0, 360), None while unavailable
    pub heading: Option<f32>,
    pub cardinal: Option<&'static str>,
    pub roll: f32,
    pub pitch: f32,
    /// Level gauge fill fractions
    pub roll_gauge: f32,
    pub pitch_gauge: f32,
    pub phase: SimPhase,
    /// None until the board size is known
    pub board_size: Option<Vec2>,
    pub ball: Option<Vec2>,
    pub ball_radius: f32,
    pub obstacles: Vec<Rect>,
    pub goal: Option<Rect>,
    pub goal_reached: bool,
}

impl Snapshot {
    pub fn capture(estimator: &OrientationEstimator, simulator: &Simulator) -> Self {
        let heading = estimator.heading();
        let tilt = estimator.tilt();
        let board = simulator.board();

        Self {
            heading,
            cardinal: heading.map(cardinal),
            roll: tilt.roll,
            pitch: tilt.pitch,
            roll_gauge: TiltState::gauge_progress(tilt.roll),
            pitch_gauge: TiltState::gauge_progress(tilt.pitch),
            phase: simulator.phase(),
            board_size: board.map(|b| b.size),
            ball: board.map(|b| b.ball.pos),
            ball_radius: simulator.physics().ball_radius,
            obstacles: board.map(|b| b.obstacles().collect()).unwrap_or_default(),
            goal: board.map(|b| b.goal()),
            goal_reached: simulator.goal_reached(),
        }
    }

    /// Heading text, "--" while unavailable (never a fabricated number)
    pub fn heading_label(&self) -> String {
        match self.heading {
            Some(h) => format!("{}°", h as i32),
            None => "--".to_string(),
        }
    }

    pub fn goal_label(&self) -> &'static str {
        if self.goal_reached {
            "Goal reached!"
        } else {
            "Goal: roll into the green zone"
        }
    }
}
