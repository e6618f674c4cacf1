//! Board state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{FractionalRect, Rect};
use crate::consts::*;

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Board size or start position not known yet
    #[default]
    Idle,
    /// Ball is rolling
    Running,
    /// Ball entered the goal; stays here until reset
    GoalReached,
}

/// Physics tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Acceleration at full tilt (units/s²)
    pub accel_scale: f32,
    /// Per-tick velocity multiplier
    pub damping: f32,
    /// Velocity scale after bouncing off an obstacle
    pub bounce: f32,
    /// Tilt (degrees) that saturates acceleration
    pub tilt_full_scale_deg: f32,
    pub ball_radius: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            accel_scale: ACCEL_SCALE,
            damping: DAMPING,
            bounce: BOUNCE,
            tilt_full_scale_deg: TILT_FULL_SCALE_DEG,
            ball_radius: BALL_RADIUS,
        }
    }
}

/// Maze geometry as board fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeLayout {
    /// Static obstacles, checked in this order
    pub obstacles: Vec<FractionalRect>,
    pub goal: FractionalRect,
    /// Start position as board fractions
    pub start: Vec2,
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self {
            obstacles: vec![
                FractionalRect::new(0.05, 0.25, 0.95, 0.3),
                FractionalRect::new(0.05, 0.45, 0.75, 0.5),
                FractionalRect::new(0.25, 0.65, 0.95, 0.7),
                FractionalRect::new(0.05, 0.15, 0.15, 0.75),
                FractionalRect::new(0.85, 0.35, 0.95, 0.85),
            ],
            goal: FractionalRect::new(0.35, 0.05, 0.65, 0.12),
            start: Vec2::new(START_FRACTION.0, START_FRACTION.1),
        }
    }
}

impl MazeLayout {
    /// Open board: no obstacles, goal in the top strip
    pub fn open() -> Self {
        Self {
            obstacles: Vec::new(),
            ..Self::default()
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }
}

/// Clamp one axis into `[radius, dim - radius]`
///
/// Boards narrower than the ball pin it to the middle.
#[inline]
pub fn clamp_axis(value: f32, radius: f32, dim: f32) -> f32 {
    if dim <= 2.0 * radius {
        dim / 2.0
    } else {
        value.clamp(radius, dim - radius)
    }
}

/// Check board dimensions are usable
#[inline]
pub fn valid_board_size(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// Complete board state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardState {
    /// Board width/height
    pub size: Vec2,
    pub ball: Ball,
    /// Where the ball returns on reset
    pub start: Vec2,
    pub layout: MazeLayout,
    pub phase: SimPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl BoardState {
    /// Create a running board with the ball at rest at `start`
    ///
    /// Returns None for non-positive or non-finite dimensions.
    pub fn new(
        width: f32,
        height: f32,
        start: Vec2,
        layout: MazeLayout,
        ball_radius: f32,
    ) -> Option<Self> {
        if !valid_board_size(width, height) {
            return None;
        }
        let size = Vec2::new(width, height);
        let start = Self::clamp_to_board(start, ball_radius, size);
        Some(Self {
            size,
            ball: Ball::at_rest(start, ball_radius),
            start,
            layout,
            phase: SimPhase::Running,
            time_ticks: 0,
        })
    }

    /// Clamp a point so a ball of `radius` stays fully on the board
    pub fn clamp_to_board(p: Vec2, radius: f32, size: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(p.x, radius, size.x),
            clamp_axis(p.y, radius, size.y),
        )
    }

    /// Obstacles resolved against the current size
    pub fn obstacles(&self) -> impl Iterator<Item = Rect> + '_ {
        self.layout.obstacles.iter().map(|o| o.resolve(self.size))
    }

    /// Goal resolved against the current size
    pub fn goal(&self) -> Rect {
        self.layout.goal.resolve(self.size)
    }

    pub fn goal_reached(&self) -> bool {
        self.phase == SimPhase::GoalReached
    }

    /// Put the ball back at the start, at rest, and clear the goal
    pub fn reset(&mut self) {
        self.ball = Ball::at_rest(self.start, self.ball.radius);
        self.phase = SimPhase::Running;
        self.time_ticks = 0;
    }

    /// Adopt a new board size
    ///
    /// Obstacles and goal follow the size on their next access. The ball
    /// and start keep their board coordinates, clamped into the new bounds.
    /// Returns false (and changes nothing) for an invalid size.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !valid_board_size(width, height) {
            return false;
        }
        let new_size = Vec2::new(width, height);
        let radius = self.ball.radius;
        self.start = Self::clamp_to_board(self.start, radius, new_size);
        self.ball.pos = Self::clamp_to_board(self.ball.pos, radius, new_size);
        self.size = new_size;
        true
    }
}
