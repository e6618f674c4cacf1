//! Axis-aligned rectangle geometry for obstacles and the goal
//!
//! Maze geometry is authored as fractions of the board so it survives
//! resizes. A [`FractionalRect`] is resolved to a board-space [`Rect`]
//! on demand and never cached across size changes.
//!
//! Containment is half-open: `left <= x < right`, `top <= y < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle in board units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if a point is inside the rectangle (half-open)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

/// Rectangle defined as fractions of the board size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl FractionalRect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Resolve against the current board size
    pub fn resolve(&self, board: Vec2) -> Rect {
        Rect::new(
            self.left * board.x,
            self.top * board.y,
            self.right * board.x,
            self.bottom * board.y,
        )
    }
}
