//! Collision detection and response against static rectangles
//!
//! Point-in-rectangle test on the proposed ball center, not a swept test.
//! A fast ball can tunnel through a thin obstacle in one tick.

use glam::Vec2;

use super::rect::Rect;

/// Result of an obstacle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Index of the obstacle hit (iteration order)
    pub obstacle: usize,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            obstacle: 0,
        }
    }
}

/// Find the first obstacle containing `point`
///
/// If several overlap, the first in iteration order wins.
pub fn first_obstacle_hit<I>(point: Vec2, obstacles: I) -> CollisionResult
where
    I: IntoIterator<Item = Rect>,
{
    obstacles
        .into_iter()
        .position(|rect| rect.contains_point(point))
        .map(|obstacle| CollisionResult {
            hit: true,
            obstacle,
        })
        .unwrap_or_else(CollisionResult::miss)
}

/// Bounce-back response: reverse and scale the velocity
#[inline]
pub fn bounce_velocity(velocity: Vec2, bounce: f32) -> Vec2 {
    -velocity * bounce
}

/// Check if the ball center lies inside the goal
#[inline]
pub fn ball_in_goal(ball_pos: Vec2, goal: &Rect) -> bool {
    goal.contains_point(ball_pos)
}
