//! Deterministic ball simulation
//!
//! All maze logic lives here. This module must stay pure and deterministic:
//! - Caller-supplied dt only, no clock reads
//! - Stable obstacle iteration order
//! - No rendering or sensor dependencies

pub mod collision;
pub mod rect;
pub mod simulator;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_in_goal, bounce_velocity, first_obstacle_hit};
pub use rect::{FractionalRect, Rect};
pub use simulator::Simulator;
pub use state::{Ball, BoardState, MazeLayout, Physics, SimPhase, clamp_axis, valid_board_size};
pub use tick::{TickInput, TickOutcome, tick, tilt_to_acceleration};
