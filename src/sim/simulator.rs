//! Simulation driver
//!
//! Owns the [`BoardState`] once the board size is known. Tilt is read in
//! each tick as a plain value; the simulator never holds a reference to
//! the orientation estimator.

use glam::Vec2;

use super::state::{BoardState, MazeLayout, Physics, SimPhase, valid_board_size};
use super::tick::{TickInput, TickOutcome, tick};
use crate::error::{Result, SetupError};

/// Tilt-driven ball maze
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    physics: Physics,
    layout: MazeLayout,
    board: Option<BoardState>,
}

impl Simulator {
    pub fn new(physics: Physics, layout: MazeLayout) -> Self {
        Self {
            physics,
            layout,
            board: None,
        }
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn board(&self) -> Option<&BoardState> {
        self.board.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.board.is_some()
    }

    pub fn phase(&self) -> SimPhase {
        self.board.as_ref().map(|b| b.phase).unwrap_or(SimPhase::Idle)
    }

    pub fn goal_reached(&self) -> bool {
        self.phase() == SimPhase::GoalReached
    }

    /// Set up (or re-set up) the board with the ball at rest at `start`
    ///
    /// A non-positive dimension leaves the simulator uninitialized.
    pub fn initialize(&mut self, width: f32, height: f32, start: Vec2) -> Result<()> {
        let Some(board) = BoardState::new(
            width,
            height,
            start,
            self.layout.clone(),
            self.physics.ball_radius,
        ) else {
            log::warn!("Ignoring board size {}x{}", width, height);
            return Err(SetupError::InvalidBoardSize { width, height });
        };
        log::info!(
            "Board initialized {}x{}, ball at ({:.1}, {:.1})",
            width,
            height,
            board.ball.pos.x,
            board.ball.pos.y
        );
        self.board = Some(board);
        Ok(())
    }

    /// Report a measured board size
    ///
    /// The first valid size initializes the board at the layout's start
    /// fraction. Later sizes keep the ball where it is (clamped) and
    /// re-resolve the maze against the new size.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        if !valid_board_size(width, height) {
            return Err(SetupError::InvalidBoardSize { width, height });
        }
        match self.board.as_mut() {
            Some(board) => {
                board.resize(width, height);
                log::debug!("Board resized to {}x{}", width, height);
                Ok(())
            }
            None => {
                let start = self.layout.start * Vec2::new(width, height);
                self.initialize(width, height, start)
            }
        }
    }

    /// Ball back to the start at rest, goal cleared
    pub fn reset(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.reset();
            log::info!("Simulation reset");
        }
    }

    /// Advance one tick. No-op until initialized.
    pub fn tick(&mut self, dt: f32, roll: f32, pitch: f32) -> TickOutcome {
        match self.board.as_mut() {
            Some(board) => tick(board, &self.physics, &TickInput::new(roll, pitch), dt),
            None => TickOutcome::default(),
        }
    }
}
