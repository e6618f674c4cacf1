//! Setup error types
//!
//! None of these are fatal. Hosts log them and fall back to an
//! "unavailable" display state.

use std::fmt;

use crate::sensors::SensorKind;

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors surfaced once at setup time
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// A required sensor type is absent on the device
    SensorUnavailable(SensorKind),
    /// Board dimensions were zero, negative or not finite
    InvalidBoardSize { width: f32, height: f32 },
    /// Settings could not be read or parsed
    Settings(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::SensorUnavailable(kind) => write!(f, "{} sensor unavailable", kind),
            SetupError::InvalidBoardSize { width, height } => {
                write!(f, "invalid board size {}x{}", width, height)
            }
            SetupError::Settings(msg) => write!(f, "settings error: {}", msg),
        }
    }
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SetupError::SensorUnavailable(SensorKind::Gyroscope);
        assert_eq!(err.to_string(), "gyroscope sensor unavailable");

        let err = SetupError::InvalidBoardSize {
            width: 0.0,
            height: 800.0,
        };
        assert_eq!(err.to_string(), "invalid board size 0x800");
    }
}
