//! Orientation estimation
//!
//! - Compass heading from accelerometer + magnetometer (latest-value fusion)
//! - Roll/pitch from integrated gyroscope angular velocity
//!
//! Heading absence is always explicit (`None`), never a default number.

pub mod estimator;
pub mod heading;
pub mod tilt;

pub use estimator::OrientationEstimator;
pub use heading::{azimuth, cardinal, compute_heading, rotation_matrix};
pub use tilt::{GyroIntegrator, TiltState};
