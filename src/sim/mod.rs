//! Bounce simulation
//!
//! Pure and deterministic given its inputs:
//! - Per-tick velocity, no delta time
//! - Randomness only at construction, through a caller-supplied RNG
//! - No rendering or platform dependencies

pub mod bounds;
pub mod simulator;
pub mod speed;

pub use bounds::Bounds;
pub use simulator::{BounceSimulator, TickOutcome};
pub use speed::{SpeedRange, sample_axis_velocity};
