//! Controller capability: map a sensor vector to an action vector.
//!
//! The engine never looks inside a controller. It only needs a deterministic
//! `evaluate` and a parameter count that matches the genome length, so any
//! implementation of these traits can drive the agents.

use ndarray::Array1;

use super::error::SimulationError;

/// Index of the turn signal in a controller output.
pub const TURN: usize = 0;
/// Index of the throttle signal in a controller output.
pub const THROTTLE: usize = 1;

/// A policy parameterized by one genome.
pub trait Controller: Send + std::fmt::Debug {
    /// Maps the sensor input vector to `[turn, throttle]`, both in `[-1, 1]`.
    ///
    /// Must be deterministic for a fixed input and fixed weights.
    fn evaluate(&self, inputs: &Array1<f32>) -> Array1<f32>;

    /// Number of weights this controller was built from.
    fn parameter_count(&self) -> usize;
}

/// Builds controllers from genome weight vectors.
pub trait ControllerBuilder: Send + Sync {
    /// Genome length expected by [`ControllerBuilder::build`].
    fn parameter_count(&self) -> usize;

    /// Creates a controller from a flat weight vector.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::GenomeLength`] if `weights` has the wrong length.
    fn build(&self, weights: &Array1<f32>) -> Result<Box<dyn Controller>, SimulationError>;
}

/// Movement derived from one controller output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Heading change in radians.
    pub turn: f32,
    /// Forward displacement, never negative.
    pub advance: f32,
}

impl Steering {
    /// Scales raw controller signals by the agent's base speeds.
    ///
    /// Out-of-range signals are clamped to `[-1, 1]` first.
    pub fn from_output(output: &Array1<f32>, base_turn_speed: f32, base_speed: f32) -> Self {
        let turn = output.get(TURN).copied().unwrap_or(0.0).clamp(-1.0, 1.0);
        let throttle = output.get(THROTTLE).copied().unwrap_or(-1.0).clamp(-1.0, 1.0);
        Self {
            turn: turn * base_turn_speed,
            advance: (throttle + 1.0) * base_speed,
        }
    }
}
