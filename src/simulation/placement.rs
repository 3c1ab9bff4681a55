//! Rejection-sampling placement of entities under exclusion constraints.
//!
//! A candidate is drawn uniformly from the arena inset by a class margin and
//! accepted once its squared distance to every constraint position reaches the
//! exclusion threshold. Sampling is bounded: after each exhausted round the
//! threshold is halved, and after the last allowed relaxation placement fails
//! with [`SimulationError::PlacementExhausted`].

use ndarray::Array1;
use rand::Rng;

use super::error::SimulationError;
use super::geometric_utils::distance_squared;
use super::params::Params;

/// Samples positions inside a centered `width × height` arena.
#[derive(Debug, Clone)]
pub struct Placer {
    width: f32,
    height: f32,
    threshold: f32,
    max_attempts: usize,
    relaxations: usize,
}

impl Placer {
    /// Creates a placer with explicit limits.
    pub fn new(width: f32, height: f32, threshold: f32, max_attempts: usize, relaxations: usize) -> Self {
        Self {
            width,
            height,
            threshold,
            max_attempts,
            relaxations,
        }
    }

    /// Creates a placer from the arena and placement parameters.
    pub fn from_params(params: &Params) -> Self {
        Self::new(
            params.arena_width,
            params.arena_height,
            params.exclusion_threshold,
            params.placement_max_attempts,
            params.placement_relaxations,
        )
    }

    /// Squared exclusion threshold used for the first round.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Draws a position at least `threshold` (squared) away from every
    /// position yielded by `constraints`.
    ///
    /// `constraints` is cloned once per draw, so pass a cheap iterator over
    /// borrowed positions.
    pub fn place<'a, R, I>(&self, rng: &mut R, margin: f32, constraints: I) -> Result<Array1<f32>, SimulationError>
    where
        R: Rng + ?Sized,
        I: Iterator<Item = &'a Array1<f32>> + Clone,
    {
        let (min_x, max_x) = (-self.width / 2.0 + margin, self.width / 2.0 - margin);
        let (min_y, max_y) = (-self.height / 2.0 + margin, self.height / 2.0 - margin);
        if min_x >= max_x || min_y >= max_y {
            return Err(SimulationError::InvalidConfig(format!(
                "margin {margin} leaves no room inside a {}x{} arena",
                self.width, self.height
            )));
        }

        let mut threshold = self.threshold;
        let mut attempts = 0;

        for round in 0..=self.relaxations {
            if round > 0 {
                threshold /= 2.0;
                log::warn!(
                    "placement exhausted {} draws, relaxing exclusion threshold to {threshold}",
                    self.max_attempts
                );
            }

            for _ in 0..self.max_attempts {
                attempts += 1;
                let candidate = Array1::from_vec(vec![
                    rng.random_range(min_x..max_x),
                    rng.random_range(min_y..max_y),
                ]);

                let free = constraints
                    .clone()
                    .all(|pos| distance_squared(pos, &candidate) >= threshold);
                if free {
                    return Ok(candidate);
                }
            }
        }

        Err(SimulationError::PlacementExhausted {
            attempts,
            threshold,
        })
    }
}
