//! Genomes: flat controller weight vectors plus their evaluated fitness.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Identifier of a genome within one generation.
pub type GenomeId = usize;

/// One individual of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Position of the genome in its generation.
    pub id: GenomeId,
    /// Controller weights.
    pub weights: Array1<f32>,
    /// Score assigned at generation end, `None` before evaluation.
    pub fitness: Option<f32>,
}

impl Genome {
    /// Creates an unevaluated genome.
    pub fn new(id: GenomeId, weights: Array1<f32>) -> Self {
        Self {
            id,
            weights,
            fitness: None,
        }
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the genome has no weights at all.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
