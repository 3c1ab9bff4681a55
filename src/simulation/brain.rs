//! Neural network implementation for agent controllers.
//!
//! A multi-layer perceptron with tanh activation on every layer, the input
//! layer included, and no biases. The genome is the flat concatenation of all
//! weight matrices, layer by layer, row-major (`output × input`).

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::controller::{Controller, ControllerBuilder};
use super::error::SimulationError;

/// A fully connected layer without bias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
}

impl Mlp {
    /// Creates a layer from `output_size * input_size` row-major weights.
    pub fn from_slice(input_size: usize, output_size: usize, weights: &[f32]) -> Self {
        let weights = Array2::from_shape_fn((output_size, input_size), |(o, i)| weights[o * input_size + i]);
        Self { weights }
    }

    /// Performs forward pass with tanh activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output.mapv_inplace(f32::tanh);
        output
    }
}

/// A multi-layer perceptron neural network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Number of weights a network with these layer sizes needs.
    pub fn parameter_count(layer_sizes: &[usize]) -> usize {
        layer_sizes.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }

    /// Rebuilds a network from a flat genome.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::GenomeLength`] if the genome does not match
    /// the layer sizes.
    pub fn from_flat(layer_sizes: &[usize], weights: &Array1<f32>) -> Result<Self, SimulationError> {
        let expected = Self::parameter_count(layer_sizes);
        if weights.len() != expected {
            return Err(SimulationError::GenomeLength {
                expected,
                actual: weights.len(),
            });
        }

        let flat = weights.to_vec();
        let mut offset = 0;
        let layers = layer_sizes
            .windows(2)
            .map(|pair| {
                let len = pair[0] * pair[1];
                let layer = Mlp::from_slice(pair[0], pair[1], &flat[offset..offset + len]);
                offset += len;
                layer
            })
            .collect();

        Ok(Self { layers })
    }

    /// Runs a forward pass through all layers.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        // the input layer squashes too
        let mut output = inputs.mapv(f32::tanh);
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Flattens all weights back into genome order.
    pub fn to_flat_vector(&self) -> Array1<f32> {
        self.layers
            .iter()
            .flat_map(|layer| layer.weights.iter().copied())
            .collect()
    }
}

impl Controller for Brain {
    fn evaluate(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self.think(inputs)
    }

    fn parameter_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.weights.len()).sum()
    }
}

/// Builds [`Brain`] controllers for a fixed layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainBuilder {
    layer_sizes: Vec<usize>,
}

impl BrainBuilder {
    /// Creates a builder for networks with the given layer sizes.
    pub fn new(layer_sizes: Vec<usize>) -> Self {
        Self { layer_sizes }
    }

    /// Layer sizes from input to output.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }
}

impl ControllerBuilder for BrainBuilder {
    fn parameter_count(&self) -> usize {
        Brain::parameter_count(&self.layer_sizes)
    }

    fn build(&self, weights: &Array1<f32>) -> Result<Box<dyn Controller>, SimulationError> {
        Ok(Box::new(Brain::from_flat(&self.layer_sizes, weights)?))
    }
}
