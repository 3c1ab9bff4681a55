//! Error taxonomy of the simulation engine.

use thiserror::Error;

/// Errors raised by the simulation, evolution and persistence layers.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The parameters cannot describe a runnable arena.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Rejection sampling gave up after the retry cap.
    #[error("no free position after {attempts} attempts (last threshold {threshold})")]
    PlacementExhausted {
        /// Total number of candidates drawn.
        attempts: usize,
        /// Squared exclusion threshold of the final round.
        threshold: f32,
    },
    /// Average or best query on a generation without agents.
    #[error("population is empty")]
    EmptyPopulation,
    /// A genome does not match the controller's parameter count.
    #[error("genome has {actual} weights, controller expects {expected}")]
    GenomeLength {
        /// Parameter count of the controller.
        expected: usize,
        /// Length of the offending genome.
        actual: usize,
    },
    /// The evolver returned a population of the wrong size.
    #[error("evolver returned {actual} genomes, expected {expected}")]
    PopulationSize {
        /// Size of the population passed in.
        expected: usize,
        /// Size of the population returned.
        actual: usize,
    },
    /// A genome reached the evolver without a fitness score.
    #[error("genome {0} has not been evaluated")]
    Unevaluated(usize),
    /// The KD-trees could not be built, usually because of a non-finite position.
    #[error("spatial index error: {0}")]
    SpatialIndex(String),
    /// Filesystem failure while reading config or writing records.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Failure encoding a record.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Failure parsing a TOML config file.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
