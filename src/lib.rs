//! # Evo Arena - neuro-evolution in a bounded 2D arena
//!
//! A fixed population of agents, each steered by a small neural network built
//! from its genome, forages for resources while avoiding lethal hazards.
//! Generations run for a fixed frame budget (or until everyone is dead), are
//! scored by what they ate and whether they survived, and are replaced by
//! offspring bred with a genetic algorithm.
//!
//! ## Features
//!
//! - Rejection-sampled placement with bounded retries
//! - Fan-of-frustums sensors (nearest resource or hazard per slot)
//! - MLP controllers (tanh, no biases) behind a pluggable controller trait
//! - Roulette selection, two-point crossover, Gaussian mutation
//! - Delayed respawn and removal timers tied to the world clock
//! - Per-generation and best-genome records through pluggable sinks
//! - Real-time visualization with egui/macroquad, headless batch runs
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Arena state and the per-frame update
//! - [`simulation::trainer`] - Generation loop, scoring and termination
//! - [`simulation::sensor`] - Agent perception
//! - [`simulation::brain`] - Neural network controller
//! - [`simulation::evolution`] - Genetic algorithm
//! - [`simulation::telemetry`] - Run records

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agents, their lifecycle and their scoring outcome.
    pub mod agent;
    /// Neural network implementation for agent controllers.
    pub mod brain;
    /// Controller and controller builder traits.
    pub mod controller;
    /// Simulation error type.
    pub mod error;
    /// Bounded log of recent events for display.
    pub mod event_log;
    /// Events reported by a world tick.
    pub mod events;
    /// Genetic algorithm over controller weights.
    pub mod evolution;
    /// Genomes and their fitness.
    pub mod genome;
    /// Geometric utility functions for distance and frustum calculations.
    pub mod geometric_utils;
    /// Lethal hazards and the boundary ring.
    pub mod hazard;
    /// Trait for entities with a position in the arena.
    ///
    /// The [`locatable::Locatable`] trait is implemented by agents, resources
    /// and hazards, and tells placement which of them currently block a spot.
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// Random placement under exclusion constraints.
    pub mod placement;
    /// Collectible resources.
    pub mod resource;
    /// Agent perception.
    pub mod sensor;
    /// Read-only frame views for renderers.
    pub mod snapshot;
    /// KD-tree index over resources and hazards.
    pub mod spatial;
    /// Run records and their sinks.
    pub mod telemetry;
    /// Delayed actions on the world clock.
    pub mod timers;
    /// Generation loop and termination rules.
    pub mod trainer;
    /// Arena state and per-frame update.
    pub mod world;
}
