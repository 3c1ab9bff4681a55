//! Simulation parameters.
//!
//! Every knob of a run is fixed at process start. Defaults reproduce the
//! classic 164×164 arena with 8 agents, 16 carrots and 8 field spikes.

use std::ops::RangeBounds;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// Simulation parameters that control arena layout, agent physiology and evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Arena width along x. The arena is centered at the origin.
    pub arena_width: f32,
    /// Arena height along y.
    pub arena_height: f32,
    /// Number of agents, which is also the population size.
    pub agent_count: usize,
    /// Number of resources placed each generation.
    pub resource_count: usize,
    /// Number of field hazards placed each generation.
    pub field_hazard_count: usize,
    /// Distance between neighbouring boundary hazards.
    pub boundary_spacing: f32,

    /// Number of angular sensor slots per agent.
    pub sensor_count: usize,
    /// Total horizontal field of view covered by the sensor slots, in radians.
    pub sensor_fov: f32,
    /// Depth of each sensor frustum.
    pub view_distance: f32,
    /// Hidden layer sizes of the default controller.
    pub hidden_layers: Vec<usize>,

    /// Forward speed multiplier.
    pub base_speed: f32,
    /// Turn speed multiplier in radians per frame.
    pub base_turn_speed: f32,
    /// Health lost every frame while alive.
    pub health_decay: f32,
    /// Health gained when eating a resource.
    pub eat_bonus: f32,
    /// Upper bound of health, also the starting value.
    pub max_health: f32,

    /// Squared distance below which an agent eats a resource.
    pub resource_contact: f32,
    /// Squared distance below which a hazard kills an agent.
    pub hazard_contact: f32,
    /// Minimum squared distance between a newly placed entity and its constraints.
    pub exclusion_threshold: f32,
    /// Inset of the field hazard sampling rectangle.
    pub hazard_margin: f32,
    /// Inset of the agent sampling rectangle.
    pub agent_margin: f32,
    /// Inset of the resource sampling rectangle.
    pub resource_margin: f32,
    /// Draws per placement round before the threshold is relaxed.
    pub placement_max_attempts: usize,
    /// How many times placement may halve the threshold before failing.
    pub placement_relaxations: usize,

    /// Delay before an eaten resource reappears, in simulation seconds.
    pub respawn_delay: f32,
    /// Delay between dying and removal, in simulation seconds.
    pub removal_delay: f32,
    /// Simulation seconds per frame.
    pub dt: f32,

    /// Frames a generation may last.
    pub frames_per_generation: u32,
    /// Last generation index that is still simulated.
    pub max_generations: u32,
    /// Generations before the stagnation check applies.
    pub warmup_generations: u32,
    /// Average score below which a late generation counts as stagnant.
    pub stagnation_floor: f32,
    /// Fitness bonus for agents alive at generation end.
    pub survival_bonus: f32,

    /// Per-gene mutation probability.
    pub mutation_rate: f32,
    /// Probability that two selected parents are recombined.
    pub crossover_rate: f32,
    /// Copy the best genome unchanged into the next generation.
    pub elitism: bool,
    /// Genome weights live in `[-weight_range, weight_range]`.
    pub weight_range: f32,
    /// Emit the best-genome record every this many generations.
    pub best_record_interval: u32,

    /// Seed for reproducible runs. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            arena_width: 164.0,
            arena_height: 164.0,
            agent_count: 8,
            resource_count: 16,
            field_hazard_count: 8,
            boundary_spacing: 8.0,
            sensor_count: 7,
            sensor_fov: std::f32::consts::PI,
            view_distance: 50.0,
            hidden_layers: vec![12, 6],
            base_speed: 1.0,
            base_turn_speed: 10f32.to_radians(),
            health_decay: 0.2,
            eat_bonus: 40.0,
            max_health: 100.0,
            resource_contact: 10.0,
            hazard_contact: 20.0,
            exclusion_threshold: 100.0,
            hazard_margin: 10.0,
            agent_margin: 50.0,
            resource_margin: 50.0,
            placement_max_attempts: 10_000,
            placement_relaxations: 3,
            respawn_delay: 2.5,
            removal_delay: 3.0,
            dt: 1.0 / 60.0,
            frames_per_generation: 1024,
            max_generations: 32,
            warmup_generations: 20,
            stagnation_floor: 0.5,
            survival_bonus: 3.0,
            mutation_rate: 0.05,
            crossover_rate: 0.9,
            elitism: false,
            weight_range: 3.0,
            best_record_interval: 10,
            seed: None,
        }
    }
}

impl Params {
    /// Loads parameters from a TOML file. Missing keys fall back to [`Params::default`].
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if the values are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let text = std::fs::read_to_string(path)?;
        let params: Params = toml::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    /// Layer sizes of the default controller: `2N` inputs, hidden layers, 2 outputs.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.sensor_count * 2);
        sizes.extend(&self.hidden_layers);
        sizes.push(2);
        sizes
    }

    /// Converts a delay in simulation seconds to whole frames.
    pub fn delay_frames(&self, seconds: f32) -> u64 {
        (f64::from(seconds) / f64::from(self.dt)).round() as u64
    }

    /// Checks that the parameters describe a runnable arena.
    pub fn validate(&self) -> Result<(), SimulationError> {
        check_num("arena_width", self.arena_width, 1.0..)?;
        check_num("arena_height", self.arena_height, 1.0..)?;
        check_num("agent_count", self.agent_count, 1..)?;
        check_num("boundary_spacing", self.boundary_spacing, f32::EPSILON..)?;
        check_num("sensor_count", self.sensor_count, 1..)?;
        check_num(
            "sensor_fov",
            self.sensor_fov,
            f32::EPSILON..std::f32::consts::TAU,
        )?;
        check_num("view_distance", self.view_distance, f32::EPSILON..)?;
        check_num("max_health", self.max_health, f32::EPSILON..)?;
        check_num("health_decay", self.health_decay, 0.0..)?;
        check_num("resource_contact", self.resource_contact, 0.0..)?;
        check_num("hazard_contact", self.hazard_contact, 0.0..)?;
        check_num("exclusion_threshold", self.exclusion_threshold, 0.0..)?;
        check_num("placement_max_attempts", self.placement_max_attempts, 1..)?;
        check_num("dt", self.dt, f32::EPSILON..)?;
        check_num("respawn_delay", self.respawn_delay, 0.0..)?;
        check_num("removal_delay", self.removal_delay, 0.0..)?;
        check_num("frames_per_generation", self.frames_per_generation, 1..)?;
        check_num("mutation_rate", self.mutation_rate, 0.0..=1.0)?;
        check_num("crossover_rate", self.crossover_rate, 0.0..=1.0)?;
        check_num("weight_range", self.weight_range, f32::EPSILON..)?;
        check_num("best_record_interval", self.best_record_interval, 1..)?;

        if self.sensor_fov / self.sensor_count as f32 >= std::f32::consts::PI {
            return Err(SimulationError::InvalidConfig(
                "each sensor slot must be narrower than a half turn".to_string(),
            ));
        }

        if self.hidden_layers.contains(&0) {
            return Err(SimulationError::InvalidConfig(
                "hidden layers must not be empty".to_string(),
            ));
        }

        for (name, margin) in [
            ("hazard_margin", self.hazard_margin),
            ("agent_margin", self.agent_margin),
            ("resource_margin", self.resource_margin),
        ] {
            if 2.0 * margin >= self.arena_width.min(self.arena_height) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} {margin} leaves no room inside a {}x{} arena",
                    self.arena_width, self.arena_height
                )));
            }
        }

        Ok(())
    }
}

fn check_num<T, R>(name: &str, num: T, range: R) -> Result<(), SimulationError>
where
    T: PartialOrd + std::fmt::Debug,
    R: RangeBounds<T> + std::fmt::Debug,
{
    if !range.contains(&num) {
        return Err(SimulationError::InvalidConfig(format!(
            "{name} must be in the range {range:?}, but is {num:?}"
        )));
    }
    Ok(())
}
