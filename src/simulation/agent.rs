//! Agents ("pandas"): controller-driven creatures with health and a score.
//!
//! Lifecycle: `Alive → Dying → Removed`. An alive agent senses, steers, eats
//! and starves. A dying agent is frozen in place until its removal timer
//! fires; it keeps its score but can no longer add to it. Removal evicts the
//! agent from the world, leaving only its [`AgentOutcome`] behind.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::controller::{Controller, Steering};
use super::genome::GenomeId;
use super::geometric_utils::{heading_vector, wrap_angle};
use super::hazard::Hazard;
use super::locatable::Locatable;
use super::resource::Resource;
use super::sensor::{SensorArray, SensorReading};
use super::spatial::SpatialIndex;
use super::timers::TimerHandle;

/// Identifier of an agent within one generation. Agents update in ascending id order.
pub type AgentId = usize;

/// Lifecycle state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    /// Sensing, moving and eating.
    Alive,
    /// Dead, waiting for removal.
    Dying,
    /// Evicted from the world.
    Removed,
}

/// What remains of an agent for scoring purposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    /// Agent this outcome belongs to.
    pub id: AgentId,
    /// Genome the agent was built from.
    pub genome_id: GenomeId,
    /// Resources eaten over the generation.
    pub resources_eaten: u32,
    /// State at the time the outcome was taken.
    pub state: AgentState,
}

impl AgentOutcome {
    /// Fitness: resources eaten, plus `survival_bonus` if still alive.
    pub fn fitness(&self, survival_bonus: f32) -> f32 {
        let bonus = if self.state == AgentState::Alive {
            survival_bonus
        } else {
            0.0
        };
        self.resources_eaten as f32 + bonus
    }
}

/// A simulated agent bound to one genome.
#[derive(Debug)]
pub struct Agent {
    /// Unique identifier within the generation.
    pub id: AgentId,
    /// Genome the controller was built from.
    pub genome_id: GenomeId,
    /// Position on the arena plane.
    pub pos: Array1<f32>,
    /// Heading in radians, counter-clockwise from +x.
    pub heading: f32,
    /// Health in `[0, max_health]`.
    pub health: f32,
    /// Lifecycle state.
    pub state: AgentState,
    /// Resources eaten so far. Never decreases.
    pub resources_eaten: u32,
    /// Last sensor reading fed to the controller.
    pub sensors: SensorReading,
    /// Pending removal timer while dying.
    pub removal: Option<TimerHandle>,
    max_health: f32,
    controller: Box<dyn Controller>,
}

impl Agent {
    /// Creates a healthy agent.
    pub fn new(
        id: AgentId,
        genome_id: GenomeId,
        pos: Array1<f32>,
        heading: f32,
        controller: Box<dyn Controller>,
        sensor_slots: usize,
        max_health: f32,
    ) -> Self {
        Self {
            id,
            genome_id,
            pos,
            heading: wrap_angle(heading),
            health: max_health,
            state: AgentState::Alive,
            resources_eaten: 0,
            sensors: SensorReading::empty(sensor_slots),
            removal: None,
            max_health,
            controller,
        }
    }

    /// Checks if the agent is alive.
    pub fn is_alive(&self) -> bool {
        self.state == AgentState::Alive
    }

    /// Checks if the agent is waiting for removal.
    pub fn is_dying(&self) -> bool {
        self.state == AgentState::Dying
    }

    /// Health as a fraction of the maximum, for display.
    pub fn health_fraction(&self) -> f32 {
        self.health / self.max_health
    }

    /// Reads the sensors and asks the controller how to move.
    pub fn think(
        &mut self,
        sensor: &SensorArray,
        resources: &[Resource],
        hazards: &[Hazard],
        index: Option<&SpatialIndex>,
        base_turn_speed: f32,
        base_speed: f32,
    ) -> Steering {
        self.sensors = sensor.sense(&self.pos, self.heading, resources, hazards, index);
        let output = self.controller.evaluate(&self.sensors.input_vector());
        Steering::from_output(&output, base_turn_speed, base_speed)
    }

    /// Turns first, then advances along the new heading.
    pub fn steer(&mut self, steering: Steering) {
        self.heading = wrap_angle(self.heading + steering.turn);
        self.pos += &(heading_vector(self.heading) * steering.advance);
    }

    /// Records a meal and heals, clamped to the maximum health.
    pub fn eat(&mut self, bonus: f32) {
        self.resources_eaten += 1;
        self.set_health(self.health + bonus);
    }

    /// Drains health for one frame. Returns `true` if the agent is starved.
    pub fn starve(&mut self, amount: f32) -> bool {
        self.set_health(self.health - amount);
        self.health <= 0.0
    }

    /// Moves an alive agent to `Dying` with zero health.
    ///
    /// Returns `false` if the agent was not alive, so callers schedule at most
    /// one removal per agent.
    pub fn die(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = 0.0;
        self.state = AgentState::Dying;
        true
    }

    /// Sets health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// Current scoring outcome.
    pub fn outcome(&self) -> AgentOutcome {
        AgentOutcome {
            id: self.id,
            genome_id: self.genome_id,
            resources_eaten: self.resources_eaten,
            state: self.state,
        }
    }

    /// Consumes the agent, dropping its controller and sensor buffers.
    pub fn retire(self) -> AgentOutcome {
        AgentOutcome {
            state: AgentState::Removed,
            ..self.outcome()
        }
    }
}

impl Locatable for Agent {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn blocks_placement(&self) -> bool {
        self.is_alive()
    }
}
