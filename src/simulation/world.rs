//! The arena: entity collections, per-frame update order and delayed actions.
//!
//! One [`World::tick`] advances everything by exactly one frame:
//! 1. timers due at the current clock frame fire (respawns, removals);
//! 2. alive agents run sense → decide → move → collide → starve, in
//!    ascending id order, each seeing the effects of the agents before it;
//! 3. the frame counter and the world clock advance.
//!
//! The clock counts frames since the world was created and never resets, so
//! delays are scheduled in whole frames and stay exact however long a run lasts.
//!
//! Generation boundaries are decided by the trainer, which calls
//! [`World::reset`] and [`World::populate`] to rebuild the arena.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::{Agent, AgentId, AgentOutcome};
use super::controller::ControllerBuilder;
use super::error::SimulationError;
use super::events::{DeathCause, EventQueue, SimulationEvent};
use super::genome::{Genome, GenomeId};
use super::geometric_utils::distance_squared;
use super::hazard::{Hazard, HazardKind, boundary_ring};
use super::locatable::blocking_positions;
use super::params::Params;
use super::placement::Placer;
use super::resource::{Resource, ResourceId};
use super::sensor::SensorArray;
use super::snapshot::{AgentView, FrameSnapshot, HazardView, ResourceView};
use super::spatial::SpatialIndex;
use super::timers::{Scheduler, TimerAction};

/// The arena and everything in it.
#[derive(Debug)]
pub struct World {
    /// Agents still in the world (alive or dying), in ascending id order.
    pub agents: Vec<Agent>,
    /// Outcomes of agents removed during the current generation.
    pub retired: Vec<AgentOutcome>,
    /// Resources of the current generation, indexed by id.
    pub resources: Vec<Resource>,
    /// Boundary hazards followed by the field hazards of the current generation.
    pub hazards: Vec<Hazard>,
    /// Pending respawn and removal timers.
    pub scheduler: Scheduler,
    /// Frames simulated since the world was created, across generations.
    pub clock: u64,
    /// Frames simulated in the current generation.
    pub frame: u32,
    /// Current generation index.
    pub generation: u32,
    placer: Placer,
    sensor: SensorArray,
    rng: StdRng,
    dt: f32,
}

impl World {
    /// Creates an empty arena surrounded by its boundary hazards.
    pub fn new(params: &Params) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            agents: Vec::with_capacity(params.agent_count),
            retired: Vec::new(),
            resources: Vec::with_capacity(params.resource_count),
            hazards: boundary_ring(params.arena_width, params.arena_height, params.boundary_spacing),
            scheduler: Scheduler::new(),
            clock: 0,
            frame: 0,
            generation: 0,
            placer: Placer::from_params(params),
            sensor: SensorArray::from_params(params),
            rng,
            dt: params.dt,
        }
    }

    /// Simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.clock as f64 * f64::from(self.dt)
    }

    /// Sensor layout shared by all agents.
    pub fn sensor(&self) -> &SensorArray {
        &self.sensor
    }

    /// Places field hazards, one agent per genome and the resources, in that order.
    ///
    /// Returns the genome → agent binding of the new generation.
    pub fn populate(
        &mut self,
        params: &Params,
        genomes: &[Genome],
        builder: &dyn ControllerBuilder,
    ) -> Result<HashMap<GenomeId, AgentId>, SimulationError> {
        for _ in 0..params.field_hazard_count {
            let field = self.hazards.iter().filter(|h| h.kind == HazardKind::Field).map(|h| &h.pos);
            let pos = self.placer.place(&mut self.rng, params.hazard_margin, field)?;
            self.hazards.push(Hazard::new(pos[0], pos[1], HazardKind::Field));
        }

        let mut bindings = HashMap::with_capacity(genomes.len());
        for (id, genome) in genomes.iter().enumerate() {
            let field = self.hazards.iter().filter(|h| h.kind == HazardKind::Field).map(|h| &h.pos);
            let constraints = blocking_positions(&self.agents).chain(field);
            let pos = self.placer.place(&mut self.rng, params.agent_margin, constraints)?;
            let heading = self.rng.random_range(0.0..std::f32::consts::TAU);
            let controller = builder.build(&genome.weights)?;

            self.agents.push(Agent::new(
                id,
                genome.id,
                pos,
                heading,
                controller,
                self.sensor.slots(),
                params.max_health,
            ));
            bindings.insert(genome.id, id);
        }

        for id in 0..params.resource_count {
            let field = self.hazards.iter().filter(|h| h.kind == HazardKind::Field).map(|h| &h.pos);
            let constraints = blocking_positions(&self.agents)
                .chain(field)
                .chain(blocking_positions(&self.resources));
            let pos = self.placer.place(&mut self.rng, params.resource_margin, constraints)?;
            self.resources.push(Resource::new(id, pos));
        }

        log::debug!(
            "generation {} populated: {} agents, {} resources, {} hazards",
            self.generation,
            self.agents.len(),
            self.resources.len(),
            self.hazards.len()
        );

        Ok(bindings)
    }

    /// Tears down the current generation and starts `generation` with an empty arena.
    ///
    /// Pending timers of the old generation are canceled, agents, resources and
    /// field hazards are dropped, boundary hazards stay.
    pub fn reset(&mut self, generation: u32) {
        let canceled = self.scheduler.cancel_generation(self.generation);
        log::debug!("generation {} reset, {canceled} timers canceled", self.generation);

        self.agents.clear();
        self.retired.clear();
        self.resources.clear();
        self.hazards.retain(|h| h.kind == HazardKind::Boundary);
        self.frame = 0;
        self.generation = generation;
    }

    /// Advances the world by one frame.
    pub fn tick(&mut self, params: &Params) -> Result<EventQueue, SimulationError> {
        let mut events = EventQueue::new();

        let mut due = self.scheduler.pop_due(self.clock).into_iter();
        while let Some(timer) = due.next() {
            let action = timer.action;
            match action {
                TimerAction::RespawnResource(resource_id) => {
                    if let Err(e) = self.respawn_resource(params, resource_id) {
                        // the failed respawn and the timers behind it retry next tick
                        self.scheduler.requeue(std::iter::once(timer).chain(due));
                        return Err(e);
                    }
                    events.push(SimulationEvent::ResourceRespawned { resource_id });
                }
                TimerAction::RemoveAgent(agent_id) => {
                    if self.remove_agent(agent_id) {
                        events.push(SimulationEvent::AgentRemoved { agent_id });
                    }
                }
            }
        }

        let index = SpatialIndex::build(&self.resources, &self.hazards)
            .map_err(|e| SimulationError::SpatialIndex(format!("{e:?}")))?;

        for agent in &mut self.agents {
            if !agent.is_alive() {
                continue;
            }

            let steering = agent.think(
                &self.sensor,
                &self.resources,
                &self.hazards,
                Some(&index),
                params.base_turn_speed,
                params.base_speed,
            );
            agent.steer(steering);

            // at most one meal per frame
            if let Some(resource) = self
                .resources
                .iter_mut()
                .find(|r| r.active && distance_squared(&r.pos, &agent.pos) < params.resource_contact)
            {
                if resource.consume() {
                    agent.eat(params.eat_bonus);
                    self.scheduler.schedule(
                        self.clock + params.delay_frames(params.respawn_delay),
                        self.generation,
                        TimerAction::RespawnResource(resource.id),
                    );
                    log::debug!("agent {} ate resource {}", agent.id, resource.id);
                    events.push(SimulationEvent::ResourceEaten {
                        agent_id: agent.id,
                        resource_id: resource.id,
                    });
                }
            }

            let touched = self
                .hazards
                .iter()
                .any(|h| distance_squared(&h.pos, &agent.pos) < params.hazard_contact);
            let cause = if touched {
                Some(DeathCause::Hazard)
            } else if agent.starve(params.health_decay) {
                Some(DeathCause::Starvation)
            } else {
                None
            };

            if let Some(cause) = cause {
                if agent.die() {
                    let handle = self.scheduler.schedule(
                        self.clock + params.delay_frames(params.removal_delay),
                        self.generation,
                        TimerAction::RemoveAgent(agent.id),
                    );
                    agent.removal = Some(handle);
                    log::debug!("agent {} died ({cause:?})", agent.id);
                    events.push(SimulationEvent::AgentDied {
                        agent_id: agent.id,
                        cause,
                    });
                }
            }
        }

        self.frame += 1;
        self.clock += 1;

        Ok(events)
    }

    /// Moves an eaten resource to a free spot and reactivates it.
    ///
    /// The spot avoids alive agents, every hazard and the other active resources
    /// as they are at the time of the call.
    pub fn respawn_resource(&mut self, params: &Params, resource_id: ResourceId) -> Result<(), SimulationError> {
        let constraints = blocking_positions(&self.agents)
            .chain(blocking_positions(&self.hazards))
            .chain(blocking_positions(&self.resources));
        let pos = self.placer.place(&mut self.rng, params.resource_margin, constraints)?;

        if let Some(resource) = self.resources.get_mut(resource_id) {
            resource.respawn(pos);
        }
        Ok(())
    }

    /// Evicts a dying agent, keeping only its outcome.
    fn remove_agent(&mut self, agent_id: AgentId) -> bool {
        let Some(idx) = self.agents.iter().position(|a| a.id == agent_id) else {
            return false;
        };
        let agent = self.agents.remove(idx);
        self.retired.push(agent.retire());
        true
    }

    /// Number of agents in the `Alive` state.
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Outcomes of every agent of the generation, removed ones included, by id.
    pub fn outcomes(&self) -> Vec<AgentOutcome> {
        let mut outcomes: Vec<AgentOutcome> = self
            .retired
            .iter()
            .copied()
            .chain(self.agents.iter().map(Agent::outcome))
            .collect();
        outcomes.sort_by_key(|o| o.id);
        outcomes
    }

    /// Mean number of resources eaten per agent of the generation.
    pub fn average_score(&self) -> Result<f32, SimulationError> {
        let outcomes = self.outcomes();
        if outcomes.is_empty() {
            return Err(SimulationError::EmptyPopulation);
        }
        let total: u32 = outcomes.iter().map(|o| o.resources_eaten).sum();
        Ok(total as f32 / outcomes.len() as f32)
    }

    /// The fittest agent of the generation. Ties go to the lowest id.
    pub fn best_agent(&self, survival_bonus: f32) -> Result<AgentOutcome, SimulationError> {
        self.outcomes()
            .into_iter()
            .reduce(|best, o| {
                if o.fitness(survival_bonus) > best.fitness(survival_bonus) {
                    o
                } else {
                    best
                }
            })
            .ok_or(SimulationError::EmptyPopulation)
    }

    /// Current display state of every entity.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            generation: self.generation,
            agents: self
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id,
                    pos: [a.pos[0], a.pos[1]],
                    heading: a.heading,
                    health: a.health_fraction(),
                    state: a.state,
                    resources_eaten: a.resources_eaten,
                    sensor_kinds: a.sensors.kinds.to_vec(),
                })
                .collect(),
            resources: self
                .resources
                .iter()
                .map(|r| ResourceView {
                    pos: [r.pos[0], r.pos[1]],
                    active: r.active,
                })
                .collect(),
            hazards: self
                .hazards
                .iter()
                .map(|h| HazardView {
                    pos: [h.pos[0], h.pos[1]],
                    kind: h.kind,
                })
                .collect(),
        }
    }
}
