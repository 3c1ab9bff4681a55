//! Evolution controller: runs generations, scores them and breeds the next one.
//!
//! A [`Trainer`] owns the world, the population and the evolver. Each
//! [`Trainer::tick`] first checks the termination rules, then advances the
//! world by one frame, and finally closes the generation if its frame budget
//! is spent or nobody is left alive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::agent::{AgentId, AgentOutcome};
use super::brain::BrainBuilder;
use super::controller::ControllerBuilder;
use super::error::SimulationError;
use super::events::EventQueue;
use super::evolution::{Evolver, GeneticEvolver};
use super::genome::{Genome, GenomeId};
use super::params::Params;
use super::telemetry::{BestRecord, GenerationEntry, GenerationRecord, RecordSink, new_run_id};
use super::world::World;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The generation index passed the configured maximum.
    MaxGenerations,
    /// The population kept scoring below the floor after warm-up.
    Stagnation,
}

/// Statistics of a generation that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Index of the finished generation.
    pub generation: u32,
    /// Frames it lasted.
    pub frames: u32,
    /// Mean resources eaten per agent.
    pub average_score: f32,
    /// Best fitness within the generation.
    pub best_fitness: f32,
    /// Agents still alive at the end.
    pub survivors: usize,
}

/// Result of one trainer tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A frame was simulated, the generation goes on.
    Running,
    /// A frame was simulated and closed the generation. The next one is populated.
    GenerationEnded(GenerationSummary),
    /// The run is over. Nothing was simulated.
    Terminated(TerminationReason),
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Identifier used in record files.
    pub run_id: String,
    /// Number of generations that were evaluated.
    pub generations: u32,
    /// Best single-agent fitness of the run.
    pub best_fitness: Option<f32>,
    /// Why the run stopped.
    pub reason: TerminationReason,
    /// Average score of every finished generation.
    pub history: Vec<f32>,
}

/// Drives a world through successive generations.
pub struct Trainer {
    params: Params,
    world: World,
    evolver: Box<dyn Evolver>,
    builder: Box<dyn ControllerBuilder>,
    population: Vec<Genome>,
    bindings: HashMap<GenomeId, AgentId>,
    best: Option<BestRecord>,
    sink: Box<dyn RecordSink>,
    run_id: String,
    history: Vec<f32>,
    events: EventQueue,
    terminated: Option<TerminationReason>,
}

impl Trainer {
    /// Validates the parameters, creates the first population and populates the world.
    pub fn new(
        params: Params,
        mut evolver: Box<dyn Evolver>,
        builder: Box<dyn ControllerBuilder>,
        sink: Box<dyn RecordSink>,
        run_id: String,
    ) -> Result<Self, SimulationError> {
        params.validate()?;

        let population = evolver.initial_population(params.agent_count, builder.parameter_count());
        if population.len() != params.agent_count {
            return Err(SimulationError::PopulationSize {
                expected: params.agent_count,
                actual: population.len(),
            });
        }

        let mut world = World::new(&params);
        let bindings = world.populate(&params, &population, builder.as_ref())?;

        log::info!(
            "run {run_id}: {} agents, {} weights per controller",
            params.agent_count,
            builder.parameter_count()
        );

        Ok(Self {
            params,
            world,
            evolver,
            builder,
            population,
            bindings,
            best: None,
            sink,
            run_id,
            history: Vec::new(),
            events: EventQueue::new(),
            terminated: None,
        })
    }

    /// Creates a trainer with the MLP controller, the genetic evolver and a fresh run id.
    pub fn with_defaults(params: Params, sink: Box<dyn RecordSink>) -> Result<Self, SimulationError> {
        let builder = BrainBuilder::new(params.layer_sizes());
        let evolver = GeneticEvolver::from_params(&params);
        Self::new(params, Box::new(evolver), Box::new(builder), sink, new_run_id())
    }

    /// Simulates one frame unless the run is over.
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        if let Some(reason) = self.terminated {
            return Ok(TickOutcome::Terminated(reason));
        }
        if let Some(reason) = self.should_terminate()? {
            log::info!(
                "run {} stopped at generation {} ({reason:?})",
                self.run_id,
                self.world.generation
            );
            self.terminated = Some(reason);
            return Ok(TickOutcome::Terminated(reason));
        }

        self.events = self.world.tick(&self.params)?;

        if self.world.frame > self.params.frames_per_generation || self.world.alive_count() == 0 {
            let summary = self.step_generation()?;
            return Ok(TickOutcome::GenerationEnded(summary));
        }
        Ok(TickOutcome::Running)
    }

    /// Ticks until the run terminates.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        loop {
            if let TickOutcome::Terminated(reason) = self.tick()? {
                return Ok(RunSummary {
                    run_id: self.run_id.clone(),
                    generations: self.history.len() as u32,
                    best_fitness: self.best.as_ref().map(|best| best.fitness),
                    reason,
                    history: self.history.clone(),
                });
            }
        }
    }

    /// Applies the stopping rules to the current state.
    pub fn should_terminate(&self) -> Result<Option<TerminationReason>, SimulationError> {
        let generation = self.world.generation;
        if generation > self.params.max_generations {
            return Ok(Some(TerminationReason::MaxGenerations));
        }
        if generation > self.params.warmup_generations
            && self.world.frame > self.params.frames_per_generation / 2
            && self.world.average_score()? < self.params.stagnation_floor
        {
            return Ok(Some(TerminationReason::Stagnation));
        }
        Ok(None)
    }

    /// Scores the finished generation, records it and replaces it with its offspring.
    fn step_generation(&mut self) -> Result<GenerationSummary, SimulationError> {
        let generation = self.world.generation;
        let survival_bonus = self.params.survival_bonus;
        let outcomes = self.world.outcomes();
        let average_score = self.world.average_score()?;

        let mut entries = Vec::with_capacity(outcomes.len());
        for genome in &mut self.population {
            let outcome = self
                .bindings
                .get(&genome.id)
                .and_then(|agent_id| find_outcome(&outcomes, *agent_id))
                .ok_or(SimulationError::Unevaluated(genome.id))?;
            let fitness = outcome.fitness(survival_bonus);
            genome.fitness = Some(fitness);
            entries.push(GenerationEntry {
                genome_id: genome.id,
                resources_eaten: outcome.resources_eaten,
                fitness,
                weights: genome.weights.to_vec(),
            });
        }

        let champion = self
            .population
            .iter()
            .filter_map(|g| g.fitness.map(|fitness| (g, fitness)))
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best });
        let mut best_fitness = 0.0;
        if let Some((genome, fitness)) = champion {
            best_fitness = fitness;
            if self.best.as_ref().is_none_or(|best| fitness > best.fitness) {
                self.best = Some(BestRecord {
                    generation,
                    fitness,
                    run_id: self.run_id.clone(),
                    weights: genome.weights.to_vec(),
                });
            }
        }

        let record = GenerationRecord {
            generation,
            average_score,
            entries,
        };
        if let Err(e) = self.sink.record_generation(&record) {
            log::warn!("failed to record generation {generation}: {e}");
        }
        if (generation + 1) % self.params.best_record_interval == 0 {
            if let Some(best) = &self.best {
                if let Err(e) = self.sink.record_best(best) {
                    log::warn!("failed to record best genome: {e}");
                }
            }
        }

        let summary = GenerationSummary {
            generation,
            frames: self.world.frame,
            average_score,
            best_fitness,
            survivors: self.world.alive_count(),
        };
        self.history.push(average_score);

        let offspring = self.evolver.evolve(&self.population)?;
        if offspring.len() != self.population.len() {
            return Err(SimulationError::PopulationSize {
                expected: self.population.len(),
                actual: offspring.len(),
            });
        }
        self.population = offspring;

        self.world.reset(generation + 1);
        self.bindings = self.world.populate(&self.params, &self.population, self.builder.as_ref())?;

        log::info!(
            "generation {generation}: {} frames, average score {average_score:.2}, best fitness {best_fitness:.1}, {} survivors",
            summary.frames,
            summary.survivors
        );

        Ok(summary)
    }

    /// The arena of the current generation.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Parameters of the run.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Genomes of the current generation.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Agent bound to a genome of the current generation.
    pub fn agent_for(&self, genome_id: GenomeId) -> Option<AgentId> {
        self.bindings.get(&genome_id).copied()
    }

    /// Best genome of the run so far.
    pub fn best(&self) -> Option<&BestRecord> {
        self.best.as_ref()
    }

    /// Average score of every finished generation.
    pub fn history(&self) -> &[f32] {
        &self.history
    }

    /// Identifier of the run.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Events of the last simulated frame.
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Mean resources eaten per agent of the current generation.
    pub fn average_score(&self) -> Result<f32, SimulationError> {
        self.world.average_score()
    }

    /// Fittest agent of the current generation.
    pub fn best_agent(&self) -> Result<AgentOutcome, SimulationError> {
        self.world.best_agent(self.params.survival_bonus)
    }

    /// Reason the run stopped, if it has.
    pub fn terminated(&self) -> Option<TerminationReason> {
        self.terminated
    }

    /// Mutable access to the world, for scripted scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

fn find_outcome(outcomes: &[AgentOutcome], agent_id: AgentId) -> Option<&AgentOutcome> {
    outcomes
        .binary_search_by_key(&agent_id, |o| o.id)
        .ok()
        .map(|idx| &outcomes[idx])
}
