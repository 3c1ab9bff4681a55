//! Population evolution.
//!
//! The engine only relies on the [`Evolver`] capability. [`GeneticEvolver`] is
//! the default: fitness-proportional (roulette wheel) selection, two-point
//! crossover, per-gene Gaussian mutation clamped to the weight range, and
//! optional elitism.

use ndarray::Array1;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::error::SimulationError;
use super::genome::Genome;
use super::params::Params;

/// Maps an evaluated generation to the next one.
pub trait Evolver: Send {
    /// Creates the first generation.
    fn initial_population(&mut self, size: usize, genome_len: usize) -> Vec<Genome>;

    /// Produces the next generation from evaluated genomes.
    ///
    /// The returned population has the same size as `scored`, its genomes are
    /// unevaluated and numbered `0..len`.
    fn evolve(&mut self, scored: &[Genome]) -> Result<Vec<Genome>, SimulationError>;
}

/// Generational genetic algorithm over real-valued genomes.
#[derive(Debug, Clone)]
pub struct GeneticEvolver {
    rng: StdRng,
    mutation_rate: f32,
    crossover_rate: f32,
    elitism: bool,
    weight_range: f32,
}

impl GeneticEvolver {
    /// Creates an evolver with explicit operator settings.
    pub fn new(mutation_rate: f32, crossover_rate: f32, elitism: bool, weight_range: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            mutation_rate,
            crossover_rate,
            elitism,
            weight_range,
        }
    }

    /// Creates an evolver from the evolution parameters.
    ///
    /// The seed is offset so the evolver does not replay the world's random stream.
    pub fn from_params(params: &Params) -> Self {
        Self::new(
            params.mutation_rate,
            params.crossover_rate,
            params.elitism,
            params.weight_range,
            params.seed.map(|seed| seed.wrapping_add(1)),
        )
    }

    fn select<'a>(&mut self, scored: &'a [Genome], wheel: Option<&WeightedIndex<f32>>) -> &'a Genome {
        let idx = match wheel {
            Some(wheel) => wheel.sample(&mut self.rng),
            None => self.rng.random_range(0..scored.len()),
        };
        &scored[idx]
    }

    /// Swaps the genes between two random cut points.
    fn two_point_crossover(&mut self, mom: &Array1<f32>, dad: &Array1<f32>) -> (Array1<f32>, Array1<f32>) {
        let len = mom.len();
        if len < 2 {
            return (mom.clone(), dad.clone());
        }

        let a = self.rng.random_range(1..len);
        let b = self.rng.random_range(1..len);
        let (cut_a, cut_b) = (a.min(b), a.max(b));

        let mut sister = mom.clone();
        let mut brother = dad.clone();
        for i in cut_a..cut_b {
            sister[i] = dad[i];
            brother[i] = mom[i];
        }
        (sister, brother)
    }

    fn mutate(&mut self, weights: &mut Array1<f32>) {
        for w in weights.iter_mut() {
            if self.rng.random::<f32>() < self.mutation_rate {
                let noise: f32 = self.rng.sample(StandardNormal);
                *w = (*w + noise).clamp(-self.weight_range, self.weight_range);
            }
        }
    }
}

impl Evolver for GeneticEvolver {
    fn initial_population(&mut self, size: usize, genome_len: usize) -> Vec<Genome> {
        (0..size)
            .map(|id| {
                let weights =
                    Array1::from_shape_fn(genome_len, |_| self.rng.random_range(-self.weight_range..=self.weight_range));
                Genome::new(id, weights)
            })
            .collect()
    }

    fn evolve(&mut self, scored: &[Genome]) -> Result<Vec<Genome>, SimulationError> {
        if scored.is_empty() {
            return Err(SimulationError::EmptyPopulation);
        }

        let mut fitness = Vec::with_capacity(scored.len());
        for genome in scored {
            let score = genome.fitness.ok_or(SimulationError::Unevaluated(genome.id))?;
            fitness.push(score.max(0.0));
        }

        // an all-zero wheel cannot be spun, fall back to uniform picks
        let wheel = WeightedIndex::new(&fitness).ok();

        let mut offspring: Vec<Array1<f32>> = Vec::with_capacity(scored.len());

        if self.elitism {
            let best = scored
                .iter()
                .zip(&fitness)
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(genome, _)| genome.weights.clone());
            offspring.extend(best);
        }

        while offspring.len() < scored.len() {
            let mom = self.select(scored, wheel.as_ref()).weights.clone();
            let dad = self.select(scored, wheel.as_ref()).weights.clone();

            let (mut sister, mut brother) = if self.rng.random::<f32>() < self.crossover_rate {
                self.two_point_crossover(&mom, &dad)
            } else {
                (mom, dad)
            };

            self.mutate(&mut sister);
            offspring.push(sister);

            if offspring.len() < scored.len() {
                self.mutate(&mut brother);
                offspring.push(brother);
            }
        }

        Ok(offspring
            .into_iter()
            .enumerate()
            .map(|(id, weights)| Genome::new(id, weights))
            .collect())
    }
}
