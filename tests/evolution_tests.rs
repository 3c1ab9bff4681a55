#![allow(missing_docs)]

use evo_arena::simulation::error::SimulationError;
use evo_arena::simulation::evolution::{Evolver, GeneticEvolver};
use evo_arena::simulation::genome::Genome;
use evo_arena::simulation::params::Params;

fn create_test_params() -> Params {
    Params {
        seed: Some(5),
        ..Params::default()
    }
}

fn scored_population(evolver: &mut GeneticEvolver, size: usize, len: usize) -> Vec<Genome> {
    let mut population = evolver.initial_population(size, len);
    for (i, genome) in population.iter_mut().enumerate() {
        genome.fitness = Some(i as f32);
    }
    population
}

#[test]
fn test_initial_population() {
    let params = create_test_params();
    let mut evolver = GeneticEvolver::from_params(&params);
    let population = evolver.initial_population(8, 252);

    assert_eq!(population.len(), 8);
    for (id, genome) in population.iter().enumerate() {
        assert_eq!(genome.id, id);
        assert_eq!(genome.len(), 252);
        assert!(genome.fitness.is_none());
        assert!(genome.weights.iter().all(|w| w.abs() <= params.weight_range));
    }
}

#[test]
fn test_evolve_keeps_size_and_bounds() {
    let params = Params {
        mutation_rate: 1.0,
        ..create_test_params()
    };
    let mut evolver = GeneticEvolver::from_params(&params);
    let mut population = scored_population(&mut evolver, 9, 40);

    for _ in 0..20 {
        let next = evolver.evolve(&population).expect("scored population");
        assert_eq!(next.len(), 9);
        for (id, genome) in next.iter().enumerate() {
            assert_eq!(genome.id, id);
            assert_eq!(genome.len(), 40);
            assert!(genome.fitness.is_none());
            assert!(genome.weights.iter().all(|w| w.abs() <= params.weight_range));
        }
        population = next;
        for (i, genome) in population.iter_mut().enumerate() {
            genome.fitness = Some((i % 3) as f32);
        }
    }
}

#[test]
fn test_zero_fitness_population_still_evolves() {
    let mut evolver = GeneticEvolver::from_params(&create_test_params());
    let mut population = evolver.initial_population(6, 10);
    for genome in &mut population {
        genome.fitness = Some(0.0);
    }

    let next = evolver.evolve(&population).expect("uniform selection");
    assert_eq!(next.len(), 6);
}

#[test]
fn test_elitism_keeps_best_genome() {
    let params = Params {
        elitism: true,
        ..create_test_params()
    };
    let mut evolver = GeneticEvolver::from_params(&params);
    let population = scored_population(&mut evolver, 5, 12);

    let next = evolver.evolve(&population).expect("scored population");
    assert_eq!(next[0].weights, population[4].weights);
}

#[test]
fn test_selection_follows_fitness() {
    // only genome 2 can be drawn, and without crossover or mutation its
    // weights are copied verbatim
    let mut evolver = GeneticEvolver::new(0.0, 0.0, false, 3.0, Some(1));
    let mut population = evolver.initial_population(4, 16);
    for genome in &mut population {
        genome.fitness = Some(0.0);
    }
    population[2].fitness = Some(5.0);

    let next = evolver.evolve(&population).expect("scored population");
    assert!(next.iter().all(|g| g.weights == population[2].weights));
}

#[test]
fn test_evolve_errors() {
    let mut evolver = GeneticEvolver::from_params(&create_test_params());
    assert!(matches!(evolver.evolve(&[]), Err(SimulationError::EmptyPopulation)));

    let population = evolver.initial_population(3, 4);
    assert!(matches!(evolver.evolve(&population), Err(SimulationError::Unevaluated(0))));
}

#[test]
fn test_same_seed_same_offspring() {
    let params = create_test_params();
    let mut a = GeneticEvolver::from_params(&params);
    let mut b = GeneticEvolver::from_params(&params);

    let pop_a = scored_population(&mut a, 8, 30);
    let pop_b = scored_population(&mut b, 8, 30);
    assert_eq!(pop_a, pop_b);
    assert_eq!(a.evolve(&pop_a).expect("scored"), b.evolve(&pop_b).expect("scored"));
}
