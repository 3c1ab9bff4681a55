#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_arena::simulation::agent::{Agent, AgentState};
use evo_arena::simulation::brain::BrainBuilder;
use evo_arena::simulation::controller::{ControllerBuilder, Steering};
use evo_arena::simulation::locatable::{Locatable, blocking_positions};
use evo_arena::simulation::params::Params;
use ndarray::{Array1, array};

fn create_test_params() -> Params {
    Params::default()
}

fn create_agent(params: &Params) -> Agent {
    let builder = BrainBuilder::new(params.layer_sizes());
    let controller = builder
        .build(&Array1::zeros(builder.parameter_count()))
        .expect("valid genome");
    Agent::new(3, 5, array![1.0, 2.0], 0.0, controller, params.sensor_count, params.max_health)
}

#[test]
fn test_new_agent() {
    let params = create_test_params();
    let agent = create_agent(&params);

    assert!(agent.is_alive());
    assert_eq!(agent.health, 100.0);
    assert_eq!(agent.health_fraction(), 1.0);
    assert_eq!(agent.resources_eaten, 0);
    assert_eq!(agent.sensors.distances.len(), 7);
    assert!(agent.removal.is_none());
}

#[test]
fn test_eating_clamps_health() {
    let params = create_test_params();
    let mut agent = create_agent(&params);

    agent.set_health(80.0);
    agent.eat(params.eat_bonus);
    assert_eq!(agent.health, 100.0);
    assert_eq!(agent.resources_eaten, 1);

    agent.set_health(30.0);
    agent.eat(params.eat_bonus);
    assert_eq!(agent.health, 70.0);
    assert_eq!(agent.resources_eaten, 2);
}

#[test]
fn test_starving_bottoms_out() {
    let params = create_test_params();
    let mut agent = create_agent(&params);

    agent.set_health(0.1);
    assert!(agent.starve(params.health_decay));
    assert_eq!(agent.health, 0.0);

    agent.set_health(50.0);
    assert!(!agent.starve(params.health_decay));
}

#[test]
fn test_turn_then_advance() {
    let params = create_test_params();
    let mut agent = create_agent(&params);

    agent.steer(Steering {
        turn: std::f32::consts::FRAC_PI_2,
        advance: 2.0,
    });
    assert!((agent.heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert!((agent.pos[0] - 1.0).abs() < 1e-5);
    assert!((agent.pos[1] - 4.0).abs() < 1e-5);

    // headings stay wrapped
    agent.steer(Steering {
        turn: 2.0 * std::f32::consts::PI,
        advance: 0.0,
    });
    assert!(agent.heading >= -std::f32::consts::PI && agent.heading < std::f32::consts::PI);
}

#[test]
fn test_think_reads_sensors() {
    let params = create_test_params();
    let mut agent = create_agent(&params);
    let sensor = evo_arena::simulation::sensor::SensorArray::from_params(&params);

    let steering = agent.think(&sensor, &[], &[], None, params.base_turn_speed, params.base_speed);
    assert_eq!(steering.turn, 0.0);
    assert_eq!(steering.advance, params.base_speed);
    assert!(agent.sensors.kinds.iter().all(|&k| k == 0.0));
}

#[test]
fn test_lifecycle_and_outcome() {
    let params = create_test_params();
    let mut agent = create_agent(&params);
    agent.eat(params.eat_bonus);

    let alive = agent.outcome();
    assert_eq!(alive.id, 3);
    assert_eq!(alive.genome_id, 5);
    assert_eq!(alive.state, AgentState::Alive);
    assert!(agent.blocks_placement());

    assert!(agent.die());
    assert_eq!(agent.health, 0.0);
    assert!(agent.is_dying());
    assert!(!agent.blocks_placement());
    assert!(!agent.die());

    let agents = vec![agent];
    assert_eq!(blocking_positions(&agents).count(), 0);

    let retired = agents.into_iter().next().map(Agent::retire).expect("one agent");
    assert_eq!(retired.state, AgentState::Removed);
    assert_eq!(retired.resources_eaten, 1);
    assert_eq!(retired.fitness(params.survival_bonus), 1.0);
}
