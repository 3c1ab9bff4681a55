#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_arena::simulation::brain::{Brain, BrainBuilder};
use evo_arena::simulation::controller::{Controller, ControllerBuilder, Steering, THROTTLE, TURN};
use evo_arena::simulation::error::SimulationError;
use evo_arena::simulation::params::Params;
use ndarray::{Array1, array};

fn create_test_params() -> Params {
    Params::default()
}

fn ramp(len: usize) -> Array1<f32> {
    Array1::from_shape_fn(len, |i| ((i as f32) * 0.37).sin())
}

#[test]
fn test_default_layout_parameter_count() {
    let params = create_test_params();
    assert_eq!(params.layer_sizes(), vec![14, 12, 6, 2]);

    let builder = BrainBuilder::new(params.layer_sizes());
    assert_eq!(builder.parameter_count(), 14 * 12 + 12 * 6 + 6 * 2);
    assert_eq!(builder.parameter_count(), 252);
}

#[test]
fn test_wrong_genome_length() {
    let builder = BrainBuilder::new(create_test_params().layer_sizes());
    let result = builder.build(&Array1::zeros(251));
    assert!(matches!(
        result,
        Err(SimulationError::GenomeLength {
            expected: 252,
            actual: 251
        })
    ));
}

#[test]
fn test_controller_is_deterministic() {
    let builder = BrainBuilder::new(create_test_params().layer_sizes());
    let weights = ramp(252);
    let first = builder.build(&weights).expect("valid genome");
    let second = builder.build(&weights).expect("valid genome");
    let input = ramp(14);

    let output = first.evaluate(&input);
    assert_eq!(output.len(), 2);
    assert_eq!(output, first.evaluate(&input));
    assert_eq!(output, second.evaluate(&input));
    assert!(output.iter().all(|v| (-1.0..=1.0).contains(v)));
    assert_eq!(first.parameter_count(), 252);
}

#[test]
fn test_weight_layout() {
    // 2 inputs -> 1 output, weights [a, b]: out = tanh(a * tanh(x0) + b * tanh(x1))
    let brain = Brain::from_flat(&[2, 1], &array![0.5, -2.0]).expect("valid genome");
    let input = array![1.0, 0.25];

    let expected = (0.5 * 1f32.tanh() - 2.0 * 0.25f32.tanh()).tanh();
    assert!((brain.think(&input)[0] - expected).abs() < 1e-6);
    assert_eq!(brain.to_flat_vector(), array![0.5, -2.0]);
}

#[test]
fn test_zero_weights_stand_still() {
    let brain = Brain::from_flat(&[14, 12, 6, 2], &Array1::zeros(252)).expect("valid genome");
    let output = brain.think(&ramp(14));
    assert_eq!(output, array![0.0, 0.0]);

    // zero throttle still moves forward at base speed
    let params = create_test_params();
    let steering = Steering::from_output(&output, params.base_turn_speed, params.base_speed);
    assert_eq!(steering.turn, 0.0);
    assert_eq!(steering.advance, params.base_speed);
}

#[test]
fn test_steering_never_reverses() {
    let params = create_test_params();

    let mut output = Array1::zeros(2);
    output[TURN] = 1.0;
    output[THROTTLE] = -1.0;
    let steering = Steering::from_output(&output, params.base_turn_speed, params.base_speed);
    assert_eq!(steering.advance, 0.0);
    assert!((steering.turn - 10f32.to_radians()).abs() < 1e-6);

    output[THROTTLE] = 1.0;
    let steering = Steering::from_output(&output, params.base_turn_speed, params.base_speed);
    assert_eq!(steering.advance, 2.0 * params.base_speed);

    // out-of-range signals are clamped
    let steering = Steering::from_output(&array![-4.0, 7.0], params.base_turn_speed, params.base_speed);
    assert!((steering.turn + 10f32.to_radians()).abs() < 1e-6);
    assert_eq!(steering.advance, 2.0 * params.base_speed);
}
