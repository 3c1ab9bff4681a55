#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;

use evo_arena::simulation::error::SimulationError;
use evo_arena::simulation::params::Params;
use evo_arena::simulation::telemetry::new_run_id;

#[test]
fn test_defaults_are_valid() {
    let params = Params::default();
    assert!(params.validate().is_ok());

    assert_eq!(params.arena_width, 164.0);
    assert_eq!(params.agent_count, 8);
    assert_eq!(params.resource_count, 16);
    assert_eq!(params.field_hazard_count, 8);
    assert_eq!(params.frames_per_generation, 1024);
    assert_eq!(params.max_generations, 32);
    assert_eq!(params.seed, None);
}

#[test]
fn test_validation_failures() {
    let cases = [
        Params {
            sensor_count: 0,
            ..Params::default()
        },
        Params {
            agent_count: 0,
            ..Params::default()
        },
        Params {
            view_distance: 0.0,
            ..Params::default()
        },
        Params {
            agent_margin: 90.0,
            ..Params::default()
        },
        Params {
            hidden_layers: vec![12, 0],
            ..Params::default()
        },
        Params {
            mutation_rate: 1.5,
            ..Params::default()
        },
        Params {
            best_record_interval: 0,
            ..Params::default()
        },
        Params {
            respawn_delay: -1.0,
            ..Params::default()
        },
    ];

    for params in cases {
        assert!(
            matches!(params.validate(), Err(SimulationError::InvalidConfig(_))),
            "{params:?} should be rejected"
        );
    }
}

#[test]
fn test_delays_in_frames() {
    let params = Params::default();
    assert_eq!(params.delay_frames(params.respawn_delay), 150);
    assert_eq!(params.delay_frames(params.removal_delay), 180);
    assert_eq!(params.delay_frames(0.0), 0);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let params: Params = toml::from_str(
        r#"
        agent_count = 12
        hidden_layers = [8]
        seed = 77
        "#,
    )
    .expect("valid toml");

    assert_eq!(params.agent_count, 12);
    assert_eq!(params.layer_sizes(), vec![14, 8, 2]);
    assert_eq!(params.seed, Some(77));
    assert_eq!(params.resource_count, Params::default().resource_count);
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("evo-arena-params-{}.toml", new_run_id()));

    fs::write(&path, "frames_per_generation = 256\n").expect("write config");
    let params = Params::from_file(&path).expect("valid config");
    assert_eq!(params.frames_per_generation, 256);

    fs::write(&path, "sensor_count = 0\n").expect("write config");
    assert!(matches!(Params::from_file(&path), Err(SimulationError::InvalidConfig(_))));

    fs::write(&path, "sensor_count = \"many\"\n").expect("write config");
    assert!(matches!(Params::from_file(&path), Err(SimulationError::ConfigParse(_))));

    fs::remove_file(&path).ok();
    assert!(matches!(Params::from_file(&path), Err(SimulationError::Io(_))));
}
