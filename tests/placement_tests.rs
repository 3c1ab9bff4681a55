#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_arena::simulation::error::SimulationError;
use evo_arena::simulation::geometric_utils::distance_squared;
use evo_arena::simulation::hazard::{HazardKind, boundary_ring};
use evo_arena::simulation::locatable::blocking_positions;
use evo_arena::simulation::params::Params;
use evo_arena::simulation::placement::Placer;
use evo_arena::simulation::resource::Resource;
use ndarray::{Array1, array};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_params() -> Params {
    Params {
        seed: Some(7),
        ..Params::default()
    }
}

#[test]
fn test_placement_respects_exclusion_threshold() {
    let params = create_test_params();
    let placer = Placer::from_params(&params);
    let mut rng = StdRng::seed_from_u64(1);

    let mut placed: Vec<Array1<f32>> = Vec::new();
    for _ in 0..20 {
        let pos = placer
            .place(&mut rng, params.resource_margin, placed.iter())
            .expect("placement should succeed");
        for other in &placed {
            assert!(distance_squared(&pos, other) >= params.exclusion_threshold);
        }
        placed.push(pos);
    }
}

#[test]
fn test_placement_stays_inside_margin() {
    let params = create_test_params();
    let placer = Placer::from_params(&params);
    let mut rng = StdRng::seed_from_u64(2);
    let limit = params.arena_width / 2.0 - params.agent_margin;

    for _ in 0..200 {
        let pos = placer
            .place(&mut rng, params.agent_margin, std::iter::empty())
            .expect("placement should succeed");
        assert!(pos[0] >= -limit && pos[0] < limit);
        assert!(pos[1] >= -limit && pos[1] < limit);
    }
}

#[test]
fn test_placement_ignores_inactive_resources() {
    let placer = Placer::new(10.0, 10.0, 1_000.0, 50, 0);
    let mut rng = StdRng::seed_from_u64(3);

    let mut resource = Resource::new(0, array![0.0, 0.0]);
    assert!(resource.consume());
    let resources = vec![resource];

    // an active resource at the center would block the whole arena
    let pos = placer.place(&mut rng, 0.0, blocking_positions(&resources));
    assert!(pos.is_ok());
}

#[test]
fn test_placement_relaxes_threshold() {
    // the farthest corner is at squared distance 50, so only the third
    // relaxation (threshold 25) can succeed
    let placer = Placer::new(10.0, 10.0, 200.0, 1_000, 3);
    let mut rng = StdRng::seed_from_u64(4);
    let center = [array![0.0, 0.0]];

    let pos = placer
        .place(&mut rng, 0.0, center.iter())
        .expect("relaxed placement should succeed");
    assert!(distance_squared(&pos, &center[0]) >= 25.0);
}

#[test]
fn test_placement_gives_up() {
    let placer = Placer::new(10.0, 10.0, 1_000_000.0, 100, 2);
    let mut rng = StdRng::seed_from_u64(5);
    let center = [array![0.0, 0.0]];

    match placer.place(&mut rng, 0.0, center.iter()) {
        Err(SimulationError::PlacementExhausted { attempts, threshold }) => {
            assert_eq!(attempts, 300);
            assert_eq!(threshold, 250_000.0);
        }
        other => panic!("expected PlacementExhausted, got {other:?}"),
    }
}

#[test]
fn test_placement_rejects_oversized_margin() {
    let placer = Placer::new(100.0, 100.0, 10.0, 100, 0);
    let mut rng = StdRng::seed_from_u64(6);

    let result = placer.place(&mut rng, 50.0, std::iter::empty());
    assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
}

#[test]
fn test_boundary_ring_layout() {
    let params = create_test_params();
    let ring = boundary_ring(params.arena_width, params.arena_height, params.boundary_spacing);

    assert_eq!(ring.len(), 80);
    assert!(ring.iter().all(|h| h.kind == HazardKind::Boundary));

    let half = params.arena_width / 2.0;
    for hazard in &ring {
        let on_edge = hazard.pos[0].abs() == half || hazard.pos[1].abs() == half;
        assert!(on_edge, "hazard at {:?} is not on the boundary", hazard.pos);
    }

    // no duplicates, corners included
    for (i, a) in ring.iter().enumerate() {
        for b in &ring[i + 1..] {
            assert!(distance_squared(&a.pos, &b.pos) > 0.0);
        }
    }
}
