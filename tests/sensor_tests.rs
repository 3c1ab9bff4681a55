#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_arena::simulation::hazard::{Hazard, HazardKind};
use evo_arena::simulation::params::Params;
use evo_arena::simulation::resource::Resource;
use evo_arena::simulation::sensor::{SensedKind, SensorArray};
use evo_arena::simulation::spatial::SpatialIndex;
use ndarray::{Array1, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CENTER_SLOT: usize = 3;

fn create_test_params() -> Params {
    Params::default()
}

fn origin() -> Array1<f32> {
    array![0.0, 0.0]
}

#[test]
fn test_slot_axes_cover_forward_field() {
    let sensor = SensorArray::from_params(&create_test_params());

    assert_eq!(sensor.slots(), 7);
    assert_eq!(sensor.input_size(), 14);
    assert!(sensor.slot_axis(0.0, CENTER_SLOT).abs() < 1e-6);
    // slot 0 looks left (counter-clockwise), the last slot right
    assert!(sensor.slot_axis(0.0, 0) > 0.0);
    assert!(sensor.slot_axis(0.0, 6) < 0.0);
    assert!((sensor.slot_axis(0.0, 6) + sensor.slot_axis(0.0, 0)).abs() < 1e-6);
}

#[test]
fn test_left_side_fills_first_slot() {
    let params = create_test_params();
    let sensor = SensorArray::from_params(&params);
    let angle = 80f32.to_radians();
    let resources = vec![Resource::new(0, array![20.0 * angle.cos(), 20.0 * angle.sin()])];

    let reading = sensor.sense(&origin(), 0.0, &resources, &[], None);
    assert_eq!(reading.kinds[0], SensedKind::Resource.signal());
    assert_eq!(reading.kinds[6], SensedKind::Nothing.signal());
}

#[test]
fn test_nothing_in_view() {
    let sensor = SensorArray::from_params(&create_test_params());
    let reading = sensor.sense(&origin(), 0.0, &[], &[], None);

    assert!(reading.distances.iter().all(|&d| d == 1.0));
    assert!(reading.kinds.iter().all(|&k| k == SensedKind::Nothing.signal()));
    assert_eq!(reading.input_vector().len(), 14);
}

#[test]
fn test_resource_straight_ahead() {
    let params = create_test_params();
    let sensor = SensorArray::from_params(&params);
    let resources = vec![Resource::new(0, array![20.0, 0.0])];

    let reading = sensor.sense(&origin(), 0.0, &resources, &[], None);

    assert_eq!(reading.kinds[CENTER_SLOT], 1.0);
    assert!((reading.distances[CENTER_SLOT] - 20.0 / params.view_distance).abs() < 1e-5);
    for k in (0..sensor.slots()).filter(|&k| k != CENTER_SLOT) {
        assert_eq!(reading.kinds[k], 0.0);
        assert_eq!(reading.distances[k], 1.0);
    }
}

#[test]
fn test_closer_hazard_wins() {
    let sensor = SensorArray::from_params(&create_test_params());
    let resources = vec![Resource::new(0, array![20.0, 0.0])];
    let hazards = vec![Hazard::new(10.0, 0.0, HazardKind::Field)];

    let reading = sensor.sense(&origin(), 0.0, &resources, &hazards, None);

    assert_eq!(reading.kinds[CENTER_SLOT], -1.0);
    assert!((reading.distances[CENTER_SLOT] - 0.2).abs() < 1e-5);
}

#[test]
fn test_tie_goes_to_resource() {
    let sensor = SensorArray::from_params(&create_test_params());
    let resources = vec![Resource::new(0, array![15.0, 0.0])];
    let hazards = vec![Hazard::new(15.0, 0.0, HazardKind::Field)];

    let reading = sensor.sense(&origin(), 0.0, &resources, &hazards, None);

    assert_eq!(reading.kinds[CENTER_SLOT], 1.0);
}

#[test]
fn test_invisible_entities() {
    let sensor = SensorArray::from_params(&create_test_params());

    let mut eaten = Resource::new(0, array![20.0, 0.0]);
    eaten.consume();
    let resources = vec![
        eaten,
        // out of range
        Resource::new(1, array![60.0, 0.0]),
        // behind
        Resource::new(2, array![-20.0, 0.0]),
    ];

    let reading = sensor.sense(&origin(), 0.0, &resources, &[], None);
    assert!(reading.kinds.iter().all(|&k| k == 0.0));
}

#[test]
fn test_heading_rotates_view() {
    let sensor = SensorArray::from_params(&create_test_params());
    let resources = vec![Resource::new(0, array![0.0, 25.0])];

    let facing_away = sensor.sense(&origin(), 0.0, &resources, &[], None);
    assert_eq!(facing_away.kinds[CENTER_SLOT], 0.0);

    let facing_up = sensor.sense(&origin(), std::f32::consts::FRAC_PI_2, &resources, &[], None);
    assert_eq!(facing_up.kinds[CENTER_SLOT], 1.0);
}

#[test]
fn test_index_matches_linear_scan() {
    let params = create_test_params();
    let sensor = SensorArray::from_params(&params);
    let mut rng = StdRng::seed_from_u64(11);
    let half = params.arena_width / 2.0;

    let resources: Vec<Resource> = (0..40)
        .map(|id| Resource::new(id, array![rng.random_range(-half..half), rng.random_range(-half..half)]))
        .collect();
    let hazards: Vec<Hazard> = (0..40)
        .map(|_| Hazard::new(rng.random_range(-half..half), rng.random_range(-half..half), HazardKind::Field))
        .collect();
    let index = SpatialIndex::build(&resources, &hazards).expect("finite positions");

    for _ in 0..50 {
        let pos = array![rng.random_range(-half..half), rng.random_range(-half..half)];
        let heading = rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);

        let scanned = sensor.sense(&pos, heading, &resources, &hazards, None);
        let indexed = sensor.sense(&pos, heading, &resources, &hazards, Some(&index));
        assert_eq!(scanned, indexed);

        assert!(indexed.distances.iter().all(|&d| (0.0..=1.0).contains(&d)));
        assert!(indexed.kinds.iter().all(|&k| k == -1.0 || k == 0.0 || k == 1.0));
    }
}
