//! Angular sensor model.
//!
//! An agent looks through `N` narrow frustums that evenly split its forward
//! field of view. Seen from above, each frustum is a triangle with its apex at
//! the agent and its far edge `view_distance` ahead along the slot axis. For
//! every slot the nearest visible resource and the nearest hazard compete;
//! the hazard is reported only if it is strictly closer.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::geometric_utils::{distance, frustum_triangle, polygon_contains};
use super::hazard::Hazard;
use super::params::Params;
use super::resource::Resource;
use super::spatial::SpatialIndex;

/// What a sensor slot reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensedKind {
    /// Nearest thing in view is a hazard.
    Hazard,
    /// Nothing in view.
    Nothing,
    /// Nearest thing in view is a resource.
    Resource,
}

impl SensedKind {
    /// Controller encoding: `-1` hazard, `0` nothing, `1` resource.
    pub fn signal(self) -> f32 {
        match self {
            SensedKind::Hazard => -1.0,
            SensedKind::Nothing => 0.0,
            SensedKind::Resource => 1.0,
        }
    }
}

/// One frame of sensor output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Normalized distance per slot, `1.0` meaning nothing within range.
    pub distances: Array1<f32>,
    /// Encoded [`SensedKind`] per slot.
    pub kinds: Array1<f32>,
}

impl SensorReading {
    /// A reading where every slot sees nothing.
    pub fn empty(slots: usize) -> Self {
        Self {
            distances: Array1::ones(slots),
            kinds: Array1::zeros(slots),
        }
    }

    /// Controller input: `[distances..., kinds...]`.
    pub fn input_vector(&self) -> Array1<f32> {
        self.distances
            .iter()
            .chain(self.kinds.iter())
            .copied()
            .collect()
    }
}

/// Slot layout shared by every agent of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorArray {
    slots: usize,
    fov: f32,
    view_distance: f32,
}

impl SensorArray {
    /// Creates a sensor layout with `slots` frustums spanning `fov` radians.
    pub fn new(slots: usize, fov: f32, view_distance: f32) -> Self {
        Self {
            slots,
            fov,
            view_distance,
        }
    }

    /// Creates the sensor layout described by the parameters.
    pub fn from_params(params: &Params) -> Self {
        Self::new(params.sensor_count, params.sensor_fov, params.view_distance)
    }

    /// Number of sensor slots.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Length of the controller input vector.
    pub fn input_size(&self) -> usize {
        self.slots * 2
    }

    /// Half of the angular width of a single slot.
    fn half_angle(&self) -> f32 {
        self.fov / (2.0 * self.slots as f32)
    }

    /// Axis of slot `k` for an agent facing `heading`.
    ///
    /// Slots sweep clockwise: slot 0 is the leftmost, the last slot the rightmost.
    pub fn slot_axis(&self, heading: f32, k: usize) -> f32 {
        heading + self.fov / 2.0 - self.fov * (k as f32 + 0.5) / self.slots as f32
    }

    /// Farthest point any frustum can reach: its far corners.
    pub fn reach(&self) -> f32 {
        self.view_distance / self.half_angle().cos()
    }

    /// Scans resources and hazards for an agent at `pos` facing `heading`.
    ///
    /// Inactive resources are invisible. With `index` the candidates come from
    /// the KD-trees, otherwise every entity is tested.
    pub fn sense(
        &self,
        pos: &Array1<f32>,
        heading: f32,
        resources: &[Resource],
        hazards: &[Hazard],
        index: Option<&SpatialIndex>,
    ) -> SensorReading {
        let (resource_candidates, hazard_candidates): (Vec<usize>, Vec<usize>) = match index {
            Some(index) => (
                index.query_resources(pos, self.reach()),
                index.query_hazards(pos, self.reach()),
            ),
            None => ((0..resources.len()).collect(), (0..hazards.len()).collect()),
        };

        let mut reading = SensorReading::empty(self.slots);

        for k in 0..self.slots {
            let frustum = frustum_triangle(pos, self.slot_axis(heading, k), self.half_angle(), self.view_distance);

            let nearest_resource = resource_candidates
                .iter()
                .map(|&idx| &resources[idx])
                .filter(|resource| resource.active && polygon_contains(&frustum, &resource.pos))
                .map(|resource| distance(pos, &resource.pos))
                .min_by(f32::total_cmp);

            let nearest_hazard = hazard_candidates
                .iter()
                .map(|&idx| &hazards[idx])
                .filter(|hazard| polygon_contains(&frustum, &hazard.pos))
                .map(|hazard| distance(pos, &hazard.pos))
                .min_by(f32::total_cmp);

            let (dist, kind) = match (nearest_resource, nearest_hazard) {
                (Some(r), Some(h)) if h < r => (h, SensedKind::Hazard),
                (Some(r), _) => (r, SensedKind::Resource),
                (None, Some(h)) => (h, SensedKind::Hazard),
                (None, None) => (self.view_distance, SensedKind::Nothing),
            };

            reading.distances[k] = dist.min(self.view_distance) / self.view_distance;
            reading.kinds[k] = kind.signal();
        }

        reading
    }
}
