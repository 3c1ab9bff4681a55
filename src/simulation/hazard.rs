//! Hazards ("spikes"): lethal on contact.
//!
//! Boundary hazards line the arena edge for the whole process lifetime; field
//! hazards are scattered again every generation.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;

/// Where a hazard belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Part of the fixed perimeter.
    Boundary,
    /// Randomly placed inside the arena each generation.
    Field,
}

/// A lethal static obstacle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    /// Position on the arena plane.
    pub pos: Array1<f32>,
    /// Boundary or field hazard.
    pub kind: HazardKind,
}

impl Hazard {
    /// Creates a hazard at `(x, y)`.
    pub fn new(x: f32, y: f32, kind: HazardKind) -> Self {
        Self {
            pos: Array1::from_vec(vec![x, y]),
            kind,
        }
    }
}

impl Locatable for Hazard {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }
}

/// Builds the perimeter: one hazard every `spacing` units along each edge of a
/// `width × height` arena centered at the origin. Corners appear once.
pub fn boundary_ring(width: f32, height: f32, spacing: f32) -> Vec<Hazard> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let mut ring = Vec::new();

    let columns = (width / spacing).floor() as usize;
    for i in 0..=columns {
        let x = -half_w + i as f32 * spacing;
        ring.push(Hazard::new(x, -half_h, HazardKind::Boundary));
        ring.push(Hazard::new(x, half_h, HazardKind::Boundary));
    }

    // top and bottom rows already hold the corners
    let rows = (height / spacing).floor() as usize;
    for j in 1..rows {
        let y = -half_h + j as f32 * spacing;
        if y >= half_h {
            break;
        }
        ring.push(Hazard::new(-half_w, y, HazardKind::Boundary));
        ring.push(Hazard::new(half_w, y, HazardKind::Boundary));
    }

    ring
}
