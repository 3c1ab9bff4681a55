//! Resources ("carrots") that agents eat for health and score.
//!
//! A resource is never destroyed during a generation. Eating it only flips it
//! inactive until its respawn timer moves it somewhere else.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;

/// Stable index of a resource within one generation.
pub type ResourceId = usize;

/// A consumable resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Index in the world's resource list.
    pub id: ResourceId,
    /// Position on the arena plane.
    pub pos: Array1<f32>,
    /// Whether the resource can currently be seen and eaten.
    pub active: bool,
}

impl Resource {
    /// Creates an active resource at `pos`.
    pub fn new(id: ResourceId, pos: Array1<f32>) -> Self {
        Self {
            id,
            pos,
            active: true,
        }
    }

    /// Marks the resource as eaten.
    ///
    /// Returns `false` if it was already inactive, so a single contact can
    /// never be collected twice.
    pub fn consume(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }

    /// Moves the resource and makes it available again.
    pub fn respawn(&mut self, pos: Array1<f32>) {
        self.pos = pos;
        self.active = true;
    }
}

impl Locatable for Resource {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn blocks_placement(&self) -> bool {
        self.active
    }
}
