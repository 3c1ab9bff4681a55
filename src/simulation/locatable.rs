//! Trait for entities that occupy a position in the arena.
//!
//! Placement constraints and the renderer only need positions, so resources,
//! hazards and agents all expose them through this trait.

use ndarray::Array1;

/// Trait for entities with a position on the arena plane.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Whether this entity currently constrains placement of others.
    ///
    /// Inactive resources and dying agents do not block new positions.
    fn blocks_placement(&self) -> bool {
        true
    }
}

/// Collects the positions of all blocking entities in `items`.
pub fn blocking_positions<T: Locatable>(items: &[T]) -> impl Iterator<Item = &Array1<f32>> + Clone {
    items
        .iter()
        .filter(|item| item.blocks_placement())
        .map(|item| item.pos())
}
