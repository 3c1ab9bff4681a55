//! Spatial indexing for sensor candidate queries.
//!
//! Resource positions only change when a respawn timer fires, and hazards never
//! move within a generation, so the world rebuilds this index once per tick,
//! after timers and before the agent pass.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::hazard::Hazard;
use super::locatable::Locatable;
use super::resource::Resource;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Result of a spatial radius query: indices into the indexed slice.
pub type SpatialQueryResult = Vec<usize>;

/// KD-trees over resource and hazard positions.
pub struct SpatialIndex {
    resources: Tree2D,
    hazards: Tree2D,
}

impl SpatialIndex {
    /// Builds an index over the given resources and hazards.
    ///
    /// Indices in query results refer to positions in the slices passed here.
    pub fn build(resources: &[Resource], hazards: &[Hazard]) -> Result<Self, KdTreeError> {
        let resources = build_tree(resources, |r| r.pos().to_vec())?;
        let hazards = build_tree(hazards, |h| h.pos().to_vec())?;
        Ok(Self { resources, hazards })
    }

    /// Resources within `radius` of `pos`, active or not.
    pub fn query_resources(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        query(&self.resources, pos, radius)
    }

    /// Hazards within `radius` of `pos`.
    pub fn query_hazards(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        query(&self.hazards, pos, radius)
    }
}

fn query(tree: &Tree2D, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
    tree.within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
        .unwrap_or_default()
        .into_iter()
        .map(|(_, &idx)| idx)
        .collect()
}

/// Helper function to build a KD-tree from a collection of items.
fn build_tree<T>(items: &[T], get_pos: impl Fn(&T) -> Vec<f32>) -> Result<Tree2D, KdTreeError> {
    let mut tree = KdTree::with_capacity(2, items.len().max(1));
    for (i, item) in items.iter().enumerate() {
        tree.add(get_pos(item), i)?;
    }
    Ok(tree)
}
