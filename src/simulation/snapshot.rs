//! Read-only per-frame view of the world for renderers.

use serde::{Deserialize, Serialize};

use super::agent::{AgentId, AgentState};
use super::hazard::HazardKind;

/// Display state of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    /// Agent identifier.
    pub id: AgentId,
    /// Position `[x, y]`.
    pub pos: [f32; 2],
    /// Heading in radians.
    pub heading: f32,
    /// Health as a fraction of the maximum.
    pub health: f32,
    /// Lifecycle state.
    pub state: AgentState,
    /// Resources eaten so far.
    pub resources_eaten: u32,
    /// Sensor slot kinds from the last frame, `-1`, `0` or `1`.
    pub sensor_kinds: Vec<f32>,
}

/// Display state of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
    /// Position `[x, y]`.
    pub pos: [f32; 2],
    /// Whether the resource can be eaten.
    pub active: bool,
}

/// Display state of one hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    /// Position `[x, y]`.
    pub pos: [f32; 2],
    /// Boundary or field hazard.
    pub kind: HazardKind,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Frame within the current generation.
    pub frame: u32,
    /// Current generation index.
    pub generation: u32,
    /// Agents still in the world, dying ones included.
    pub agents: Vec<AgentView>,
    /// All resources of the generation.
    pub resources: Vec<ResourceView>,
    /// All hazards, boundary first.
    pub hazards: Vec<HazardView>,
}
