//! Events emitted by a world tick.
//!
//! The world mutates its state directly during the agent pass and reports
//! what happened through these events, in the order it happened. The viewer
//! feeds them to its event log, tests use them to observe single frames.

use serde::{Deserialize, Serialize};

use super::agent::AgentId;
use super::resource::ResourceId;

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Health ran out.
    Starvation,
    /// Touched a hazard.
    Hazard,
}

/// Something that changed the world during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// An agent ate a resource.
    ResourceEaten {
        /// Agent that ate.
        agent_id: AgentId,
        /// Resource that was eaten.
        resource_id: ResourceId,
    },
    /// An eaten resource reappeared.
    ResourceRespawned {
        /// Resource that came back.
        resource_id: ResourceId,
    },
    /// An agent entered the dying state.
    AgentDied {
        /// Agent that died.
        agent_id: AgentId,
        /// What killed it.
        cause: DeathCause,
    },
    /// A dying agent was evicted from the world.
    AgentRemoved {
        /// Agent that was removed.
        agent_id: AgentId,
    },
}

/// Ordered list of events from one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Events in the order they happened.
    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// Whether nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
