//! Event logging system for displaying recent simulation events.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::events::{DeathCause, EventQueue, SimulationEvent};

/// A logged event for display in the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Timestamp when the event occurred
    pub time: f64,
    /// Human-readable description of the event
    pub description: String,
    /// Color hint for the event (for UI display)
    pub color: EventColor,
}

/// Color categories for events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventColor {
    /// Resource eaten (yellow)
    Food,
    /// Resource back in play (green)
    Respawn,
    /// Hazard contact (red)
    Hazard,
    /// Starvation and removal (gray)
    Death,
    /// Generation boundary (blue)
    Generation,
}

/// Event log that tracks recent simulation events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, time: f64, description: String, color: EventColor) {
        self.events.push_front(LoggedEvent {
            time,
            description,
            color,
        });

        // Keep only the most recent events
        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Clears all events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Logs every event of one tick with a readable description.
    pub fn record(&mut self, time: f64, events: &EventQueue) {
        for event in events.events() {
            let (description, color) = match event {
                SimulationEvent::ResourceEaten {
                    agent_id,
                    resource_id,
                } => (format!("Agent {agent_id} ate resource {resource_id}"), EventColor::Food),
                SimulationEvent::ResourceRespawned { resource_id } => {
                    (format!("Resource {resource_id} respawned"), EventColor::Respawn)
                }
                SimulationEvent::AgentDied {
                    agent_id,
                    cause: DeathCause::Hazard,
                } => (format!("Agent {agent_id} hit a hazard"), EventColor::Hazard),
                SimulationEvent::AgentDied {
                    agent_id,
                    cause: DeathCause::Starvation,
                } => (format!("Agent {agent_id} starved"), EventColor::Death),
                SimulationEvent::AgentRemoved { agent_id } => {
                    (format!("Agent {agent_id} removed"), EventColor::Death)
                }
            };
            self.log(time, description, color);
        }
    }
}
