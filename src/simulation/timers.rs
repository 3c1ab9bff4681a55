//! Single-shot timers for delayed world actions.
//!
//! Every timer is tagged with the generation that scheduled it, so a
//! generation reset can drop all of its pending work in one call and nothing
//! fires against the entities of the next generation.

use serde::{Deserialize, Serialize};

use super::agent::AgentId;
use super::resource::ResourceId;

/// Cancelable reference to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Move an eaten resource and reactivate it.
    RespawnResource(ResourceId),
    /// Evict a dying agent from the world.
    RemoveAgent(AgentId),
}

/// A pending delayed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    /// Handle returned by [`Scheduler::schedule`].
    pub handle: TimerHandle,
    /// World clock frame at which the timer fires.
    pub due: u64,
    /// Generation that scheduled the timer.
    pub generation: u32,
    /// Action to perform.
    pub action: TimerAction,
}

/// Owns all pending timers of a world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    next_handle: u64,
    pending: Vec<Timer>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to fire once the world clock reaches frame `due`.
    pub fn schedule(&mut self, due: u64, generation: u32, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Timer {
            handle,
            due,
            generation,
            action,
        });
        handle
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was canceled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    /// Cancels every timer scheduled by `generation`, returning how many were dropped.
    pub fn cancel_generation(&mut self, generation: u32) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.generation != generation);
        before - self.pending.len()
    }

    /// Removes and returns every timer due at `now`, earliest first.
    ///
    /// Timers due at the same instant come out in scheduling order.
    pub fn pop_due(&mut self, now: u64) -> Vec<Timer> {
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.pending.drain(..).partition(|timer| timer.due <= now);
        self.pending = pending;
        due.sort_by_key(|timer| (timer.due, timer.handle));
        due
    }

    /// Puts popped timers back, keeping their handles and due frames.
    pub fn requeue<I: IntoIterator<Item = Timer>>(&mut self, timers: I) {
        self.pending.extend(timers);
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    /// Number of timers waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
