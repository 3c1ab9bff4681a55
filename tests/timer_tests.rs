#![allow(missing_docs)]

use evo_arena::simulation::timers::{Scheduler, TimerAction};

#[test]
fn test_timers_fire_once_in_order() {
    let mut scheduler = Scheduler::new();
    let late = scheduler.schedule(120, 0, TimerAction::RemoveAgent(1));
    let early = scheduler.schedule(60, 0, TimerAction::RespawnResource(4));
    let tied = scheduler.schedule(60, 0, TimerAction::RespawnResource(5));

    assert!(scheduler.pop_due(59).is_empty());

    let fired = scheduler.pop_due(120);
    let handles: Vec<_> = fired.iter().map(|t| t.handle).collect();
    assert_eq!(handles, vec![early, tied, late]);
    assert_eq!(fired[0].action, TimerAction::RespawnResource(4));

    assert!(scheduler.is_empty());
    assert!(scheduler.pop_due(600).is_empty());
}

#[test]
fn test_cancel_timer() {
    let mut scheduler = Scheduler::new();
    let handle = scheduler.schedule(60, 0, TimerAction::RemoveAgent(0));
    let other = scheduler.schedule(60, 0, TimerAction::RemoveAgent(1));

    assert!(scheduler.is_pending(handle));
    assert!(scheduler.cancel(handle));
    assert!(!scheduler.cancel(handle));
    assert!(!scheduler.is_pending(handle));

    let fired = scheduler.pop_due(60);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].handle, other);
    assert!(!scheduler.cancel(other));
}

#[test]
fn test_cancel_generation() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(60, 3, TimerAction::RespawnResource(0));
    scheduler.schedule(120, 3, TimerAction::RemoveAgent(0));
    let next = scheduler.schedule(90, 4, TimerAction::RespawnResource(0));

    assert_eq!(scheduler.cancel_generation(3), 2);
    assert_eq!(scheduler.cancel_generation(3), 0);
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.is_pending(next));
}

#[test]
fn test_requeue_keeps_handles() {
    let mut scheduler = Scheduler::new();
    let first = scheduler.schedule(10, 0, TimerAction::RespawnResource(0));
    let second = scheduler.schedule(10, 0, TimerAction::RespawnResource(1));
    let later = scheduler.schedule(50, 0, TimerAction::RemoveAgent(2));

    let fired = scheduler.pop_due(10);
    assert_eq!(fired.len(), 2);
    scheduler.requeue(fired);

    assert_eq!(scheduler.len(), 3);
    assert!(scheduler.is_pending(first));
    assert!(scheduler.is_pending(second));
    assert!(scheduler.cancel(second));

    let handles: Vec<_> = scheduler.pop_due(u64::MAX).iter().map(|t| t.handle).collect();
    assert_eq!(handles, vec![first, later]);
}
