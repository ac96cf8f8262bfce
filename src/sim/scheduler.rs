//! Virtual clock with cancellable timed tasks
//!
//! Replaces ambient platform timers. Time only moves when the owner drains
//! due tasks, and tasks fire one at a time in (due time, creation order), so
//! every callback runs to completion before the next one is dispatched.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled task. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    due: u64,
    /// `None` for one-shot tasks
    period: Option<u64>,
    payload: T,
}

/// Deterministic task queue driven by a millisecond virtual clock
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: u64,
    next_handle: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_handle: 1,
            entries: Vec::new(),
        }
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    fn insert(&mut self, delay: u64, period: Option<u64>, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            due: self.now + delay,
            period,
            payload,
        });
        handle
    }

    /// Fire `payload` every `period` ms, first at `now + period`
    pub fn schedule_repeating(&mut self, period: u64, payload: T) -> TaskHandle {
        let period = period.max(1);
        self.insert(period, Some(period), payload)
    }

    /// Fire `payload` once after `delay` ms
    pub fn schedule_once(&mut self, delay: u64, payload: T) -> TaskHandle {
        self.insert(delay, None, payload)
    }

    /// Cancel a task. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drop every outstanding task
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Number of outstanding tasks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the earliest task due at or before `until`, moving the clock to its due time.
    ///
    /// Repeating tasks are re-armed before being returned, so cancelling one
    /// from inside its own callback stops further firings.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        self.now = self.now.max(entry.due);
        let handle = entry.handle;
        let period = entry.period;

        match period {
            Some(period) => {
                entry.due += period;
                Some((handle, entry.payload.clone()))
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Some((handle, entry.payload))
            }
        }
    }

    /// Move the clock forward to `until` once no task is due before it
    pub fn settle(&mut self, until: u64) {
        debug_assert!(self.entries.iter().all(|e| e.due > until));
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, until: u64) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some((_, name)) = scheduler.pop_due(until) {
            fired.push((scheduler.now(), name));
        }
        scheduler.settle(until);
        fired
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(1000, "tick");

        let fired = drain(&mut scheduler, 3500);
        assert_eq!(fired, vec![(1000, "tick"), (2000, "tick"), (3000, "tick")]);
        assert_eq!(scheduler.now(), 3500);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_once_fires_once() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(4000, "land");

        assert!(drain(&mut scheduler, 3999).is_empty());
        assert_eq!(drain(&mut scheduler, 4000), vec![(4000, "land")]);
        assert!(!scheduler.is_scheduled(handle));
        assert!(drain(&mut scheduler, 10_000).is_empty());
    }

    #[test]
    fn test_ties_fire_in_creation_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(1000, "spawn");
        scheduler.schedule_repeating(1000, "countdown");
        scheduler.schedule_repeating(500, "poll");

        let fired = drain(&mut scheduler, 1000);
        assert_eq!(
            fired,
            vec![(500, "poll"), (1000, "spawn"), (1000, "countdown"), (1000, "poll")]
        );
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut scheduler = Scheduler::new();
        let spawn = scheduler.schedule_repeating(1000, "spawn");
        scheduler.schedule_repeating(1000, "countdown");

        drain(&mut scheduler, 1000);
        assert!(scheduler.cancel(spawn));
        assert!(!scheduler.cancel(spawn));

        let fired = drain(&mut scheduler, 2000);
        assert_eq!(fired, vec![(2000, "countdown")]);
    }

    #[test]
    fn test_cancel_from_inside_callback() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(1000, "spawn");

        let (handle, _) = scheduler.pop_due(1000).unwrap();
        // Re-armed, then cancelled by the callback
        assert!(scheduler.is_scheduled(handle));
        scheduler.cancel(handle);
        assert!(scheduler.pop_due(5000).is_none());
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(50, "poll");
        scheduler.schedule_once(4000, "land");
        scheduler.cancel_all();
        assert!(scheduler.is_empty());
        assert!(drain(&mut scheduler, 100_000).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.settle(2500);
        scheduler.schedule_once(100, "later");
        assert_eq!(drain(&mut scheduler, 3000), vec![(2600, "later")]);
    }
}
