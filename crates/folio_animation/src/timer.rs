//! Timer queue
//!
//! Deferred state changes (transition cooldowns, reveal stages) are modeled as
//! scheduled tasks owned by the widget that created them. There is no global
//! timer registry: dropping the owner drops its queue, so a pending task can
//! never fire into a widget that no longer exists.
//!
//! The queue does not run on its own. The owner pumps it with
//! [`TimerQueue::fire_due`] whenever it handles input or is ticked by the host,
//! and the host can sleep until [`TimerQueue::next_deadline`].

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a scheduled task, usable for cancellation
    pub struct TimerId;
}

/// Batch of tasks fired by a single pump
pub type Fired<T> = SmallVec<[(TimerId, T); 4]>;

#[derive(Debug)]
struct ScheduledTask<T> {
    deadline_ms: f64,
    /// Insertion order, breaks deadline ties
    seq: u64,
    payload: T,
}

/// A set of cancellable tasks keyed by deadline
#[derive(Debug)]
pub struct TimerQueue<T> {
    tasks: SlotMap<TimerId, ScheduledTask<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire at the absolute time `deadline_ms`
    pub fn schedule(&mut self, deadline_ms: f64, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.tasks.insert(ScheduledTask {
            deadline_ms,
            seq,
            payload,
        });
        tracing::trace!(?id, deadline_ms, "timer scheduled");
        id
    }

    /// Schedule `payload` to fire `delay_ms` after `now_ms`
    pub fn schedule_after(&mut self, now_ms: f64, delay_ms: f64, payload: T) -> TimerId {
        self.schedule(now_ms + delay_ms.max(0.0), payload)
    }

    /// Cancel a pending task, returning its payload if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let task = self.tasks.remove(id)?;
        tracing::trace!(?id, "timer cancelled");
        Some(task.payload)
    }

    /// Cancel every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Deadline of a pending task
    pub fn deadline(&self, id: TimerId) -> Option<f64> {
        self.tasks.get(id).map(|t| t.deadline_ms)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.tasks
            .values()
            .map(|t| t.deadline_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove and return every task whose deadline is at or before `now_ms`,
    /// ordered by deadline and then by scheduling order
    pub fn fire_due(&mut self, now_ms: f64) -> Fired<T> {
        let mut due: SmallVec<[(f64, u64, TimerId); 4]> = self
            .tasks
            .iter()
            .filter(|(_, t)| t.deadline_ms <= now_ms)
            .map(|(id, t)| (t.deadline_ms, t.seq, id))
            .collect();

        if due.is_empty() {
            return Fired::new();
        }

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, _, id)| self.tasks.remove(id).map(|t| (id, t.payload)))
            .collect()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
