//! Staged timelines
//!
//! A timeline is a fixed list of cues at millisecond offsets from its start.
//! Starting it schedules every cue on an internal [`TimerQueue`]; polling
//! returns the cues reached since the previous poll, each exactly once.

use smallvec::SmallVec;

use crate::timer::TimerQueue;

/// A cue placed on a timeline
#[derive(Clone, Debug)]
struct TimelineEntry<C> {
    offset_ms: u32,
    cue: C,
}

/// Cue sequencer for multi-stage transitions
#[derive(Debug)]
pub struct Timeline<C> {
    entries: Vec<TimelineEntry<C>>,
    pending: TimerQueue<C>,
    started_at: Option<f64>,
}

impl<C: Clone> Timeline<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pending: TimerQueue::new(),
            started_at: None,
        }
    }

    /// Add a cue at `offset_ms` from the timeline start
    pub fn cue(mut self, offset_ms: u32, cue: C) -> Self {
        self.entries.push(TimelineEntry { offset_ms, cue });
        self
    }

    /// Start (or restart) at `now_ms`, discarding any unreached cues
    pub fn start(&mut self, now_ms: f64) {
        self.pending.clear();
        for entry in &self.entries {
            self.pending
                .schedule_after(now_ms, entry.offset_ms as f64, entry.cue.clone());
        }
        self.started_at = Some(now_ms);
    }

    pub fn is_finished(&self) -> bool {
        self.started_at.is_some() && self.pending.is_empty()
    }

    /// Absolute time of the next unreached cue
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.next_deadline()
    }

    /// Cues reached since the previous poll, in timeline order
    pub fn poll(&mut self, now_ms: f64) -> SmallVec<[C; 4]> {
        self.pending
            .fire_due(now_ms)
            .into_iter()
            .map(|(_, cue)| cue)
            .collect()
    }
}

impl<C: Clone> Default for Timeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_fire_once_in_order() {
        let mut timeline = Timeline::new().cue(800, "overlay").cue(0, "expand").cue(2300, "push");
        assert!(timeline.poll(10_000.0).is_empty(), "not started yet");

        timeline.start(1000.0);
        assert_eq!(timeline.poll(1000.0).as_slice(), &["expand"]);
        assert!(timeline.poll(1500.0).is_empty());
        assert_eq!(timeline.next_deadline(), Some(1800.0));

        assert_eq!(timeline.poll(5000.0).as_slice(), &["overlay", "push"]);
        assert!(timeline.is_finished());
        assert!(timeline.poll(6000.0).is_empty());
    }

    #[test]
    fn test_restart_discards_unreached_cues() {
        let mut timeline = Timeline::new().cue(100, 1).cue(200, 2);
        timeline.start(0.0);
        assert_eq!(timeline.poll(150.0).as_slice(), &[1]);
        assert!(!timeline.is_finished());

        timeline.start(1000.0);
        assert_eq!(timeline.poll(1150.0).as_slice(), &[1]);
        assert_eq!(timeline.poll(1200.0).as_slice(), &[2]);
        assert!(timeline.is_finished());
    }
}
