//! Carousel controller
//!
//! Translates pointer drags, touch drags, wheel ticks, and arrow keys into at
//! most one committed index change per gesture while exposing live drag
//! feedback through [`Carousel::visual_state`].
//!
//! # State
//!
//! Dragging and transitioning are independent flags, not one enum. A drag can
//! start while the previous commit's cooldown is still running; tracking
//! proceeds normally but the drag cannot commit until the cooldown expires.
//!
//! ```text
//!  begin_drag ─► dragging ──end_drag / cancel_drag──► idle
//!                                  │
//!                        commit ───┴──► transitioning ──cooldown──► idle
//! ```
//!
//! Gesture commits (drag, wheel) are gated twice: by a debounce window
//! measured from the previous commit and by the transition lock. Keyboard
//! steps bypass both gates but still start a new cooldown.
//!
//! # Timers
//!
//! The cooldown is a task on a queue owned by the controller. It is pumped
//! before every operation and may also be pumped by the host through
//! [`Carousel::tick`]; [`Carousel::next_deadline_ms`] tells the host when
//! the next state change is due. Dropping the controller drops the queue.

use std::fmt;
use std::hash::Hash;

use folio_animation::{TimerId, TimerQueue};
use folio_core::{Rect, SharedClock, SystemClock};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::visual::{compute_visual_state, VisualState};

/// An item shown in the carousel
///
/// The controller only needs identity; every other field belongs to the
/// renderer.
pub trait CarouselItem {
    type Key: Clone + Eq + Hash + fmt::Debug;

    fn key(&self) -> Self::Key;
}

impl CarouselItem for u32 {
    type Key = u32;

    fn key(&self) -> u32 {
        *self
    }
}

impl CarouselItem for String {
    type Key = String;

    fn key(&self) -> String {
        self.clone()
    }
}

/// Step direction through the item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward higher indices (swipe left, wheel right, ArrowRight)
    Forward,
    /// Toward lower indices
    Backward,
}

/// Input modality that produced a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitSource {
    Drag,
    Wheel,
    Keyboard,
}

/// An accepted change of the selected index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub source: CommitSource,
}

/// How the controller resolved a discrete gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOutcome {
    Committed(Commit),
    /// Arrived within the debounce window of the previous commit
    Debounced,
    /// Qualified, but the previous transition is still settling
    Locked,
    /// Qualified, but the selection is already at that end of the list
    AtBoundary,
    /// Did not move far enough to count
    BelowThreshold,
    /// Not a gesture this controller handles (no drag in progress, vertical
    /// wheel motion); the host should apply its default behavior
    Ignored,
}

impl GestureOutcome {
    pub fn commit(&self) -> Option<Commit> {
        match self {
            GestureOutcome::Committed(commit) => Some(*commit),
            _ => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, GestureOutcome::Committed(_))
    }
}

/// Descriptive view over the two independent state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Dragging,
    Transitioning,
    DraggingWhileTransitioning,
}

/// Navigation request emitted when the center card is tapped
#[derive(Debug, Clone, PartialEq)]
pub struct Navigate<K> {
    pub key: K,
    pub index: usize,
    /// On-screen bounds of the tapped card, seeds the expand animation
    pub bounds: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarouselTimer {
    CooldownExpired,
}

/// Gesture-driven selection over a fixed list of items
pub struct Carousel<T: CarouselItem> {
    items: Vec<T>,
    config: CarouselConfig,
    clock: SharedClock,
    selected: usize,
    dragging: bool,
    anchor_x: f32,
    drag_delta: f32,
    transitioning: bool,
    last_commit_ms: Option<f64>,
    cooldown: Option<TimerId>,
    timers: TimerQueue<CarouselTimer>,
}

impl<T: CarouselItem> Carousel<T> {
    /// Create a carousel driven by the system clock
    pub fn new(items: Vec<T>, config: CarouselConfig) -> Result<Self, CarouselError> {
        Self::with_clock(items, config, SystemClock::shared())
    }

    /// Create a carousel driven by an explicit clock
    pub fn with_clock(
        items: Vec<T>,
        config: CarouselConfig,
        clock: SharedClock,
    ) -> Result<Self, CarouselError> {
        config.validate()?;

        if items.is_empty() {
            return Err(CarouselError::Empty);
        }

        let mut seen = FxHashSet::default();
        for item in &items {
            let key = item.key();
            if !seen.insert(key.clone()) {
                return Err(CarouselError::DuplicateKey(format!("{key:?}")));
            }
        }

        tracing::debug!(items = items.len(), "carousel mounted");

        Ok(Self {
            items,
            config,
            clock,
            selected: 0,
            dragging: false,
            anchor_x: 0.0,
            drag_delta: 0.0,
            transitioning: false,
            last_commit_ms: None,
            cooldown: None,
            timers: TimerQueue::new(),
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> &T {
        &self.items[self.selected]
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer displacement since the drag began; zero when not dragging
    pub fn drag_delta(&self) -> f32 {
        if self.dragging {
            self.drag_delta
        } else {
            0.0
        }
    }

    /// Whether a commit's cooldown is still running.
    ///
    /// Reads through the clock, so an overdue cooldown reports false even if
    /// the host has not pumped the timer yet.
    pub fn is_transitioning(&self) -> bool {
        if !self.transitioning {
            return false;
        }
        match self.cooldown.and_then(|id| self.timers.deadline(id)) {
            Some(deadline) => self.clock.now_ms() < deadline,
            None => true,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.dragging, self.is_transitioning()) {
            (false, false) => Phase::Idle,
            (true, false) => Phase::Dragging,
            (false, true) => Phase::Transitioning,
            (true, true) => Phase::DraggingWhileTransitioning,
        }
    }

    /// Clock time of the last commit
    pub fn last_commit_ms(&self) -> Option<f64> {
        self.last_commit_ms
    }

    /// When the host should call [`Carousel::tick`] next
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    pub fn can_step_backward(&self) -> bool {
        self.selected > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.selected + 1 < self.items.len()
    }

    /// One-based "current - total" counter shown under the stack
    pub fn position_label(&self) -> String {
        format!("{} - {}", self.selected + 1, self.items.len())
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Fire due timers. Returns true if any state changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.pump(now)
    }

    fn pump(&mut self, now: f64) -> bool {
        let fired = self.timers.fire_due(now);
        let changed = !fired.is_empty();
        for (id, timer) in fired {
            match timer {
                CarouselTimer::CooldownExpired => {
                    if self.cooldown == Some(id) {
                        self.cooldown = None;
                        self.transitioning = false;
                        tracing::trace!(now, "transition settled");
                    }
                }
            }
        }
        changed
    }

    /// Current time, after firing anything that came due
    fn now(&mut self) -> f64 {
        let now = self.clock.now_ms();
        self.pump(now);
        now
    }

    fn within_debounce(&self, now: f64, window_ms: u32) -> bool {
        self.last_commit_ms
            .is_some_and(|last| now - last < window_ms as f64)
    }

    fn neighbor(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward if self.can_step_forward() => Some(self.selected + 1),
            Direction::Backward if self.can_step_backward() => Some(self.selected - 1),
            _ => None,
        }
    }

    fn commit(&mut self, to: usize, direction: Direction, source: CommitSource, now: f64) -> Commit {
        if let Some(previous) = self.cooldown.take() {
            self.timers.cancel(previous);
        }

        let commit = Commit {
            from: self.selected,
            to,
            direction,
            source,
        };

        self.selected = to;
        self.transitioning = true;
        self.last_commit_ms = Some(now);
        self.cooldown = Some(self.timers.schedule_after(
            now,
            self.config.transition_cooldown_ms as f64,
            CarouselTimer::CooldownExpired,
        ));

        tracing::debug!(
            from = commit.from,
            to = commit.to,
            ?source,
            now,
            "carousel commit"
        );
        commit
    }

    /// Gate shared by drag and wheel commits
    fn try_gesture_commit(
        &mut self,
        direction: Direction,
        source: CommitSource,
        now: f64,
    ) -> GestureOutcome {
        if self.transitioning {
            tracing::debug!(?source, "gesture refused while transition settles");
            return GestureOutcome::Locked;
        }
        match self.neighbor(direction) {
            Some(to) => GestureOutcome::Committed(self.commit(to, direction, source, now)),
            None => GestureOutcome::AtBoundary,
        }
    }

    // =========================================================================
    // Drag
    // =========================================================================

    /// Start tracking a drag at `pointer_x`.
    ///
    /// Calling this while already dragging restarts from the new anchor and
    /// discards the accumulated delta.
    pub fn begin_drag(&mut self, pointer_x: f32) {
        let now = self.now();
        if self.dragging {
            tracing::trace!(discarded = self.drag_delta, "drag restarted");
        }
        self.dragging = true;
        self.anchor_x = pointer_x;
        self.drag_delta = 0.0;
        tracing::trace!(pointer_x, now, "drag started");
    }

    /// Track pointer movement; no-op unless dragging. Never commits.
    pub fn update_drag(&mut self, pointer_x: f32) {
        self.now();
        if self.dragging {
            self.drag_delta = pointer_x - self.anchor_x;
        }
    }

    /// Finish the drag and commit if it moved far enough
    pub fn end_drag(&mut self) -> GestureOutcome {
        let now = self.now();
        if !self.dragging {
            return GestureOutcome::Ignored;
        }

        self.dragging = false;
        let moved_by = self.drag_delta;
        self.drag_delta = 0.0;

        if self.within_debounce(now, self.config.swipe_debounce_ms) {
            tracing::debug!(moved_by, "swipe debounced");
            return GestureOutcome::Debounced;
        }

        let threshold = self.config.drag_threshold_px;
        if moved_by < -threshold {
            self.try_gesture_commit(Direction::Forward, CommitSource::Drag, now)
        } else if moved_by > threshold {
            self.try_gesture_commit(Direction::Backward, CommitSource::Drag, now)
        } else {
            GestureOutcome::BelowThreshold
        }
    }

    /// Pointer left the carousel. Resolves an in-progress drag exactly like
    /// [`Carousel::end_drag`]; ignored otherwise.
    pub fn cancel_drag(&mut self) -> GestureOutcome {
        if self.dragging {
            self.end_drag()
        } else {
            GestureOutcome::Ignored
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Select the next item. Not debounced or locked.
    pub fn step_forward(&mut self) -> GestureOutcome {
        self.step(Direction::Forward)
    }

    /// Select the previous item. Not debounced or locked.
    pub fn step_backward(&mut self) -> GestureOutcome {
        self.step(Direction::Backward)
    }

    fn step(&mut self, direction: Direction) -> GestureOutcome {
        let now = self.now();
        match self.neighbor(direction) {
            Some(to) => {
                GestureOutcome::Committed(self.commit(to, direction, CommitSource::Keyboard, now))
            }
            None => GestureOutcome::AtBoundary,
        }
    }

    // =========================================================================
    // Wheel
    // =========================================================================

    /// Handle one wheel event.
    ///
    /// Only horizontally dominant motion is handled; anything else returns
    /// [`GestureOutcome::Ignored`] so the host can scroll the page.
    pub fn wheel_tick(&mut self, delta_x: f32, delta_y: f32) -> GestureOutcome {
        let now = self.now();

        if !(delta_x.abs() > delta_y.abs()) {
            return GestureOutcome::Ignored;
        }

        if self.within_debounce(now, self.config.wheel_debounce_ms) {
            tracing::trace!(delta_x, "wheel tick debounced");
            return GestureOutcome::Debounced;
        }

        let threshold = self.config.wheel_threshold;
        if delta_x > threshold {
            self.try_gesture_commit(Direction::Forward, CommitSource::Wheel, now)
        } else if delta_x < -threshold {
            self.try_gesture_commit(Direction::Backward, CommitSource::Wheel, now)
        } else {
            GestureOutcome::BelowThreshold
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Visual state of the card at `index`; pure over the current state
    pub fn visual_state(&self, index: usize) -> VisualState {
        let drag = self.dragging.then_some(self.drag_delta);
        compute_visual_state(
            index,
            self.selected,
            self.items.len(),
            drag,
            &self.config.visual,
        )
    }

    /// Visual state of every card, in index order
    pub fn visual_states(&self) -> Vec<VisualState> {
        (0..self.items.len()).map(|i| self.visual_state(i)).collect()
    }

    /// Resolve a tap on the card at `index`.
    ///
    /// Only the interactive center card navigates, and never mid-drag.
    pub fn tap(&self, index: usize, bounds: Rect) -> Option<Navigate<T::Key>> {
        if index != self.selected || self.dragging {
            return None;
        }
        let item = self.items.get(index)?;
        Some(Navigate {
            key: item.key(),
            index,
            bounds,
        })
    }
}

impl<T: CarouselItem> fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.items.len())
            .field("selected", &self.selected)
            .field("dragging", &self.dragging)
            .field("drag_delta", &self.drag_delta)
            .field("transitioning", &self.transitioning)
            .field("last_commit_ms", &self.last_commit_ms)
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<T: CarouselItem> Drop for Carousel<T> {
    fn drop(&mut self) {
        if !self.timers.is_empty() {
            tracing::trace!(pending = self.timers.len(), "carousel dropped with pending timers");
        }
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ManualClock;
    use std::sync::Arc;

    fn carousel(count: u32) -> (Carousel<u32>, Arc<ManualClock>) {
        let clock = ManualClock::shared(10_000.0);
        let items = (1..=count).collect();
        let carousel = Carousel::with_clock(items, CarouselConfig::default(), clock.clone())
            .expect("valid carousel");
        (carousel, clock)
    }

    #[test]
    fn test_rejects_empty_and_duplicate_items() {
        assert!(matches!(
            Carousel::<u32>::new(Vec::new(), CarouselConfig::default()),
            Err(CarouselError::Empty)
        ));
        assert!(matches!(
            Carousel::new(vec![1u32, 2, 1], CarouselConfig::default()),
            Err(CarouselError::DuplicateKey(key)) if key == "1"
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = CarouselConfig {
            wheel_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Carousel::new(vec![1u32], config),
            Err(CarouselError::Config(_))
        ));
    }

    #[test]
    fn test_initial_state() {
        let (c, _) = carousel(5);
        assert_eq!(c.selected_index(), 0);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.position_label(), "1 - 5");
        assert!(!c.can_step_backward());
        assert!(c.can_step_forward());
        assert_eq!(c.next_deadline_ms(), None);
    }

    #[test]
    fn test_update_without_drag_is_noop() {
        let (mut c, _) = carousel(3);
        c.update_drag(400.0);
        assert_eq!(c.drag_delta(), 0.0);
        assert_eq!(c.end_drag(), GestureOutcome::Ignored);
        assert_eq!(c.cancel_drag(), GestureOutcome::Ignored);
    }

    #[test]
    fn test_restarted_drag_discards_delta() {
        let (mut c, _) = carousel(3);
        c.begin_drag(500.0);
        c.update_drag(100.0);
        assert_eq!(c.drag_delta(), -400.0);

        c.begin_drag(300.0);
        assert_eq!(c.drag_delta(), 0.0);
        c.update_drag(250.0);
        assert_eq!(c.end_drag(), GestureOutcome::BelowThreshold);
        assert_eq!(c.selected_index(), 0);
    }

    #[test]
    fn test_phase_tracks_independent_flags() {
        let (mut c, clock) = carousel(5);
        c.step_forward();
        assert_eq!(c.phase(), Phase::Transitioning);

        c.begin_drag(0.0);
        assert_eq!(c.phase(), Phase::DraggingWhileTransitioning);

        clock.advance(600.0);
        assert_eq!(c.phase(), Phase::Dragging);

        c.end_drag();
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_keyboard_recommit_replaces_cooldown() {
        let (mut c, clock) = carousel(5);
        c.step_forward();
        clock.advance(500.0);
        c.step_forward();

        assert_eq!(c.timers.len(), 1);
        assert_eq!(c.next_deadline_ms(), Some(10_500.0 + 600.0));

        clock.advance(200.0);
        assert!(c.is_transitioning(), "first cooldown must not end the second");
        clock.advance(400.0);
        assert!(c.tick());
        assert!(!c.is_transitioning());
        assert_eq!(c.next_deadline_ms(), None);
    }

    #[test]
    fn test_tap_only_center_and_not_mid_drag() {
        let (mut c, _) = carousel(5);
        let bounds = Rect::new(10.0, 20.0, 500.0, 350.0);

        assert_eq!(c.tap(1, bounds), None);
        assert_eq!(
            c.tap(0, bounds),
            Some(Navigate {
                key: 1,
                index: 0,
                bounds
            })
        );

        c.begin_drag(0.0);
        assert_eq!(c.tap(0, bounds), None);
    }

    #[test]
    fn test_wheel_equal_axes_is_ignored() {
        let (mut c, _) = carousel(5);
        assert_eq!(c.wheel_tick(80.0, 80.0), GestureOutcome::Ignored);
        assert_eq!(c.wheel_tick(f32::NAN, 0.0), GestureOutcome::Ignored);
        assert_eq!(c.wheel_tick(30.0, 5.0), GestureOutcome::BelowThreshold);
    }

    #[test]
    fn test_drag_at_boundaries() {
        let (mut c, clock) = carousel(2);
        c.begin_drag(0.0);
        c.update_drag(300.0);
        assert_eq!(c.end_drag(), GestureOutcome::AtBoundary);

        c.step_forward();
        clock.advance(1000.0);
        c.begin_drag(300.0);
        c.update_drag(0.0);
        assert_eq!(c.end_drag(), GestureOutcome::AtBoundary);
        assert_eq!(c.selected_index(), 1);
    }
}
