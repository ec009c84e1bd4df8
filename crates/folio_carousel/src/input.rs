//! Input normalization
//!
//! Thin adapters that map host [`Event`]s onto controller operations. Mouse
//! and touch share one drag path; the arrow keys and the wheel each map to a
//! single operation.

use folio_core::events::event_types;
use folio_core::{Event, EventData, KeyCode};

use crate::controller::{Carousel, CarouselItem, GestureOutcome};

/// What the host should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputResponse {
    /// The carousel used the event; the host should suppress its default
    /// action (page scroll, text selection)
    pub consumed: bool,
    /// Resolution of the gesture, if the event ended one
    pub outcome: Option<GestureOutcome>,
}

impl InputResponse {
    const IGNORED: InputResponse = InputResponse {
        consumed: false,
        outcome: None,
    };

    const TRACKED: InputResponse = InputResponse {
        consumed: true,
        outcome: None,
    };

    fn resolved(outcome: GestureOutcome) -> Self {
        Self {
            consumed: outcome != GestureOutcome::Ignored,
            outcome: Some(outcome),
        }
    }

    pub fn committed(&self) -> bool {
        self.outcome.is_some_and(|o| o.is_committed())
    }
}

impl<T: CarouselItem> Carousel<T> {
    /// Route a host event to the matching controller operation
    pub fn handle_event(&mut self, event: &Event) -> InputResponse {
        match (event.event_type, &event.data) {
            (event_types::POINTER_DOWN, _) | (event_types::TOUCH_START, _) => match event.x() {
                Some(x) => {
                    self.begin_drag(x);
                    InputResponse::TRACKED
                }
                None => InputResponse::IGNORED,
            },
            (event_types::POINTER_MOVE, _) | (event_types::TOUCH_MOVE, _) => {
                match event.x() {
                    Some(x) if self.is_dragging() => {
                        self.update_drag(x);
                        InputResponse::TRACKED
                    }
                    _ => InputResponse::IGNORED,
                }
            }
            (event_types::POINTER_UP, _) | (event_types::TOUCH_END, _) => {
                InputResponse::resolved(self.end_drag())
            }
            (event_types::POINTER_LEAVE, _) => InputResponse::resolved(self.cancel_drag()),
            (event_types::KEY_DOWN, EventData::Key { key }) => match *key {
                KeyCode::LEFT => InputResponse::resolved(self.step_backward()),
                KeyCode::RIGHT => InputResponse::resolved(self.step_forward()),
                _ => InputResponse::IGNORED,
            },
            (event_types::SCROLL, EventData::Scroll { delta_x, delta_y }) => {
                InputResponse::resolved(self.wheel_tick(*delta_x, *delta_y))
            }
            _ => {
                tracing::trace!(event_type = event.event_type, "unhandled carousel event");
                InputResponse::IGNORED
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use folio_core::ManualClock;

    fn carousel() -> (Carousel<u32>, std::sync::Arc<ManualClock>) {
        let clock = ManualClock::shared(0.0);
        let c = Carousel::with_clock(vec![1, 2, 3, 4, 5], CarouselConfig::default(), clock.clone())
            .unwrap();
        (c, clock)
    }

    #[test]
    fn test_mouse_drag_commits() {
        let (mut c, _) = carousel();
        assert!(c.handle_event(&Event::pointer_down(500.0, 0.0)).consumed);
        assert!(c.handle_event(&Event::pointer_move(300.0, 0.0)).consumed);
        let response = c.handle_event(&Event::pointer_up(300.0, 0.0));
        assert!(response.committed());
        assert_eq!(c.selected_index(), 1);
    }

    #[test]
    fn test_touch_drag_commits_backward() {
        let (mut c, clock) = carousel();
        c.step_forward();
        clock.advance(1000.0);

        c.handle_event(&Event::touch_start(100.0, 0.0));
        c.handle_event(&Event::touch_move(400.0, 0.0));
        assert!(c.handle_event(&Event::touch_end()).committed());
        assert_eq!(c.selected_index(), 0);
    }

    #[test]
    fn test_pointer_leave_resolves_like_release() {
        let (mut c, _) = carousel();
        c.handle_event(&Event::pointer_down(500.0, 0.0));
        c.handle_event(&Event::pointer_move(200.0, 0.0));
        assert!(c.handle_event(&Event::pointer_leave()).committed());
        assert!(!c.is_dragging());

        let idle_leave = c.handle_event(&Event::pointer_leave());
        assert!(!idle_leave.consumed);
        assert_eq!(idle_leave.outcome, Some(GestureOutcome::Ignored));
    }

    #[test]
    fn test_hover_move_is_not_consumed() {
        let (mut c, _) = carousel();
        assert_eq!(
            c.handle_event(&Event::pointer_move(10.0, 10.0)),
            InputResponse {
                consumed: false,
                outcome: None
            }
        );
    }

    #[test]
    fn test_arrow_keys() {
        let (mut c, _) = carousel();
        assert!(c.handle_event(&Event::key_down(KeyCode::RIGHT)).committed());
        assert!(c.handle_event(&Event::key_down(KeyCode::RIGHT)).committed());
        assert!(c.handle_event(&Event::key_down(KeyCode::LEFT)).committed());
        assert_eq!(c.selected_index(), 1);
        assert!(!c.handle_event(&Event::key_down(KeyCode::UP)).consumed);
    }

    #[test]
    fn test_vertical_wheel_passes_through() {
        let (mut c, _) = carousel();
        let response = c.handle_event(&Event::scroll(5.0, 120.0));
        assert!(!response.consumed);
        assert_eq!(c.selected_index(), 0);

        let response = c.handle_event(&Event::scroll(60.0, 5.0));
        assert!(response.consumed && response.committed());
    }

    #[test]
    fn test_wheel_consumption_inside_debounce_window() {
        let (mut c, clock) = carousel();
        assert!(c.handle_event(&Event::scroll(60.0, 0.0)).committed());
        clock.advance(100.0);

        // Vertical ticks keep scrolling the page even right after a commit
        let vertical = c.handle_event(&Event::scroll(0.0, 120.0));
        assert!(!vertical.consumed);
        assert_eq!(vertical.outcome, Some(GestureOutcome::Ignored));

        let horizontal = c.handle_event(&Event::scroll(80.0, 0.0));
        assert!(horizontal.consumed);
        assert_eq!(horizontal.outcome, Some(GestureOutcome::Debounced));
        assert_eq!(c.selected_index(), 1);
    }
}
