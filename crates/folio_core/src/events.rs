//! Input event model
//!
//! Host runtimes (browser bindings, winit, a test harness) translate their raw
//! input into these platform-agnostic events before handing them to widgets.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer left the widget bounds
    pub const POINTER_LEAVE: EventType = 5;
    pub const TOUCH_START: EventType = 8;
    pub const TOUCH_MOVE: EventType = 9;
    pub const TOUCH_END: EventType = 12;
    pub const KEY_DOWN: EventType = 20;
    /// Wheel or trackpad scroll
    pub const SCROLL: EventType = 30;
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    /// First active touch point
    Touch {
        x: f32,
        y: f32,
    },
    Key {
        key: KeyCode,
    },
    Scroll {
        delta_x: f32,
        delta_y: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self { event_type, data }
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_DOWN, EventData::Pointer { x, y })
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_MOVE, EventData::Pointer { x, y })
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_UP, EventData::Pointer { x, y })
    }

    pub fn pointer_leave() -> Self {
        Self::new(event_types::POINTER_LEAVE, EventData::None)
    }

    pub fn touch_start(x: f32, y: f32) -> Self {
        Self::new(event_types::TOUCH_START, EventData::Touch { x, y })
    }

    pub fn touch_move(x: f32, y: f32) -> Self {
        Self::new(event_types::TOUCH_MOVE, EventData::Touch { x, y })
    }

    /// Touch end carries no coordinates; the last move is authoritative
    pub fn touch_end() -> Self {
        Self::new(event_types::TOUCH_END, EventData::None)
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self::new(event_types::KEY_DOWN, EventData::Key { key })
    }

    pub fn scroll(delta_x: f32, delta_y: f32) -> Self {
        Self::new(event_types::SCROLL, EventData::Scroll { delta_x, delta_y })
    }

    /// Horizontal coordinate for pointer and touch events
    pub fn x(&self) -> Option<f32> {
        match self.data {
            EventData::Pointer { x, .. } | EventData::Touch { x, .. } => Some(x),
            _ => None,
        }
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);

    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Map a DOM `KeyboardEvent.key` name to a key code
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::LEFT,
            "ArrowRight" => Self::RIGHT,
            "ArrowUp" => Self::UP,
            "ArrowDown" => Self::DOWN,
            "Enter" => Self::ENTER,
            "Escape" => Self::ESCAPE,
            " " | "Space" => Self::SPACE,
            "Home" => Self::HOME,
            "End" => Self::END,
            _ => Self::UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_name("ArrowLeft"), KeyCode::LEFT);
        assert_eq!(KeyCode::from_name("ArrowRight"), KeyCode::RIGHT);
        assert_eq!(KeyCode::from_name("q"), KeyCode::UNKNOWN);
    }

    #[test]
    fn test_x_only_for_positional_events() {
        assert_eq!(Event::pointer_down(12.0, 4.0).x(), Some(12.0));
        assert_eq!(Event::touch_move(-3.5, 0.0).x(), Some(-3.5));
        assert_eq!(Event::scroll(60.0, 0.0).x(), None);
        assert_eq!(Event::touch_end().x(), None);
    }
}
