//! Folio Core
//!
//! Foundational primitives shared by the Folio crates:
//!
//! - **Input Events**: Platform-agnostic pointer, touch, wheel, and key events
//! - **Geometry**: Viewport rectangles carried by navigation effects
//! - **Clocks**: Monotonic time sources, real and manually advanced

pub mod clock;
pub mod events;
pub mod geometry;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use events::{Event, EventData, EventType, KeyCode};
pub use geometry::Rect;
