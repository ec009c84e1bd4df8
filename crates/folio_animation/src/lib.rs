//! Folio Animation Support
//!
//! Timing primitives for presentation-layer choreography.
//!
//! # Features
//!
//! - **Timer Queue**: Cancellable scheduled tasks owned by a single widget
//! - **Easing**: Cubic and CSS-style bezier curves
//! - **Timelines**: Cue sequencing for staged page transitions

pub mod easing;
pub mod timeline;
pub mod timer;

pub use easing::Easing;
pub use timeline::Timeline;
pub use timer::{Fired, TimerId, TimerQueue};
