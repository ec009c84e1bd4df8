//! Folio Carousel
//!
//! A stacked-card carousel controller that owns selection state and turns
//! heterogeneous input into committed index changes.
//!
//! # Features
//!
//! - **Gestures**: Mouse and touch drags with a commit threshold
//! - **Debouncing**: Swipe and wheel bursts collapse into single steps
//! - **Transition Lock**: Commits settle before the next gesture can commit
//! - **Pure Visual State**: Per-card offset, scale, opacity, and paint order
//!
//! # Example
//!
//! ```rust
//! use folio_carousel::{Carousel, CarouselConfig};
//!
//! let mut carousel = Carousel::new(vec![1u32, 2, 3], CarouselConfig::default()).unwrap();
//!
//! carousel.begin_drag(500.0);
//! carousel.update_drag(300.0);
//! assert!(carousel.end_drag().is_committed());
//! assert_eq!(carousel.selected_index(), 1);
//! assert_eq!(carousel.visual_state(1).opacity, 1.0);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod visual;

pub use config::{CarouselConfig, VisualConfig};
pub use controller::{
    Carousel, CarouselItem, Commit, CommitSource, Direction, GestureOutcome, Navigate, Phase,
};
pub use error::{CarouselError, ConfigError};
pub use input::InputResponse;
pub use visual::{compute_visual_state, VisualState};
