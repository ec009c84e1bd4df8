//! Folio Content
//!
//! Everything around the carousel that the site shows or sequences:
//!
//! - **Catalog**: The gallery projects, by id and slug
//! - **Case studies**: Sectioned project pages with a section switcher
//! - **Routes**: Detail page paths carrying the tapped card's bounds
//! - **Reveal**: Detail page stage timing and expand-from-card frames
//! - **Typewriter**: The cycling headline on the about page

pub mod case_study;
pub mod catalog;
pub mod error;
pub mod reveal;
pub mod route;
pub mod typewriter;

pub use case_study::{CaseSection, CaseStudy, CaseStudyView, SectionKind, SectionTab};
pub use catalog::{Catalog, Project, ProjectRef};
pub use error::ContentError;
pub use reveal::{DetailReveal, RevealCue, RevealFrame, RevealTimings, Splash, SplashFrame};
pub use route::{DetailRoute, WORK_INDEX_PATH};
pub use typewriter::{Typewriter, TypewriterTimings};
