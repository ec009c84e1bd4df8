//! Case study pages
//!
//! A case study is a detail page with its own copy split into ordered
//! sections (problem, solutions, results). One section is shown at a time;
//! hovering a heading in the side navigation switches to it. The problem
//! statement is shown first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Kind of a case study section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Problem,
    Solutions,
    Results,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Problem,
        SectionKind::Solutions,
        SectionKind::Results,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Problem => "problem",
            SectionKind::Solutions => "solutions",
            SectionKind::Results => "results",
        }
    }

    /// Heading shown in the side navigation
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Problem => "Problem",
            SectionKind::Solutions => "Solutions",
            SectionKind::Results => "Results",
        }
    }

    /// Width of the rule under the heading (px)
    pub fn underline_width(self) -> f32 {
        match self {
            SectionKind::Problem => 70.0,
            SectionKind::Solutions => 80.0,
            SectionKind::Results => 60.0,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSection {
    pub kind: SectionKind,
    /// Body text; blank lines separate paragraphs
    pub body: String,
}

/// Long-form copy for a project detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    /// Title on the hero screen, which may differ from the card title
    pub title: String,
    /// Images shown side by side above the sections
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Sections in navigation order
    pub sections: Vec<CaseSection>,
}

impl CaseStudy {
    /// Sections must be non-empty with no kind repeated
    pub fn validate(&self, project: u32) -> Result<(), ContentError> {
        let invalid = |reason: &str| ContentError::InvalidCaseStudy {
            project,
            reason: reason.to_string(),
        };

        if self.sections.is_empty() {
            return Err(invalid("no sections"));
        }
        for (i, section) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|s| s.kind == section.kind) {
                return Err(invalid(&format!("section `{}` appears twice", section.kind)));
            }
        }
        Ok(())
    }

    pub fn section(&self, kind: SectionKind) -> Option<&CaseSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// The meNu food social app study
    pub fn menu() -> Self {
        Self {
            title: "meNu".to_string(),
            gallery: vec![
                "/assets/menu/menu3.png".to_string(),
                "/assets/menu/menu4.png".to_string(),
            ],
            sections: vec![
                CaseSection {
                    kind: SectionKind::Problem,
                    body: MENU_PROBLEM.to_string(),
                },
                CaseSection {
                    kind: SectionKind::Solutions,
                    body: MENU_SOLUTIONS.to_string(),
                },
                CaseSection {
                    kind: SectionKind::Results,
                    body: MENU_RESULTS.to_string(),
                },
            ],
        }
    }
}

const MENU_PROBLEM: &str = "Despite the abundance of food-related apps on the market from delivery services to review platforms, there’s a noticeable gap in how people connect socially through food. Most apps focus on transactions, not experiences. Users often toggle between multiple platforms to find recipes, discover new restaurants, or share food moments, leading to fragmented and impersonal interactions. Our research uncovered three major issues:\n\n• Complex navigation : users struggled to locate key features, resulting in early drop-offs.\n• Cluttered content hierarchy : information felt scattered, making discovery unintuitive.\n• Low feature visibility : 42% of users were unaware of existing tools within the app.\n\nThese gaps revealed an opportunity to create a unified, human-centered space where sharing, discovering, and experiencing food could exist harmoniously.";

const MENU_SOLUTIONS: &str = "We designed meNu, a food social media that reimagines how people connect through cuisine.\nOur core goal was to merge community and personalization under one intuitive ecosystem.\nThe experience revolves around two signature modes:\n\n• 🍴 Eat-Out : for users who love dining out, with curated restaurant recommendations tailored to their taste and mood.\n• 🏠 Eat-In : for home cooks or cozy nights in, featuring personalized recipes linked directly to ingredient shopping options.\n\nTo address the usability pain points, we:\n\n• Redesigned the information architecture to streamline navigation and surface essential features.\n• Developed a modular home experience, guiding users seamlessly between discovery, sharing, and engagement.\n• Introduced a cohesive visual language that balances warmth and modernity, inspired by café tones, soft yellows, and tactile textures.\n• Built social layers like likes, posts, and shared stories to make food exploration feel conversational, not transactional.\n\nThrough iterative wireframing, prototyping, and usability testing, we refined meNu into an experience that feels intuitive, emotional, and inviting just like food should.";

const MENU_RESULTS: &str = "Post-redesign, usability testing revealed significant improvements:\n\n• 42% faster task completion due to streamlined navigation.\n• 30% higher feature engagement, especially within recipe discovery and restaurant search.\n• Marked increase in emotional resonance: users described the app as “warm,” “easy to use,” and “like a food diary I actually want to open.”\n\nBeyond metrics, meNu successfully redefined food discovery as a shared experience, bridging the gap between eating out, cooking in, and connecting through what we all love: food.";

/// Navigation heading for one section
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionTab {
    pub kind: SectionKind,
    pub label: &'static str,
    pub active: bool,
    pub heading_opacity: f32,
    pub underline_opacity: f32,
    pub underline_width: f32,
    /// Entrance delay after the page content is revealed
    pub reveal_delay_ms: u32,
}

/// Section switcher for an open case study
#[derive(Debug, Clone)]
pub struct CaseStudyView<'a> {
    study: &'a CaseStudy,
    active: usize,
}

impl<'a> CaseStudyView<'a> {
    const FIRST_TAB_DELAY_MS: u32 = 800;
    const TAB_STAGGER_MS: u32 = 150;

    /// Open on the problem section, or the first section if there is none.
    /// Returns `None` for a study without sections.
    pub fn new(study: &'a CaseStudy) -> Option<Self> {
        if study.sections.is_empty() {
            return None;
        }
        let active = study
            .sections
            .iter()
            .position(|s| s.kind == SectionKind::Problem)
            .unwrap_or(0);
        Some(Self { study, active })
    }

    pub fn study(&self) -> &'a CaseStudy {
        self.study
    }

    pub fn active(&self) -> SectionKind {
        self.study.sections[self.active].kind
    }

    pub fn active_section(&self) -> &'a CaseSection {
        &self.study.sections[self.active]
    }

    /// Switch to `kind`. Returns true if the visible section changed; kinds
    /// the study doesn't have are ignored.
    pub fn select(&mut self, kind: SectionKind) -> bool {
        match self.study.sections.iter().position(|s| s.kind == kind) {
            Some(index) if index != self.active => {
                self.active = index;
                tracing::trace!(section = %kind, "case study section selected");
                true
            }
            _ => false,
        }
    }

    /// Headings in navigation order
    pub fn tabs(&self) -> Vec<SectionTab> {
        self.study
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let active = i == self.active;
                SectionTab {
                    kind: section.kind,
                    label: section.kind.label(),
                    active,
                    heading_opacity: if active { 1.0 } else { 0.5 },
                    underline_opacity: if active { 1.0 } else { 0.3 },
                    underline_width: section.kind.underline_width(),
                    reveal_delay_ms: Self::FIRST_TAB_DELAY_MS + Self::TAB_STAGGER_MS * i as u32,
                }
            })
            .collect()
    }
}
