//! Project catalog
//!
//! The gallery's projects. The built-in catalog is the published set;
//! [`Catalog::new`] accepts any list with unique ids and slugs. Projects are
//! addressed by numeric id (`/work/2`) or by slug (`/work/project-1`).

use std::fmt;

use folio_carousel::CarouselItem;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::case_study::CaseStudy;
use crate::error::ContentError;

/// A single case study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Card image shown in the carousel
    pub image: String,
    /// Hero image on the detail page; falls back to `image`
    #[serde(default)]
    pub detail_image: Option<String>,
    #[serde(default)]
    pub detail_content: Option<String>,
    /// Sectioned long-form page, for projects that have one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<CaseStudy>,
}

impl Project {
    pub fn hero_image(&self) -> &str {
        self.detail_image.as_deref().unwrap_or(&self.image)
    }
}

impl CarouselItem for Project {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

const CARD_IMAGE: &str = "/assets/menu/menu1.png";
const DETAIL_IMAGE: &str = "/assets/menu/menu2.png";
const MENU_PROJECT_ID: u32 = 1;

/// (id, slug, title, description, detail content)
const BUILTIN: [(u32, &str, &str, &str, &str); 5] = [
    (
        1,
        "project-1",
        "Project One",
        "A beautiful design project showcasing modern aesthetics and user experience.",
        "This is a detailed description of Project One. It includes comprehensive information about the project goals, methodology, and outcomes. The project demonstrates expertise in modern design principles and user-centered design approaches.",
    ),
    (
        2,
        "project-2",
        "Project Two",
        "An innovative solution for complex user interface challenges.",
        "Project Two focuses on solving complex UI/UX challenges through innovative design patterns. This project showcases advanced interaction design and responsive layouts that work seamlessly across all devices.",
    ),
    (
        3,
        "project-3",
        "Project Three",
        "Brand identity and visual design for a tech startup.",
        "A complete brand identity project including logo design, color palette, typography, and brand guidelines. This project demonstrates the ability to create cohesive visual systems that resonate with target audiences.",
    ),
    (
        4,
        "project-4",
        "Project Four",
        "Mobile app design with focus on accessibility and usability.",
        "This mobile app design project prioritizes accessibility and usability. Every design decision was made with consideration for users of all abilities, resulting in an inclusive and intuitive user experience.",
    ),
    (
        5,
        "project-5",
        "Project Five",
        "E-commerce platform redesign to improve conversion rates.",
        "A comprehensive e-commerce platform redesign that resulted in a 40% increase in conversion rates. This project involved extensive user research, A/B testing, and iterative design improvements.",
    ),
];

/// How a route or command names a project
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectRef {
    Id(u32),
    Slug(String),
}

impl ProjectRef {
    /// All-digit references are ids, anything else is a slug
    pub fn parse(reference: &str) -> Self {
        match reference.parse::<u32>() {
            Ok(id) => ProjectRef::Id(id),
            Err(_) => ProjectRef::Slug(reference.to_string()),
        }
    }
}

impl From<u32> for ProjectRef {
    fn from(id: u32) -> Self {
        ProjectRef::Id(id)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "{id}"),
            ProjectRef::Slug(slug) => f.write_str(slug),
        }
    }
}

/// Ordered, immutable set of projects indexed by id and slug
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    by_id: FxHashMap<u32, usize>,
    by_slug: FxHashMap<String, usize>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Result<Self, ContentError> {
        let mut by_id = FxHashMap::default();
        let mut by_slug = FxHashMap::default();

        for (index, project) in projects.iter().enumerate() {
            if let Some(study) = &project.case_study {
                study.validate(project.id)?;
            }
            if by_id.insert(project.id, index).is_some() {
                return Err(ContentError::DuplicateProject(format!("id {}", project.id)));
            }
            if by_slug.insert(project.slug.clone(), index).is_some() {
                return Err(ContentError::DuplicateProject(format!(
                    "slug `{}`",
                    project.slug
                )));
            }
        }

        Ok(Self {
            projects,
            by_id,
            by_slug,
        })
    }

    /// The published gallery
    pub fn builtin() -> Self {
        let projects = BUILTIN
            .iter()
            .map(|&(id, slug, title, description, detail)| Project {
                id,
                slug: slug.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                image: CARD_IMAGE.to_string(),
                detail_image: Some(DETAIL_IMAGE.to_string()),
                detail_content: Some(detail.to_string()),
                case_study: (id == MENU_PROJECT_ID).then(CaseStudy::menu),
            })
            .collect();

        let by_id = BUILTIN
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.0, index))
            .collect();
        let by_slug = BUILTIN
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.1.to_string(), index))
            .collect();

        Self {
            projects,
            by_id,
            by_slug,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.by_id.get(&id).map(|&i| &self.projects[i])
    }

    pub fn find_by_id(&self, id: u32) -> Result<&Project, ContentError> {
        self.get(id)
            .ok_or_else(|| ContentError::ProjectNotFound(id.to_string()))
    }

    pub fn find_by_slug(&self, slug: &str) -> Result<&Project, ContentError> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.projects[i])
            .ok_or_else(|| ContentError::ProjectNotFound(slug.to_string()))
    }

    pub fn find(&self, reference: &ProjectRef) -> Result<&Project, ContentError> {
        match reference {
            ProjectRef::Id(id) => self.find_by_id(*id),
            ProjectRef::Slug(slug) => self.find_by_slug(slug),
        }
    }

    /// Resolve either a numeric id or a slug
    pub fn resolve(&self, reference: &str) -> Result<&Project, ContentError> {
        self.find(&ProjectRef::parse(reference))
    }

    /// Position of a project in gallery order
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }
}
