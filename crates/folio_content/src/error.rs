use thiserror::Error;

/// Errors raised by content lookups
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("duplicate project {0}")]
    DuplicateProject(String),

    #[error("invalid route `{0}`")]
    InvalidRoute(String),

    #[error("invalid case study for project {project}: {reason}")]
    InvalidCaseStudy { project: u32, reason: String },

    #[error("unknown case study section `{0}`")]
    UnknownSection(String),

    #[error("typewriter needs at least one text")]
    NoTexts,
}
