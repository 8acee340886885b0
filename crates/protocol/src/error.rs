use thiserror::Error;

/// Malformed document metadata. Distinct from an unreadable document: the
/// file parsed, but its frontmatter or skill fields are invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("frontmatter block opened but never closed")]
    UnterminatedFrontmatter,

    #[error("frontmatter is not a YAML mapping")]
    NotAMapping,

    #[error("invalid YAML in frontmatter: {0}")]
    Yaml(String),

    #[error("frontmatter field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("missing required frontmatter field `{0}`")]
    MissingField(&'static str),

    #[error("skill document has no frontmatter")]
    MissingFrontmatter,

    #[error("`{0}` is not a skill document")]
    NotASkillDocument(String),

    #[error("skill name `{found}` does not match slug `{expected}` derived from its location")]
    SlugMismatch { expected: String, found: String },

    #[error("description length {len} outside configured bounds {min}..={max}")]
    DescriptionLength { len: usize, min: usize, max: usize },
}

/// Failure loading or parsing the audit rules configuration.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rules file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid exclusion pattern `{pattern}`: {reason}")]
    BadPattern { pattern: String, reason: String },
}
