use crate::frontmatter::Frontmatter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A heading inside a document, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Markdown heading level (1-6).
    pub level: u8,
    pub text: String,
}

/// A link reference extracted from a document, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Raw target with any `#anchor` suffix stripped.
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// 1-based line number in the raw text.
    pub line: usize,
}

/// One corpus document. Immutable for the duration of an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Corpus-relative path with `/` separators; the unique id.
    pub path: String,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
    pub headings: Vec<Heading>,
    pub links: Vec<LinkRef>,
}

impl Document {
    /// Category declared in frontmatter, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|fm| fm.category.as_deref())
    }
}

/// A document that could not be read or decoded. The file is excluded from
/// graph computation for this run; the run itself continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: String,
    pub reason: String,
}

/// A readable document whose skill metadata failed validation. Soft: the
/// document still participates in the reference graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataIssue {
    pub path: String,
    pub reason: String,
}

/// Immutable snapshot of the corpus for one audit run.
///
/// `asset_paths` holds non-document corpus files so that internal links to
/// assets resolve without any component touching the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub documents: Vec<Document>,
    pub asset_paths: BTreeSet<String>,
    pub parse_failures: Vec<ParseFailure>,
    pub metadata_issues: Vec<MetadataIssue>,
}

impl CorpusSnapshot {
    /// Look up a document by corpus path.
    #[must_use]
    pub fn document(&self, path: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.path == path)
    }

    /// True if `path` names any known corpus file, document or asset.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.asset_paths.contains(path) || self.documents.iter().any(|d| d.path == path)
    }
}
