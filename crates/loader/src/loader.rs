use crate::error::{LoaderError, Result};
use crate::extract::{extract_headings, extract_links};
use corpus_protocol::{
    derive_slug, CorpusSnapshot, DescriptionBounds, Document, Frontmatter, MetadataIssue,
    ParseFailure, SkillRecord,
};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Loads a corpus root into an immutable `CorpusSnapshot`.
pub struct CorpusLoader {
    root: PathBuf,
}

impl CorpusLoader {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LoaderError::InvalidRoot(root));
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the corpus and build the snapshot.
    ///
    /// Documents are sorted by path; a file that cannot be read or decoded
    /// becomes a `ParseFailure` and the walk continues.
    pub fn load(&self) -> Result<CorpusSnapshot> {
        let mut snapshot = CorpusSnapshot::default();

        for entry in WalkBuilder::new(&self.root).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("walk error under {}: {e}", self.root.display());
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(rel) = corpus_path(&self.root, entry.path()) else {
                continue;
            };

            if is_markdown(&rel) {
                self.load_document(entry.path(), rel, &mut snapshot);
            } else {
                snapshot.asset_paths.insert(rel);
            }
        }

        snapshot.documents.sort_by(|a, b| a.path.cmp(&b.path));
        snapshot.parse_failures.sort_by(|a, b| a.path.cmp(&b.path));
        snapshot.metadata_issues.sort_by(|a, b| a.path.cmp(&b.path));

        log::info!(
            "loaded corpus {}: {} documents, {} assets, {} parse failures",
            self.root.display(),
            snapshot.documents.len(),
            snapshot.asset_paths.len(),
            snapshot.parse_failures.len()
        );

        Ok(snapshot)
    }

    fn load_document(&self, full_path: &Path, rel: String, snapshot: &mut CorpusSnapshot) {
        let bytes = match std::fs::read(full_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                snapshot.parse_failures.push(ParseFailure {
                    path: rel,
                    reason: e.to_string(),
                });
                return;
            }
        };
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                snapshot.parse_failures.push(ParseFailure {
                    path: rel,
                    reason: format!("invalid UTF-8: {e}"),
                });
                return;
            }
        };

        // Malformed frontmatter is a metadata issue, not a parse failure:
        // the document text is readable and still joins the graph.
        let frontmatter = match Frontmatter::extract(&text) {
            Ok(fm) => fm,
            Err(e) => {
                snapshot.metadata_issues.push(MetadataIssue {
                    path: rel.clone(),
                    reason: e.to_string(),
                });
                None
            }
        };

        snapshot.documents.push(Document {
            headings: extract_headings(&text),
            links: extract_links(&text),
            path: rel,
            raw_text: text,
            frontmatter,
        });
    }
}

/// Derive skill records from every `SKILL.md` in the snapshot.
///
/// Validation failures come back as metadata issues alongside the records;
/// neither blocks the other.
#[must_use]
pub fn collect_skills(
    snapshot: &CorpusSnapshot,
    bounds: &DescriptionBounds,
) -> (Vec<SkillRecord>, Vec<MetadataIssue>) {
    let mut records = Vec::new();
    let mut issues = Vec::new();

    for doc in &snapshot.documents {
        if derive_slug(&doc.path).is_none() {
            continue;
        }
        match SkillRecord::from_document(doc, bounds) {
            Ok(record) => records.push(record),
            Err(e) => issues.push(MetadataIssue {
                path: doc.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    (records, issues)
}

fn corpus_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn is_markdown(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}
