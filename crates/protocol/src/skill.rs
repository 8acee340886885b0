use crate::document::Document;
use crate::error::MetadataError;
use crate::rules::DescriptionBounds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A slug referenced somewhere (related skill, product mapping) that no
/// indexed skill carries. Soft diagnostic, never a failure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnknownSlug {
    pub slug: String,
    /// Who referenced it: a skill slug or a product type.
    pub referenced_by: String,
}

/// Skill metadata derived from a `SKILL.md` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Canonical identifier: the skill's directory name.
    pub slug: String,
    /// Corpus path of the backing `SKILL.md`.
    pub path: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: BTreeSet<String>,
    pub related_skills: BTreeSet<String>,
}

/// Derive the slug for a skill document: the name of the directory holding
/// `SKILL.md`. Returns `None` for paths that are not skill documents.
#[must_use]
pub fn derive_slug(path: &str) -> Option<String> {
    let mut parts = path.rsplit('/');
    let file = parts.next()?;
    if !file.eq_ignore_ascii_case("SKILL.md") {
        return None;
    }
    parts.next().map(str::to_string)
}

impl SkillRecord {
    /// Build and validate a skill record from its document.
    ///
    /// Invariants checked here: frontmatter present with `name` and
    /// `description`, `name` equals the location-derived slug, description
    /// length within `bounds`. Dangling `related_skills` are deliberately
    /// not checked; they surface as soft diagnostics at resolve time.
    pub fn from_document(
        doc: &Document,
        bounds: &DescriptionBounds,
    ) -> Result<SkillRecord, MetadataError> {
        let slug = derive_slug(&doc.path)
            .ok_or_else(|| MetadataError::NotASkillDocument(doc.path.clone()))?;
        let fm = doc
            .frontmatter
            .as_ref()
            .ok_or(MetadataError::MissingFrontmatter)?;

        let name = fm
            .name
            .clone()
            .ok_or(MetadataError::MissingField("name"))?;
        if name != slug {
            return Err(MetadataError::SlugMismatch {
                expected: slug,
                found: name,
            });
        }

        let description = fm
            .description
            .clone()
            .ok_or(MetadataError::MissingField("description"))?;
        let len = description.chars().count();
        if len < bounds.min || len > bounds.max {
            return Err(MetadataError::DescriptionLength {
                len,
                min: bounds.min,
                max: bounds.max,
            });
        }

        let category = fm
            .category
            .clone()
            .unwrap_or_else(|| "general".to_string());

        // Related skills: the frontmatter list plus any ../<slug>/SKILL.md
        // links in the body. Self-references are dropped.
        let mut related: BTreeSet<String> = fm.related_skills.iter().cloned().collect();
        for link in &doc.links {
            if let Some(other) = skill_link_slug(&link.target) {
                related.insert(other);
            }
        }
        related.remove(&slug);

        Ok(SkillRecord {
            path: doc.path.clone(),
            name,
            description,
            category,
            tags: fm.tags.iter().cloned().collect(),
            related_skills: related,
            slug,
        })
    }
}

/// Extract the sibling-skill slug from a `../<slug>/SKILL.md` target.
fn skill_link_slug(target: &str) -> Option<String> {
    let rest = target.strip_prefix("../")?;
    let (slug, file) = rest.split_once('/')?;
    if file.eq_ignore_ascii_case("SKILL.md") && !slug.is_empty() && !slug.contains('/') {
        Some(slug.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LinkRef;
    use crate::frontmatter::Frontmatter;
    use pretty_assertions::assert_eq;

    fn skill_doc(path: &str, name: &str, description: &str) -> Document {
        Document {
            path: path.to_string(),
            raw_text: String::new(),
            frontmatter: Some(Frontmatter {
                name: Some(name.to_string()),
                description: Some(description.to_string()),
                category: Some("security".to_string()),
                tags: vec!["api".to_string()],
                related_skills: vec!["authentication".to_string()],
                extra: Default::default(),
            }),
            headings: Vec::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn derive_slug_from_location() {
        assert_eq!(
            derive_slug("skills/security/api-security/SKILL.md"),
            Some("api-security".to_string())
        );
        assert_eq!(derive_slug("skills/security/api-security/README.md"), None);
    }

    #[test]
    fn builds_record_with_merged_related_skills() {
        let mut doc = skill_doc(
            "skills/api-security/SKILL.md",
            "api-security",
            "Hardening guidance for public APIs.",
        );
        doc.links.push(LinkRef {
            target: "../input-validation/SKILL.md".to_string(),
            anchor: None,
            line: 12,
        });
        // Self-links never count as dependencies.
        doc.links.push(LinkRef {
            target: "../api-security/SKILL.md".to_string(),
            anchor: None,
            line: 13,
        });

        let record = SkillRecord::from_document(&doc, &DescriptionBounds::default()).unwrap();
        assert_eq!(record.slug, "api-security");
        assert_eq!(record.category, "security");
        let related: Vec<&str> = record.related_skills.iter().map(String::as_str).collect();
        assert_eq!(related, vec!["authentication", "input-validation"]);
    }

    #[test]
    fn name_slug_mismatch_is_rejected() {
        let doc = skill_doc(
            "skills/api-security/SKILL.md",
            "api_security",
            "Hardening guidance for public APIs.",
        );
        assert!(matches!(
            SkillRecord::from_document(&doc, &DescriptionBounds::default()),
            Err(MetadataError::SlugMismatch { .. })
        ));
    }

    #[test]
    fn description_bounds_are_enforced() {
        let doc = skill_doc("skills/api-security/SKILL.md", "api-security", "short");
        assert!(matches!(
            SkillRecord::from_document(&doc, &DescriptionBounds::default()),
            Err(MetadataError::DescriptionLength { len: 5, .. })
        ));
    }
}
