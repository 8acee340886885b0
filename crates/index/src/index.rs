use corpus_protocol::SkillRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Lowercase and split on non-alphanumeric boundaries. Empty tokens drop
/// out; nothing else is filtered.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Searchable, filterable indices over a set of skill records.
///
/// Built once per run from the full record set; partial indices are not
/// supported (the resolver depends on complete slug coverage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillIndex {
    records: BTreeMap<String, SkillRecord>,
    by_keyword: BTreeMap<String, BTreeSet<String>>,
    by_category: BTreeMap<String, BTreeSet<String>>,
    token_sets: BTreeMap<String, BTreeSet<String>>,
}

impl SkillIndex {
    /// Build every index from the record set.
    #[must_use]
    pub fn build(records: Vec<SkillRecord>) -> Self {
        let mut index = SkillIndex::default();

        for record in records {
            let mut tokens = tokenize(&record.name);
            tokens.extend(tokenize(&record.description));
            for tag in &record.tags {
                tokens.extend(tokenize(tag));
            }

            for token in &tokens {
                index
                    .by_keyword
                    .entry(token.clone())
                    .or_default()
                    .insert(record.slug.clone());
            }
            index
                .by_category
                .entry(record.category.to_lowercase())
                .or_default()
                .insert(record.slug.clone());
            index.token_sets.insert(record.slug.clone(), tokens);
            index.records.insert(record.slug.clone(), record);
        }

        log::debug!(
            "skill index: {} records, {} keywords, {} categories",
            index.records.len(),
            index.by_keyword.len(),
            index.by_category.len()
        );
        index
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&SkillRecord> {
        self.records.get(slug)
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.records.contains_key(slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in slug order.
    pub fn records(&self) -> impl Iterator<Item = &SkillRecord> {
        self.records.values()
    }

    /// Slugs carrying `keyword` in their indexed text.
    #[must_use]
    pub fn keyword_slugs(&self, keyword: &str) -> Option<&BTreeSet<String>> {
        self.by_keyword.get(keyword)
    }

    /// Records in `category`, exact case-insensitive match, slug order.
    #[must_use]
    pub fn filter_by_category(&self, category: &str) -> Vec<&SkillRecord> {
        self.by_category
            .get(&category.to_lowercase())
            .map(|slugs| {
                slugs
                    .iter()
                    .filter_map(|slug| self.records.get(slug))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn token_set(&self, slug: &str) -> Option<&BTreeSet<String>> {
        self.token_sets.get(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(slug: &str, description: &str, category: &str, tags: &[&str]) -> SkillRecord {
        SkillRecord {
            slug: slug.to_string(),
            path: format!("skills/{slug}/SKILL.md"),
            name: slug.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            related_skills: BTreeSet::new(),
        }
    }

    #[test]
    fn tokenize_splits_on_non_alphanumeric() {
        let tokens = tokenize("API-Security: rate_limiting (v2)");
        let expected: BTreeSet<String> = ["api", "security", "rate", "limiting", "v2"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn keyword_index_covers_name_description_and_tags() {
        let index = SkillIndex::build(vec![record(
            "api-security",
            "Hardening guidance for public endpoints",
            "security",
            &["owasp"],
        )]);

        for token in ["api", "security", "hardening", "owasp"] {
            assert!(
                index.keyword_slugs(token).is_some(),
                "missing keyword {token}"
            );
        }
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let index = SkillIndex::build(vec![
            record("api-security", "Hardening for APIs everywhere", "Security", &[]),
            record("unit-testing", "Test design from first principles", "testing", &[]),
        ]);

        let hits = index.filter_by_category("SECURITY");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "api-security");
        assert!(index.filter_by_category("compliance").is_empty());
    }
}
