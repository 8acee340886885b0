use crate::index::{tokenize, SkillIndex};
use serde::{Deserialize, Serialize};

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub slug: String,
    /// Number of distinct query tokens present in the record's token set.
    pub score: usize,
}

impl SkillIndex {
    /// Rank records against `query`.
    ///
    /// Score is the count of distinct query tokens present in a record's
    /// token set. Ties break by shorter description, then lexical slug, so
    /// the ranking is fully deterministic. Zero-score records are omitted.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, usize, &str)> = self
            .records()
            .filter_map(|record| {
                let tokens = self.token_set(&record.slug)?;
                let score = query_tokens.iter().filter(|t| tokens.contains(*t)).count();
                if score == 0 {
                    None
                } else {
                    Some((score, record.description.chars().count(), record.slug.as_str()))
                }
            })
            .collect();

        hits.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(b.2))
        });

        hits.into_iter()
            .map(|(score, _, slug)| SearchHit {
                slug: slug.to_string(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_protocol::SkillRecord;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn record(slug: &str, description: &str, tags: &[&str]) -> SkillRecord {
        SkillRecord {
            slug: slug.to_string(),
            path: format!("skills/{slug}/SKILL.md"),
            name: slug.to_string(),
            description: description.to_string(),
            category: "general".to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            related_skills: BTreeSet::new(),
        }
    }

    fn index() -> SkillIndex {
        SkillIndex::build(vec![
            record("api-security", "Secure API design and hardening", &["owasp"]),
            record("api-design", "REST API structure", &[]),
            record("unit-testing", "Test design for small units", &[]),
        ])
    }

    #[test]
    fn score_counts_distinct_query_tokens() {
        let hits = index().search("api security");
        assert_eq!(hits[0].slug, "api-security");
        assert_eq!(hits[0].score, 2);
        assert_eq!(hits[1].slug, "api-design");
        assert_eq!(hits[1].score, 1);
    }

    #[test]
    fn repeated_query_tokens_do_not_inflate_scores() {
        let hits = index().search("api api api");
        assert_eq!(hits[0].score, 1);
    }

    #[test]
    fn ties_break_by_description_length_then_slug() {
        let idx = SkillIndex::build(vec![
            record("zeta", "design notes", &[]),
            record("alpha", "design notes", &[]),
            record("mid", "longer design notes here", &[]),
        ]);
        let hits = idx.search("design");
        let slugs: Vec<&str> = hits.iter().map(|h| h.slug.as_str()).collect();
        // Equal scores: shorter description first, then lexical slug.
        assert_eq!(slugs, vec!["alpha", "zeta", "mid"]);
    }

    #[test]
    fn zero_score_records_are_omitted() {
        let hits = index().search("kubernetes");
        assert!(hits.is_empty());
    }

    #[test]
    fn tag_tokens_are_searchable() {
        let hits = index().search("owasp");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "api-security");
    }
}
