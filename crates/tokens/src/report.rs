use crate::counter::{CountMode, TokenCount};
use crate::levels::split_levels;
use corpus_protocol::{CorpusSnapshot, TokenLimits};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A level whose counted tokens exceed its configured limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetViolation {
    /// Progressive-disclosure level (1-3).
    pub level: u8,
    pub limit: usize,
    pub actual: usize,
}

/// Per-document token budget report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    pub level1_tokens: usize,
    pub level2_tokens: usize,
    pub level3_tokens: usize,
    pub total_tokens: usize,
    pub mode: CountMode,
    pub violations: Vec<BudgetViolation>,
    /// Levels whose heading marker never occurs (structural, not budget).
    pub missing_levels: Vec<u8>,
}

impl TokenReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.missing_levels.is_empty()
    }
}

/// Count one document's text against the configured limits.
///
/// `total_tokens` is the sum of the three per-level counts, so
/// `level1 + level2 + level3 == total` holds under either counting mode.
#[must_use]
pub fn count_tokens(text: &str, limits: &TokenLimits, counter: &dyn TokenCount) -> TokenReport {
    if text.is_empty() {
        return TokenReport {
            level1_tokens: 0,
            level2_tokens: 0,
            level3_tokens: 0,
            total_tokens: 0,
            mode: counter.mode(),
            violations: Vec::new(),
            missing_levels: Vec::new(),
        };
    }

    let split = split_levels(text);
    let level1_tokens = counter.count(split.level1);
    let level2_tokens = split.level2.map_or(0, |s| counter.count(s));
    let level3_tokens = split.level3.map_or(0, |s| counter.count(s));

    let mut missing_levels = Vec::new();
    if split.level2.is_none() {
        missing_levels.push(2);
    }
    if split.level3.is_none() {
        missing_levels.push(3);
    }

    let mut violations = Vec::new();
    for (level, counted, limit) in [
        (1, level1_tokens, limits.level1),
        (2, level2_tokens, limits.level2),
        (3, level3_tokens, limits.level3),
    ] {
        if let Some(limit) = limit {
            if counted > limit {
                violations.push(BudgetViolation {
                    level,
                    limit,
                    actual: counted,
                });
            }
        }
    }

    TokenReport {
        level1_tokens,
        level2_tokens,
        level3_tokens,
        total_tokens: level1_tokens + level2_tokens + level3_tokens,
        mode: counter.mode(),
        violations,
        missing_levels,
    }
}

/// Sweep every document in the snapshot into a path-keyed report map.
#[must_use]
pub fn count_corpus(
    snapshot: &CorpusSnapshot,
    limits: &TokenLimits,
    counter: &dyn TokenCount,
) -> BTreeMap<String, TokenReport> {
    let reports: BTreeMap<String, TokenReport> = snapshot
        .documents
        .iter()
        .map(|doc| (doc.path.clone(), count_tokens(&doc.raw_text, limits, counter)))
        .collect();

    let flagged = reports.values().filter(|r| !r.is_clean()).count();
    log::debug!(
        "token sweep: {} documents, {} with findings",
        reports.len(),
        flagged
    );

    reports
}
