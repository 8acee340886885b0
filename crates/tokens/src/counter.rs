use crate::error::{Result, TokenError};
use corpus_protocol::AuditRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which counting strategy produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    Exact,
    Estimated,
}

/// Interchangeable token counting strategy.
pub trait TokenCount {
    fn count(&self, text: &str) -> usize;
    fn mode(&self) -> CountMode;
}

/// Deterministic fallback estimator: `ceil(chars / 4)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCounter;

impl TokenCount for HeuristicCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }

    fn mode(&self) -> CountMode {
        CountMode::Estimated
    }
}

/// Exact counting through a BPE tokenizer definition file.
pub struct BpeCounter {
    tokenizer: tokenizers::Tokenizer,
}

impl BpeCounter {
    pub fn from_file(path: &Path) -> Result<Self> {
        let tokenizer =
            tokenizers::Tokenizer::from_file(path).map_err(|e| TokenError::TokenizerLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { tokenizer })
    }
}

impl TokenCount for BpeCounter {
    fn count(&self, text: &str) -> usize {
        match self.tokenizer.encode(text, false) {
            Ok(encoding) => encoding.get_ids().len(),
            Err(e) => {
                // Plain text should always encode; degrade rather than abort.
                log::warn!("tokenizer failed to encode segment: {e}");
                HeuristicCounter.count(text)
            }
        }
    }

    fn mode(&self) -> CountMode {
        CountMode::Exact
    }
}

/// Pick the counting strategy the rules ask for: the configured tokenizer
/// file when it loads, the estimator otherwise.
#[must_use]
pub fn counter_for_rules(rules: &AuditRules) -> Box<dyn TokenCount> {
    match &rules.tokenizer_file {
        Some(path) => match BpeCounter::from_file(path) {
            Ok(counter) => Box::new(counter),
            Err(e) => {
                log::warn!("{e}; falling back to estimation");
                Box::new(HeuristicCounter)
            }
        },
        None => Box::new(HeuristicCounter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_rounds_up() {
        let counter = HeuristicCounter;
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("abc"), 1);
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcde"), 2);
        assert_eq!(counter.mode(), CountMode::Estimated);
    }

    #[test]
    fn heuristic_counts_chars_not_bytes() {
        // Four multibyte chars is still one token.
        assert_eq!(HeuristicCounter.count("éééé"), 1);
    }

    #[test]
    fn rules_without_tokenizer_use_estimator() {
        let counter = counter_for_rules(&AuditRules::default());
        assert_eq!(counter.mode(), CountMode::Estimated);
    }

    #[test]
    fn missing_tokenizer_file_degrades_to_estimator() {
        let rules = AuditRules {
            tokenizer_file: Some("/nonexistent/tokenizer.json".into()),
            ..AuditRules::default()
        };
        let counter = counter_for_rules(&rules);
        assert_eq!(counter.mode(), CountMode::Estimated);
    }
}
