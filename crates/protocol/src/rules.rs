use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-level token budgets. `None` means unlimited for that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level1: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level2: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level3: Option<usize>,
}

impl Default for TokenLimits {
    fn default() -> Self {
        // Corpus policy: quick summary, bounded core, unbounded reference tier.
        Self {
            level1: Some(1000),
            level2: Some(5000),
            level3: None,
        }
    }
}

/// A hub document and the outbound links it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubRule {
    pub hub: String,
    pub must_link: Vec<String>,
}

/// Bounds on skill description length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for DescriptionBounds {
    fn default() -> Self {
        Self { min: 10, max: 1024 }
    }
}

/// Audit configuration, threaded explicitly into every component call so
/// repeated runs are reproducible. No ambient/global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditRules {
    /// Glob patterns; matching documents are never reported as orphans.
    pub excluded_orphan_paths: Vec<String>,

    /// Frontmatter category that marks a document as a "standard".
    #[serde(default = "default_standard_category")]
    pub standard_category: String,

    /// Hub path every standard must link to; `None` disables the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_hub: Option<String>,

    pub hub_rules: Vec<HubRule>,

    pub token_limits: TokenLimits,

    /// Product type -> recommended skill slugs.
    pub product_skill_map: BTreeMap<String, Vec<String>>,

    /// Orphan count above which an otherwise-soft run fails; `None`
    /// disables the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphan_threshold: Option<usize>,

    /// Budget-violation count above which an otherwise-soft run fails;
    /// `None` disables the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_fail_threshold: Option<usize>,

    /// Tokenizer definition file for exact counting; absent → estimator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenizer_file: Option<PathBuf>,

    pub description_bounds: DescriptionBounds,
}

fn default_standard_category() -> String {
    "standard".to_string()
}

impl Default for AuditRules {
    fn default() -> Self {
        Self {
            excluded_orphan_paths: Vec::new(),
            standard_category: default_standard_category(),
            standard_hub: None,
            hub_rules: Vec::new(),
            token_limits: TokenLimits::default(),
            product_skill_map: BTreeMap::new(),
            orphan_threshold: None,
            budget_fail_threshold: None,
            tokenizer_file: None,
            description_bounds: DescriptionBounds::default(),
        }
    }
}

impl AuditRules {
    /// Parse rules from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, RulesError> {
        Ok(toml::from_str(text)?)
    }

    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load rules from `<root>/audit-rules.toml` when present, defaults
    /// otherwise.
    pub fn load_or_default(root: &Path) -> Result<Self, RulesError> {
        let path = root.join("audit-rules.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
