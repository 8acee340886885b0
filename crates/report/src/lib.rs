//! # Corpus Report
//!
//! Thin aggregation of the graph findings and token reports, plus the
//! pass/fail gate for CI. Presentation stays with the caller.

use corpus_graph::ReferenceGraph;
use corpus_protocol::AuditRules;
use corpus_tokens::TokenReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The merged audit output: both inputs unchanged plus the issue total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub graph: ReferenceGraph,
    pub token_reports: BTreeMap<String, TokenReport>,
    pub total_issues: usize,
}

impl AuditReport {
    /// Merge component outputs; `total_issues` is the sum of every
    /// finding-set size.
    #[must_use]
    pub fn new(graph: ReferenceGraph, token_reports: BTreeMap<String, TokenReport>) -> Self {
        let token_findings: usize = token_reports
            .values()
            .map(|r| r.violations.len() + r.missing_levels.len())
            .sum();
        let total_issues = graph.finding_count() + token_findings;
        Self {
            graph,
            token_reports,
            total_issues,
        }
    }

    /// Budget violations across the whole corpus.
    #[must_use]
    pub fn budget_violation_count(&self) -> usize {
        self.token_reports.values().map(|r| r.violations.len()).sum()
    }

    #[must_use]
    pub fn has_hard_findings(&self) -> bool {
        self.graph.has_hard_findings()
    }
}

/// Why an audit run fails the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    BrokenLinks { count: usize },
    ParseErrors { count: usize },
    OrphansOverThreshold { count: usize, threshold: usize },
    BudgetViolationsOverThreshold { count: usize, threshold: usize },
}

/// Gate outcome: hard findings always fail; soft findings fail only past
/// their configured thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditVerdict {
    pub passed: bool,
    pub reasons: Vec<FailReason>,
}

#[must_use]
pub fn evaluate(report: &AuditReport, rules: &AuditRules) -> AuditVerdict {
    let mut reasons = Vec::new();

    let broken = report.graph.broken_links.len();
    if broken > 0 {
        reasons.push(FailReason::BrokenLinks { count: broken });
    }
    let parse_errors = report.graph.parse_errors.len();
    if parse_errors > 0 {
        reasons.push(FailReason::ParseErrors {
            count: parse_errors,
        });
    }

    if let Some(threshold) = rules.orphan_threshold {
        let count = report.graph.orphan_paths.len();
        if count > threshold {
            reasons.push(FailReason::OrphansOverThreshold { count, threshold });
        }
    }
    if let Some(threshold) = rules.budget_fail_threshold {
        let count = report.budget_violation_count();
        if count > threshold {
            reasons.push(FailReason::BudgetViolationsOverThreshold { count, threshold });
        }
    }

    AuditVerdict {
        passed: reasons.is_empty(),
        reasons,
    }
}
