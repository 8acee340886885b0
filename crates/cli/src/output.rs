use corpus_index::{SearchHit, SkillIndex};
use corpus_protocol::MetadataIssue;
use corpus_report::{AuditReport, AuditVerdict, FailReason};
use corpus_resolver::DependencyPlan;
use corpus_tokens::TokenReport;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct AuditOutput {
    pub report: AuditReport,
    pub verdict: AuditVerdict,
    pub metadata_issues: Vec<MetadataIssue>,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub count: usize,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub plan: DependencyPlan,
    pub load_command: String,
}

pub fn print_audit(out: &AuditOutput) {
    let graph = &out.report.graph;

    println!("audit: {} total issues", out.report.total_issues);

    print_section("broken links", graph.broken_links.len());
    for link in &graph.broken_links {
        println!("  {}:{} -> {}", link.source, link.line, link.raw_target);
    }

    print_section("parse errors", graph.parse_errors.len());
    for failure in &graph.parse_errors {
        println!("  {}: {}", failure.path, failure.reason);
    }

    print_section("orphans", graph.orphan_paths.len());
    for path in &graph.orphan_paths {
        println!("  {path}");
    }

    print_section("missing cross-references", graph.missing_cross_refs.len());
    for missing in &graph.missing_cross_refs {
        println!("  {} lacks a link to {}", missing.path, missing.hub);
    }

    print_section("hub violations", graph.hub_violations.len());
    for violation in &graph.hub_violations {
        println!("  {} must link {}", violation.hub, violation.missing_target);
    }

    let flagged: Vec<(&String, &TokenReport)> = out
        .report
        .token_reports
        .iter()
        .filter(|(_, r)| !r.is_clean())
        .collect();
    print_section("token findings", flagged.len());
    for (path, report) in flagged {
        for violation in &report.violations {
            println!(
                "  {path}: level {} {} tokens (limit {})",
                violation.level, violation.actual, violation.limit
            );
        }
        if !report.missing_levels.is_empty() {
            let levels: Vec<String> = report
                .missing_levels
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("  {path}: missing level markers {}", levels.join(", "));
        }
    }

    print_section("metadata issues", out.metadata_issues.len());
    for issue in &out.metadata_issues {
        println!("  {}: {}", issue.path, issue.reason);
    }

    if out.verdict.passed {
        println!("\nresult: PASS");
    } else {
        println!("\nresult: FAIL");
        for reason in &out.verdict.reasons {
            println!("  {}", describe(reason));
        }
    }
}

fn describe(reason: &FailReason) -> String {
    match reason {
        FailReason::BrokenLinks { count } => format!("{count} broken links"),
        FailReason::ParseErrors { count } => format!("{count} unreadable documents"),
        FailReason::OrphansOverThreshold { count, threshold } => {
            format!("{count} orphans (threshold {threshold})")
        }
        FailReason::BudgetViolationsOverThreshold { count, threshold } => {
            format!("{count} budget violations (threshold {threshold})")
        }
    }
}

pub fn print_token_reports(reports: &BTreeMap<String, TokenReport>) {
    for (path, report) in reports {
        println!(
            "{path}: L1={} L2={} L3={} total={} ({:?})",
            report.level1_tokens,
            report.level2_tokens,
            report.level3_tokens,
            report.total_tokens,
            report.mode
        );
        for violation in &report.violations {
            println!(
                "  over budget: level {} {} tokens (limit {}, over by {})",
                violation.level,
                violation.actual,
                violation.limit,
                violation.actual - violation.limit
            );
        }
        for level in &report.missing_levels {
            println!("  missing level {level} marker");
        }
    }
}

pub fn print_search(out: &SearchOutput, index: &SkillIndex) {
    println!("search results for '{}': {} found", out.query, out.count);
    for hit in &out.hits {
        let description = index
            .get(&hit.slug)
            .map_or("", |record| record.description.as_str());
        println!("  {} (score {}) - {}", hit.slug, hit.score, description);
    }
}

pub fn print_plan(out: &ResolveOutput) {
    println!("load order:");
    for slug in &out.plan.slugs {
        println!("  {slug}");
    }
    for unknown in &out.plan.unknown {
        println!(
            "  warning: unknown slug {} (referenced by {})",
            unknown.slug, unknown.referenced_by
        );
    }
    println!("\n{}", out.load_command);
}

fn print_section(title: &str, count: usize) {
    if count > 0 {
        println!("\n{title}: {count}");
    }
}
