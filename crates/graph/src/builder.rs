use crate::error::Result;
use crate::graph::{
    BrokenLink, EdgeKind, HubViolation, MissingCrossRef, RefGraph, ReferenceEdge,
};
use crate::resolve::resolve_target;
use corpus_protocol::{AuditRules, CorpusSnapshot, ParseFailure};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// All findings the reference-graph pass produces for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGraph {
    pub edges: Vec<ReferenceEdge>,
    pub orphan_paths: Vec<String>,
    pub broken_links: Vec<BrokenLink>,
    pub missing_cross_refs: Vec<MissingCrossRef>,
    pub hub_violations: Vec<HubViolation>,
    pub parse_errors: Vec<ParseFailure>,
}

impl ReferenceGraph {
    /// Total findings, counting every collection except the raw edge list.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.orphan_paths.len()
            + self.broken_links.len()
            + self.missing_cross_refs.len()
            + self.hub_violations.len()
            + self.parse_errors.len()
    }

    /// Hard findings gate pass/fail at the boundary.
    #[must_use]
    pub fn has_hard_findings(&self) -> bool {
        !self.broken_links.is_empty() || !self.parse_errors.is_empty()
    }
}

/// Build the reference graph and every graph-derived finding.
///
/// Requires the complete snapshot: orphan and hub findings are properties
/// of the whole corpus. Documents that failed to parse are carried through
/// as findings and take no part in the computation.
pub fn build_graph(snapshot: &CorpusSnapshot, rules: &AuditRules) -> Result<ReferenceGraph> {
    let exclusions = build_globset(&rules.excluded_orphan_paths)?;

    let mut graph = RefGraph::new();
    for doc in &snapshot.documents {
        graph.add_document(&doc.path);
    }

    let mut edges = Vec::new();
    let mut broken_links = Vec::new();
    // Resolved internal targets per document, for cross-ref and hub checks.
    let mut resolved_targets: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();

    for doc in &snapshot.documents {
        let targets = resolved_targets.entry(doc.path.as_str()).or_default();

        for link in &doc.links {
            match classify(&link.target, link.anchor.as_deref()) {
                EdgeKind::ExternalUrl => {
                    // URL liveness is out of scope; external edges are
                    // recorded as resolved.
                    edges.push(ReferenceEdge {
                        source: doc.path.clone(),
                        target: link.target.clone(),
                        kind: EdgeKind::ExternalUrl,
                        resolved: true,
                    });
                }
                EdgeKind::Anchor => {
                    edges.push(ReferenceEdge {
                        source: doc.path.clone(),
                        target: link.anchor.clone().unwrap_or_default(),
                        kind: EdgeKind::Anchor,
                        resolved: true,
                    });
                }
                EdgeKind::InternalFile => {
                    match resolve_target(&doc.path, &link.target, snapshot) {
                        Some(resolved) => {
                            graph.add_reference(&doc.path, &resolved);
                            targets.insert(resolved.clone());
                            edges.push(ReferenceEdge {
                                source: doc.path.clone(),
                                target: resolved,
                                kind: EdgeKind::InternalFile,
                                resolved: true,
                            });
                        }
                        None => {
                            broken_links.push(BrokenLink {
                                source: doc.path.clone(),
                                raw_target: link.target.clone(),
                                line: link.line,
                            });
                            edges.push(ReferenceEdge {
                                source: doc.path.clone(),
                                target: link.target.clone(),
                                kind: EdgeKind::InternalFile,
                                resolved: false,
                            });
                        }
                    }
                }
            }
        }
    }

    let orphan_paths = compute_orphans(snapshot, &graph, &exclusions);
    let missing_cross_refs = check_cross_refs(snapshot, rules, &resolved_targets);
    let hub_violations = enforce_hub_rules(snapshot, rules, &resolved_targets);

    broken_links.sort();
    let mut parse_errors = snapshot.parse_failures.clone();
    parse_errors.sort_by(|a, b| a.path.cmp(&b.path));

    log::info!(
        "reference graph: {} documents, {} internal references, {} findings",
        graph.node_count(),
        graph.edge_count(),
        orphan_paths.len() + broken_links.len()
    );

    Ok(ReferenceGraph {
        edges,
        orphan_paths,
        broken_links,
        missing_cross_refs,
        hub_violations,
        parse_errors,
    })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Classify a raw link target.
fn classify(target: &str, anchor: Option<&str>) -> EdgeKind {
    if target.contains("://") || target.starts_with("mailto:") {
        EdgeKind::ExternalUrl
    } else if target.is_empty() && anchor.is_some() {
        EdgeKind::Anchor
    } else {
        EdgeKind::InternalFile
    }
}

/// Documents nobody links to, minus the configured exclusions.
fn compute_orphans(snapshot: &CorpusSnapshot, graph: &RefGraph, exclusions: &GlobSet) -> Vec<String> {
    let mut orphans: Vec<String> = snapshot
        .documents
        .iter()
        .filter(|doc| graph.in_degree(&doc.path) == 0)
        .filter(|doc| !exclusions.is_match(&doc.path))
        .map(|doc| doc.path.clone())
        .collect();
    orphans.sort_unstable();
    orphans
}

/// Standards must link to the configured hub.
fn check_cross_refs(
    snapshot: &CorpusSnapshot,
    rules: &AuditRules,
    resolved_targets: &BTreeMap<&str, BTreeSet<String>>,
) -> Vec<MissingCrossRef> {
    let Some(hub) = rules.standard_hub.as_deref() else {
        return Vec::new();
    };

    let mut findings: Vec<MissingCrossRef> = snapshot
        .documents
        .iter()
        .filter(|doc| {
            doc.category()
                .is_some_and(|c| c.eq_ignore_ascii_case(&rules.standard_category))
        })
        .filter(|doc| doc.path != hub)
        .filter(|doc| {
            !resolved_targets
                .get(doc.path.as_str())
                .is_some_and(|targets| targets.contains(hub))
        })
        .map(|doc| MissingCrossRef {
            path: doc.path.clone(),
            hub: hub.to_string(),
        })
        .collect();
    findings.sort();
    findings
}

/// Each configured hub must link to every `must_link` target. A hub that is
/// not in the corpus cannot satisfy its rule, so every target is reported.
fn enforce_hub_rules(
    snapshot: &CorpusSnapshot,
    rules: &AuditRules,
    resolved_targets: &BTreeMap<&str, BTreeSet<String>>,
) -> Vec<HubViolation> {
    let mut violations = Vec::new();

    for rule in &rules.hub_rules {
        let hub_exists = snapshot.document(&rule.hub).is_some();
        if !hub_exists {
            log::warn!("hub document missing from corpus: {}", rule.hub);
        }
        let linked = resolved_targets.get(rule.hub.as_str());

        for target in &rule.must_link {
            let satisfied =
                hub_exists && linked.is_some_and(|targets| targets.contains(target));
            if !satisfied {
                violations.push(HubViolation {
                    hub: rule.hub.clone(),
                    missing_target: target.clone(),
                });
            }
        }
    }

    violations.sort();
    violations.dedup();
    violations
}
