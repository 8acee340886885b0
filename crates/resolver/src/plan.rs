use crate::error::CycleError;
use corpus_index::SkillIndex;
use corpus_protocol::UnknownSlug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Traversal depth cap. Exceeding it is treated as a cycle: it bounds
/// worst-case memory deterministically regardless of how malformed the
/// dependency data is.
pub const MAX_DEPTH: usize = 256;

/// Ordered load plan: every dependency precedes its dependents, each slug
/// appears once. `unknown` carries dangling references as soft diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyPlan {
    pub slugs: Vec<String>,
    pub unknown: Vec<UnknownSlug>,
}

impl DependencyPlan {
    /// Render the plan as a loader directive.
    #[must_use]
    pub fn load_command(&self) -> String {
        format!("@load skills:[{}]", self.slugs.join(","))
    }
}

enum Frame<'a> {
    Enter { slug: &'a str, parent: Option<&'a str> },
    Exit { slug: &'a str },
}

/// Resolve the transitive `related_skills` closure of `start_slugs`.
///
/// Depth-first with an explicit frame stack; revisiting a slug that is
/// still on the active path is a dependency cycle and fails this call
/// only. Start slugs are sorted first, so the resulting plan does not
/// depend on the order the caller listed them in.
pub fn resolve(start_slugs: &[String], index: &SkillIndex) -> Result<DependencyPlan, CycleError> {
    let starts: BTreeSet<&str> = start_slugs.iter().map(String::as_str).collect();

    let mut plan: Vec<String> = Vec::new();
    let mut unknown: BTreeSet<UnknownSlug> = BTreeSet::new();
    let mut done: BTreeSet<&str> = BTreeSet::new();
    let mut active: Vec<&str> = Vec::new();

    for start in starts {
        let mut stack: Vec<Frame<'_>> = vec![Frame::Enter {
            slug: start,
            parent: None,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter { slug, parent } => {
                    if done.contains(slug) {
                        continue;
                    }
                    if let Some(pos) = active.iter().position(|s| *s == slug) {
                        let mut cycle_path: Vec<String> =
                            active[pos..].iter().map(|s| (*s).to_string()).collect();
                        cycle_path.push(slug.to_string());
                        return Err(CycleError { cycle_path });
                    }
                    if active.len() >= MAX_DEPTH {
                        log::warn!("dependency depth cap hit at {slug}; treating as a cycle");
                        let mut cycle_path: Vec<String> =
                            active.iter().map(|s| (*s).to_string()).collect();
                        cycle_path.push(slug.to_string());
                        return Err(CycleError { cycle_path });
                    }

                    let Some(record) = index.get(slug) else {
                        unknown.insert(UnknownSlug {
                            slug: slug.to_string(),
                            referenced_by: parent.unwrap_or(slug).to_string(),
                        });
                        continue;
                    };

                    active.push(slug);
                    stack.push(Frame::Exit { slug });
                    // LIFO stack: push in reverse so dependencies are
                    // visited in their sorted order.
                    for related in record.related_skills.iter().rev() {
                        stack.push(Frame::Enter {
                            slug: related.as_str(),
                            parent: Some(slug),
                        });
                    }
                }
                Frame::Exit { slug } => {
                    active.pop();
                    done.insert(slug);
                    plan.push(slug.to_string());
                }
            }
        }
    }

    Ok(DependencyPlan {
        slugs: plan,
        unknown: unknown.into_iter().collect(),
    })
}
