use thiserror::Error;

/// A dependency cycle (or a traversal deeper than the fixed cap, which is
/// indistinguishable from one in practice). Fails only the `resolve` call
/// that hit it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("dependency cycle: {}", cycle_path.join(" -> "))]
pub struct CycleError {
    /// The ordered path around the cycle, first slug repeated at the end.
    pub cycle_path: Vec<String>,
}
