//! # Corpus Resolver
//!
//! Cycle-safe transitive resolution of skill dependencies.
//!
//! ## Pipeline
//!
//! ```text
//! start slugs ──> depth-first walk over related_skills
//!                    ├─ explicit work stack, no recursion
//!                    ├─ active-path tracking  ──> CycleError { cycle_path }
//!                    ├─ depth cap             ──> treated as a cycle
//!                    └─ post-order emission   ──> DependencyPlan
//!                                                 (dependencies first,
//!                                                  deduplicated,
//!                                                  start-order independent)
//! ```

mod error;
mod plan;

pub use error::CycleError;
pub use plan::{resolve, DependencyPlan, MAX_DEPTH};
