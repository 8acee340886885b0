//! # Corpus Graph
//!
//! Reference-graph analysis over a corpus snapshot.
//!
//! ## Pipeline
//!
//! ```text
//! CorpusSnapshot
//!     │
//!     ├──> Link classification (internal / anchor / external)
//!     │
//!     ├──> Target resolution (relative paths, implicit .md, dir -> README.md)
//!     │      └─ unresolved internal target = broken link
//!     │
//!     ├──> Reference graph (petgraph)
//!     │      ├─ Nodes: documents
//!     │      └─ Edges: resolved internal links
//!     │
//!     └──> Findings
//!            ├─ orphans (in-degree zero, exclusion-aware)
//!            ├─ missing cross-refs (standards without their hub link)
//!            └─ hub violations (hub missing required outbound links)
//! ```
//!
//! Orphan and hub findings are global properties: the builder needs the
//! complete document set, nothing here is streamable.

mod builder;
mod error;
mod graph;
mod resolve;

pub use builder::{build_graph, ReferenceGraph};
pub use error::{GraphError, Result};
pub use graph::{BrokenLink, EdgeKind, HubViolation, MissingCrossRef, RefGraph, ReferenceEdge};
pub use resolve::resolve_target;
