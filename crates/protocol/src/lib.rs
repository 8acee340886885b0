//! # Corpus Protocol
//!
//! Shared contract between the audit components: the immutable `Document`
//! snapshot every run works over, skill metadata, and the audit rules
//! configuration.
//!
//! ## Data flow
//!
//! ```text
//! Corpus root
//!     │
//!     ├──> Loader (corpus-loader)
//!     │      └─> CorpusSnapshot { Document[], assets, failures }
//!     │
//!     ├──> Reference Graph Builder ── consumes Document[]
//!     ├──> Token Counter ──────────── consumes Document text
//!     └──> Skill Index / Resolver ─── consume SkillRecord[]
//! ```
//!
//! Everything here is a plain value: components never share mutable state,
//! each run reconstructs its snapshot from scratch.

mod document;
mod error;
mod frontmatter;
mod rules;
mod skill;

pub use document::{CorpusSnapshot, Document, Heading, LinkRef, MetadataIssue, ParseFailure};
pub use error::{MetadataError, RulesError};
pub use frontmatter::Frontmatter;
pub use rules::{AuditRules, DescriptionBounds, HubRule, TokenLimits};
pub use skill::{derive_slug, SkillRecord, UnknownSlug};
