//! # Corpus Loader
//!
//! Loads a corpus directory into the immutable snapshot the audit
//! components consume.
//!
//! ## Pipeline
//!
//! ```text
//! Corpus root
//!     │
//!     ├──> Walker (.gitignore aware)
//!     │      ├─ *.md  -> Document parsing
//!     │      └─ other -> asset paths
//!     │
//!     └──> Document parsing
//!            ├─ frontmatter (YAML -> validated record)
//!            ├─ headings / links (code-fence aware, 1-based lines)
//!            ├─ unreadable file  -> parse failure (isolated)
//!            └─ SKILL.md         -> SkillRecord derivation
//! ```
//!
//! Every parse failure isolates that file only; the snapshot always covers
//! the rest of the corpus.

mod error;
mod extract;
mod loader;

pub use error::{LoaderError, Result};
pub use extract::{extract_headings, extract_links};
pub use loader::{collect_skills, CorpusLoader};
