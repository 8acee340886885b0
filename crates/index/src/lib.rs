//! # Corpus Index
//!
//! Searchable indices over skill metadata.
//!
//! ## Pipeline
//!
//! ```text
//! SkillRecord[]
//!     │
//!     └──> SkillIndex
//!            ├─ by_keyword: inverted index over name/description/tags
//!            ├─ by_category: case-insensitive category buckets
//!            └─ by_name: slug -> record
//!                 │
//!                 ├──> search(query)          ranked, fully deterministic
//!                 ├──> filter_by_category(c)  exact case-insensitive match
//!                 └──> recommend_for_product  product-matrix mapping
//! ```
//!
//! No stop-word filtering anywhere: ranking must be reproducible for tests,
//! so the token pipeline is lowercase + split on non-alphanumeric, nothing
//! else.

mod index;
mod recommend;
mod search;

pub use index::{tokenize, SkillIndex};
pub use recommend::{recommend_for_product, Recommendation};
pub use search::SearchHit;
