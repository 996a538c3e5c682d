//! Resolvers: keyword extraction and the two camera matching strategies.
//!
//! Everything here is pure: no I/O, no shared state. The orchestrator in
//! `camsearch-runtime` sequences these with the geocoder.

pub mod keyword;
pub mod matcher;
pub mod types;

pub use keyword::{extract_keyword, KeywordPatterns};
pub use matcher::{match_direct, match_proximity};
pub use types::*;
