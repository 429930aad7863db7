//! Client-side text processing for search results.
//!
//! This module provides plural stemming, query-term highlighting over result text,
//! and re-ranking of a result set by year or citation count.

// Module declarations
pub(crate) mod highlight;
pub(crate) mod sort;
pub(crate) mod stem;

// Public re-exports (used via lib.rs)
pub use highlight::{Marker, Token, highlight, render};
pub use sort::{SortCriterion, sort_results};
pub use stem::stem;
