//! Client-side result re-ranking.
//!
//! The service delivers results in relevance order. Sorting here produces a new view
//! over that list; the list itself is never reordered.

use crate::types::SearchResult;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a result set before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortCriterion {
    /// Service order, unchanged.
    #[default]
    Relevance,
    /// Newest first.
    Year,
    /// Most cited first.
    Citations,
}

impl SortCriterion {
    pub const ALL: [Self; 3] = [Self::Relevance, Self::Year, Self::Citations];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Year => "year",
            Self::Citations => "citations",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "year" => Ok(Self::Year),
            "citations" => Ok(Self::Citations),
            other => Err(format!(
                "Unknown sort criterion '{}' (expected relevance, year or citations)",
                other
            )),
        }
    }
}

/// Returns the results ordered by `criterion`.
///
/// Year and citation keys are parsed from the raw field text. A key that does not
/// parse is treated as lower than every real value, so such results sort last. The
/// sort is stable: equal keys keep their relevance order.
pub fn sort_results(results: &[SearchResult], criterion: SortCriterion) -> Vec<&SearchResult> {
    let mut view: Vec<&SearchResult> = results.iter().collect();

    let key: fn(&SearchResult) -> Option<i64> = match criterion {
        SortCriterion::Relevance => return view,
        SortCriterion::Year => SearchResult::parsed_year,
        SortCriterion::Citations => SearchResult::parsed_citations,
    };

    // Option orders None below Some, so reversing puts unparsable keys last
    view.sort_by_cached_key(|result| Reverse(key(result)));
    view
}
