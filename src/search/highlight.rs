//! Query-term highlighting over result text.
//!
//! Text is split on single spaces and each token is compared to the stemmed query
//! terms. A token matches when its stem *contains* any query stem, so "searching"
//! matches "search" and "start" matches "art".

use super::stem::stem;
use ahash::AHashSet;

/// One whitespace-delimited piece of the highlighted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The original token text, untouched.
    pub text: String,
    /// Whether the token matched a query term.
    pub matched: bool,
}

/// Open/close strings wrapped around matched tokens when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub open: &'static str,
    pub close: &'static str,
}

impl Marker {
    /// Bracket markers for plain output.
    pub const PLAIN: Self = Self {
        open: "[",
        close: "]",
    };

    /// Bold yellow ANSI markers for terminals.
    pub const ANSI: Self = Self {
        open: "\x1b[1;33m",
        close: "\x1b[0m",
    };
}

/// Stems every whitespace-separated query term.
///
/// A term that stems to the empty string (a bare "s") is kept and matches every token.
pub(crate) fn query_stems(query: &str) -> AHashSet<String> {
    query.split_whitespace().map(stem).collect()
}

/// Marks the tokens of `text` that match any term of `query`.
///
/// An empty or whitespace-only query yields a token list with nothing matched.
pub fn highlight(text: &str, query: &str) -> Vec<Token> {
    let stems = query_stems(query);

    text.split(' ')
        .map(|word| {
            let word_stem = stem(word);
            let matched = stems.iter().any(|s| word_stem.contains(s.as_str()));
            Token {
                text: word.to_string(),
                matched,
            }
        })
        .collect()
}

/// Joins highlighted tokens back into a string, one space between tokens.
pub fn render(tokens: &[Token], marker: Marker) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if token.matched {
            out.push_str(marker.open);
            out.push_str(&token.text);
            out.push_str(marker.close);
        } else {
            out.push_str(&token.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn matched_words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.matched)
            .map(|t| t.text.as_str())
            .collect()
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_empty_query_marks_nothing(#[case] query: &str) {
        let tokens = highlight("searching for papers on graph networks", query);
        check!(tokens.iter().all(|t| !t.matched));
        check!(tokens.len() == 6);
    }

    #[test]
    fn test_containment_match() {
        let tokens = highlight("searching for papers", "search");
        check!(matched_words(&tokens) == vec!["searching"]);
    }

    #[rstest]
    #[case("searches and search", "search", &["searches", "search"])]
    #[case("Neural Networks for graphs", "neural network", &["Neural", "Networks"])]
    #[case("cities of the world", "city", &["cities"])]
    #[case("children playing", "child", &["children"])]
    fn test_stemmed_matches(#[case] text: &str, #[case] query: &str, #[case] expected: &[&str]) {
        let tokens = highlight(text, query);
        check!(matched_words(&tokens) == expected);
    }

    #[test]
    fn test_permissive_substring_quirk() {
        let tokens = highlight("start the engine", "art");
        check!(matched_words(&tokens) == vec!["start"]);
    }

    #[test]
    fn test_query_term_folding_to_empty_matches_everything() {
        let tokens = highlight("a quick test", "s");
        check!(matched_words(&tokens) == vec!["a", "quick", "test"]);
    }

    #[test]
    fn test_query_stems_keep_empty_stem() {
        let stems = query_stems("s graphs");
        check!(stems.contains(""));
        check!(stems.contains("graph"));
    }

    #[rstest]
    #[case("mentor", "men")]
    #[case("feet", "feet")]
    #[case("teething", "teeth")]
    fn test_unlisted_plurals_match_by_containment(#[case] text: &str, #[case] query: &str) {
        let tokens = highlight(text, query);
        check!(matched_words(&tokens) == vec![text]);
    }

    #[test]
    fn test_consecutive_spaces_preserved() {
        let tokens = highlight("deep  learning", "learning");
        check!(tokens.len() == 3);
        check!(tokens[1].text.is_empty());
        check!(render(&tokens, Marker::PLAIN) == "deep  [learning]");
    }

    #[test]
    fn test_render_round_trips_unmatched_text() {
        let text = "graph neural networks";
        let tokens = highlight(text, "transformer");
        check!(render(&tokens, Marker::PLAIN) == text);
    }

    #[test]
    fn test_render_ansi() {
        let tokens = highlight("quantum computing", "quantum");
        check!(render(&tokens, Marker::ANSI) == "\x1b[1;33mquantum\x1b[0m computing");
    }

    #[rstest]
    #[case("Москва 日本 🦀", "日本")]
    #[case("", "anything")]
    fn test_unicode_and_empty_text(#[case] text: &str, #[case] query: &str) {
        // Should not panic
        let _tokens = highlight(text, query);
    }
}
