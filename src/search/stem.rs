//! Lightweight plural stemming used for query-term matching.
//!
//! This is deliberately not a linguistic stemmer: it only folds the common English
//! plural forms so that "papers" and "paper" compare equal. The rules are applied in a
//! fixed order and the first one that matches wins, so some words come out odd
//! ("series" → "sery"). Matching is containment-based downstream, which absorbs most
//! of that.

/// Irregular plurals that no suffix rule can fold. Checked before any rule.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("mice", "mouse"),
    ("leaves", "leaf"),
];

/// Reduces a word to the root form used for matching.
///
/// Lower-cases the input, then:
/// 1. exact irregular-plural lookup
/// 2. `-ies` → `-y`
/// 3. `-es` → stripped
/// 4. `-s` → stripped
///
/// Anything else is returned unchanged (lower-cased).
pub fn stem(word: &str) -> String {
    let word = word.to_lowercase();

    if let Some((_, singular)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }

    if let Some(root) = word.strip_suffix("ies") {
        return format!("{root}y");
    }

    if let Some(root) = word.strip_suffix("es") {
        return root.to_string();
    }

    if let Some(root) = word.strip_suffix('s') {
        return root.to_string();
    }

    word
}
