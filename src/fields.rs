//! Tolerant parsing of loosely-encoded result fields.
//!
//! The search service stores list fields (keywords, URLs) as the string form of a
//! Python list, e.g. `"['graph theory', 'networks']"`, and numeric fields as text.
//! Nothing in here fails: anything that does not parse degrades to a defined fallback.

/// Placeholder values the service emits for absent links.
const NULL_LINKS: &[&str] = &["None", "undefined", "null"];

/// Link used when a result has no usable URL.
pub const NO_LINK: &str = "#";

/// Parses a list-literal string into its items.
///
/// Tries strict JSON first, then JSON with single quotes swapped for double quotes.
/// When neither parses, the raw string becomes the only element. An empty or
/// whitespace-only input yields an empty list.
pub fn parse_string_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return items;
    }

    if let Ok(items) = serde_json::from_str::<Vec<String>>(&trimmed.replace('\'', "\"")) {
        return items;
    }

    tracing::trace!("Field is not a list literal, keeping raw value: {:?}", raw);
    vec![raw.to_string()]
}

/// Parses a URL field, which is either a bracketed list literal or a bare URL.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        parse_string_list(trimmed)
    } else if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

/// Keeps only links that look like real http(s) URLs.
pub fn valid_links(links: &[String]) -> Vec<&str> {
    links
        .iter()
        .map(|link| link.trim())
        .filter(|link| !link.is_empty() && !NULL_LINKS.contains(link) && link.starts_with("http"))
        .collect()
}

/// Parses an integer-valued field.
///
/// Accepts plain integers and integral floats as the service sometimes renders years
/// as `"2019.0"`. Returns `None` for anything else, including non-finite floats.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}
