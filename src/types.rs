//! Wire types for the search service.
//!
//! Deserialization is lenient on purpose: the service mixes numbers and strings for the
//! same field across documents and stores list fields as list-literal strings. Every
//! field has a fallback so a single odd document never fails a whole response.

use crate::fields::{NO_LINK, parse_number, parse_string_list, parse_url_list, valid_links};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single ranked document returned by the search service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "text_field")]
    pub doc_id: String,
    #[serde(default, deserialize_with = "text_field")]
    pub title: String,
    #[serde(rename = "abstract", default, deserialize_with = "text_field")]
    pub summary: String,
    #[serde(default, deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub venue: String,
    /// Raw year text; see [`SearchResult::parsed_year`].
    #[serde(default, deserialize_with = "text_field")]
    pub year: String,
    /// Raw citation count text; see [`SearchResult::parsed_citations`].
    #[serde(default, alias = "n_citation", deserialize_with = "text_field")]
    pub citations: String,
    #[serde(default, deserialize_with = "score_field")]
    pub score: f64,
    #[serde(rename = "url", default, deserialize_with = "url_list")]
    pub urls: Vec<String>,
}

impl SearchResult {
    /// Publication year, if the raw field holds a number.
    pub fn parsed_year(&self) -> Option<i64> {
        parse_number(&self.year)
    }

    /// Citation count, if the raw field holds a number.
    pub fn parsed_citations(&self) -> Option<i64> {
        parse_number(&self.citations)
    }

    /// URLs that look like real http(s) links.
    pub fn links(&self) -> Vec<&str> {
        valid_links(&self.urls)
    }

    /// First usable link, or `"#"` when there is none.
    pub fn primary_link(&self) -> &str {
        self.links().first().copied().unwrap_or(NO_LINK)
    }
}

/// Response body of `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    /// The query as the service understood it.
    ///
    /// Some deployments echo the preprocessed term list instead of the raw string;
    /// a list is joined with single spaces.
    #[serde(default, deserialize_with = "query_field")]
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Total matches before the service truncated the page, when reported.
    #[serde(default)]
    pub results_count: Option<usize>,
}

/// Response body of `GET /autocomplete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Flattens a scalar JSON value into its text form.
fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Object(mut map) => match map.remove("raw") {
            // Venue objects look like {"raw": "..."}
            Some(Value::String(raw)) => raw,
            _ => Value::Object(map).to_string(),
        },
        other => other.to_string(),
    }
}

fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn list_field<'de, D>(deserializer: D, parse: fn(&str) -> Vec<String>) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        Value::String(s) => parse(&s),
        other => vec![value_to_text(other)],
    })
}

fn keyword_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    list_field(deserializer, parse_string_list)
}

fn url_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    list_field(deserializer, parse_url_list)
}

fn score_field<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

fn query_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(terms) => terms
            .into_iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(" "),
        other => value_to_text(other),
    })
}
