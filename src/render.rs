//! Plain-text rendering of the results pane and the suggestion list.

use crate::search::{Marker, render};
use crate::service::SearchService;
use crate::session::{ResultView, SearchSession};
use crate::suggest::SuggestionEngine;
use std::fmt::Write as _;

/// Render one result as a text card.
///
/// ```text
/// Graph Neural Networks
///   https://example.org/gnn
///   We study [graphs].
///   #graph #neural networks
///   Year: 2020 | Citations: 310 | NeurIPS
/// ```
pub fn render_card(view: &ResultView<'_>, marker: Marker) -> String {
    let mut out = String::new();
    let result = view.result;

    let _ = writeln!(out, "{}", render(&view.title, marker));
    let _ = writeln!(out, "  {}", result.primary_link());

    if !result.summary.is_empty() {
        let _ = writeln!(out, "  {}", render(&view.summary, marker));
    }

    if !view.keywords.is_empty() {
        let tags: Vec<String> = view
            .keywords
            .iter()
            .map(|k| format!("#{}", render(k, marker)))
            .collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }

    let _ = write!(out, "  Year: {} | Citations: {}", result.year, result.citations);
    if !result.venue.is_empty() {
        let _ = write!(out, " | {}", result.venue);
    }
    out.push('\n');

    out
}

/// Render the status line followed by every displayed result.
pub fn render_results<S: SearchService>(session: &SearchSession<S>, marker: Marker) -> String {
    let mut out = String::new();

    for line in session.status_lines() {
        let _ = writeln!(out, "{}", line);
    }
    if let Some(error) = session.last_error() {
        let _ = writeln!(out, "({})", error);
    }

    for view in session.view() {
        out.push('\n');
        out.push_str(&render_card(&view, marker));
    }

    out
}

/// Render the suggestion list, marking the selected entry.
pub fn render_suggestions<S: SearchService>(engine: &SuggestionEngine<S>) -> String {
    let mut out = String::new();
    for (i, suggestion) in engine.suggestions().iter().enumerate() {
        let pointer = if engine.cursor() == Some(i) { '>' } else { ' ' };
        let _ = writeln!(out, "{} {}", pointer, suggestion);
    }
    out
}
