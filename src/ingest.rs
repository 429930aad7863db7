//! Document submission: draft validation and the add-document flow.
//!
//! Validation runs before any request is built; an invalid draft never reaches the
//! service. The outcome of a valid submission is reduced to a user-facing
//! [`Notification`], mirroring how the page reports success or failure.

use crate::error::ValidationErrors;
use crate::service::IngestService;
use chrono::Datelike;
use reqwest::Url;
use serde::Serialize;

/// Earliest accepted publication year.
pub const MIN_YEAR: i32 = 1900;

/// Highest accepted relevance score.
pub const MAX_SCORE: f64 = 100.0;

/// A document as typed into the add-document form, not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDraft {
    pub doc_id: String,
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub venue: String,
    pub year: i32,
    pub citations: u64,
    pub score: f64,
    pub url: String,
}

impl DocumentDraft {
    /// Split a comma-separated keyword entry into trimmed keywords.
    pub fn keywords_from_csv(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect()
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self, current_year: i32) -> Result<NewDocument, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.push("title", "Title is required");
        }
        if self.summary.trim().is_empty() {
            errors.push("abstract", "Abstract is required");
        }
        if self.doc_id.trim().is_empty() {
            errors.push("doc_id", "Document ID is required");
        }
        if self.venue.trim().is_empty() {
            errors.push("venue", "Venue is required");
        }

        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect();
        if keywords.is_empty() {
            errors.push("keywords", "At least one keyword is required");
        }

        if !(MIN_YEAR..=current_year).contains(&self.year) {
            errors.push(
                "year",
                format!("Year must be between {} and {}", MIN_YEAR, current_year),
            );
        }

        if !(0.0..=MAX_SCORE).contains(&self.score) {
            errors.push("score", "Score must be between 0 and 100");
        }

        let url = self.url.trim();
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => errors.push("url", "Must be a valid URL"),
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewDocument {
            title: self.title.trim().to_string(),
            keywords,
            venue: Venue {
                raw: self.venue.trim().to_string(),
            },
            year: self.year,
            n_citation: self.citations,
            url: vec![url.to_string()],
            summary: self.summary.trim().to_string(),
            authors: Vec::new(),
            doc_type: DOC_TYPE_PAPER,
            references: Vec::new(),
        })
    }
}

const DOC_TYPE_PAPER: &str = "Paper";

/// Venue object in the ingest body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub raw: String,
}

/// A validated document in the exact shape `POST /add` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDocument {
    pub title: String,
    pub keywords: Vec<String>,
    pub venue: Venue,
    pub year: i32,
    pub n_citation: u64,
    pub url: Vec<String>,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub authors: Vec<String>,
    pub doc_type: &'static str,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Destructive,
}

/// User-visible result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn added() -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Document added successfully".to_string(),
            description: "The document has been added to the search engine.".to_string(),
        }
    }

    fn failed() -> Self {
        Self {
            kind: NotificationKind::Destructive,
            title: "Error".to_string(),
            description: "An error occurred while adding the document.".to_string(),
        }
    }
}

/// What happened to a submitted draft.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The request was sent; the notification says how it went.
    Notified(Notification),
}

impl SubmitOutcome {
    /// The document passed validation and the service accepted it.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Notified(Notification {
                kind: NotificationKind::Success,
                ..
            })
        )
    }
}

/// The current calendar year, used as the upper bound for `year`.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Validate `draft` and, if valid, send it to the ingest service.
///
/// Service failures are reported through the notification only; there is no retry.
pub async fn submit_document<S: IngestService>(service: &S, draft: &DocumentDraft) -> SubmitOutcome {
    let document = match draft.validate(current_year()) {
        Ok(document) => document,
        Err(errors) => {
            tracing::debug!("Document draft rejected: {}", errors);
            return SubmitOutcome::Invalid(errors);
        }
    };

    match service.add(&document).await {
        Ok(()) => {
            tracing::info!("Added document '{}'", document.title);
            SubmitOutcome::Notified(Notification::added())
        }
        Err(e) => {
            tracing::warn!("Failed to add document '{}': {}", document.title, e);
            SubmitOutcome::Notified(Notification::failed())
        }
    }
}
