//! Shared test fixtures and utilities for integration tests.
//!
//! # Fakes
//!
//! - [`FakeService`]: in-process search service with per-query scripted results,
//!   suggestions, delays and failures. Records every call so tests can assert how many
//!   requests the pipeline actually issued.
//! - [`RecordingIngest`]: ingest service that keeps every submitted document.
//!
//! Delays use `tokio::time::sleep`, so tests running with `start_paused = true` are
//! fully deterministic: the runtime jumps the clock straight to the next timer.

#![allow(dead_code)] // Helpers used across different integration test crates

use paper_search::error::{Result, ServiceError};
use paper_search::{IngestService, NewDocument, SearchResponse, SearchResult, SearchService};
use rstest::fixture;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Debounce used by every test that builds an engine or page.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Default)]
pub struct FakeService {
    results: HashMap<String, Vec<SearchResult>>,
    suggestions: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    search_calls: Mutex<Vec<String>>,
    autocomplete_calls: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results.insert(query.to_string(), results);
        self
    }

    pub fn with_suggestions(mut self, prefix: &str, suggestions: &[&str]) -> Self {
        self.suggestions.insert(
            prefix.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Delay every request (search or autocomplete) for `key`.
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    /// Fail every request for `key`.
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn autocomplete_calls(&self) -> Vec<String> {
        self.autocomplete_calls.lock().unwrap().clone()
    }

    async fn delay_for(&self, key: &str) -> Result<()> {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(key) {
            return Err(ServiceError::other(format!("scripted failure for {:?}", key)));
        }
        Ok(())
    }
}

impl SearchService for FakeService {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.search_calls.lock().unwrap().push(query.to_string());
        self.delay_for(query).await?;

        let results = self.results.get(query).cloned().unwrap_or_default();
        Ok(SearchResponse {
            query: query.to_string(),
            results_count: Some(results.len()),
            results,
        })
    }

    async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>> {
        self.autocomplete_calls.lock().unwrap().push(prefix.to_string());
        self.delay_for(prefix).await?;
        Ok(self.suggestions.get(prefix).cloned().unwrap_or_default())
    }
}

/// Ingest service that records submissions and optionally rejects them.
#[derive(Default)]
pub struct RecordingIngest {
    pub reject: bool,
    added: Mutex<Vec<NewDocument>>,
}

impl RecordingIngest {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn added(&self) -> Vec<NewDocument> {
        self.added.lock().unwrap().clone()
    }
}

impl IngestService for RecordingIngest {
    async fn add(&self, document: &NewDocument) -> Result<()> {
        self.added.lock().unwrap().push(document.clone());
        if self.reject {
            Err(ServiceError::Status {
                endpoint: "/add",
                status: 503,
            })
        } else {
            Ok(())
        }
    }
}

/// Builds a result with the fields the pipeline looks at.
pub fn paper(doc_id: &str, title: &str, year: &str, citations: &str) -> SearchResult {
    SearchResult {
        doc_id: doc_id.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        citations: citations.to_string(),
        ..SearchResult::default()
    }
}

pub fn doc_ids(results: &[&SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.doc_id.clone()).collect()
}

/// Service scripted for the typical research-paper flow.
#[fixture]
pub fn research_service() -> Arc<FakeService> {
    paper_search::tracing::init(false);
    Arc::new(
        FakeService::new()
            .with_suggestions("neur", &["neural networks", "neuron", "neuroscience"])
            .with_suggestions("neural", &["neural networks"])
            .with_results(
                "neural networks",
                vec![
                    paper("gnn-2019", "Graph Neural Networks", "2019", "850"),
                    paper("cnn-2020", "Convolutional Networks Revisited", "2020", "120"),
                ],
            )
            .with_delay("neural networks", Duration::from_millis(40)),
    )
}
