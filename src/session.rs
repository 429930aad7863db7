//! Search submission, loading state, and the displayed result list.
//!
//! A [`SearchSession`] owns everything the results pane shows: the committed query,
//! the live result set, timing, and the active sort. Each submission gets a new
//! generation; only the reply for the latest generation is applied, so a slow answer
//! to an earlier query can never overwrite a newer one.

use crate::error::Result;
use crate::search::{SortCriterion, Token, highlight, sort_results};
use crate::service::SearchService;
use crate::types::{SearchResponse, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Completion posted back by a search task.
#[derive(Debug)]
pub struct SearchEvent {
    pub generation: u64,
    /// The query as submitted (the response may echo a normalized form).
    pub submitted: String,
    pub result: Result<SearchResponse>,
}

/// What the results pane should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing has been submitted yet.
    Pristine,
    Loading,
    NoResults,
    Results { count: usize, elapsed: Duration },
}

/// One result prepared for display: highlighted title, abstract and keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    pub result: &'a SearchResult,
    pub title: Vec<Token>,
    pub summary: Vec<Token>,
    pub keywords: Vec<Vec<Token>>,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a SearchResult, query: &str) -> Self {
        Self {
            result,
            title: highlight(&result.title, query),
            summary: highlight(&result.summary, query),
            keywords: result
                .keywords
                .iter()
                .map(|k| highlight(k.trim(), query))
                .collect(),
        }
    }
}

/// Results-pane state. Owned by one page; never shared.
pub struct SearchSession<S> {
    service: Arc<S>,

    committed_query: String,
    loading: bool,
    results: Vec<SearchResult>,
    elapsed: Option<Duration>,
    has_submitted: bool,
    last_error: Option<String>,
    sort: SortCriterion,

    generation: u64,
    started: Option<Instant>,

    events_tx: mpsc::UnboundedSender<SearchEvent>,
    events_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl<S: SearchService> std::fmt::Debug for SearchSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("committed_query", &self.committed_query)
            .field("loading", &self.loading)
            .field("results", &self.results.len())
            .field("elapsed", &self.elapsed)
            .field("sort", &self.sort)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<S: SearchService> SearchSession<S> {
    pub fn new(service: Arc<S>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            committed_query: String::new(),
            loading: false,
            results: Vec::new(),
            elapsed: None,
            has_submitted: false,
            last_error: None,
            sort: SortCriterion::default(),
            generation: 0,
            started: None,
            events_tx,
            events_rx,
        }
    }

    /// Start a search for `query`, superseding any search still in flight.
    pub fn submit(&mut self, query: impl Into<String>) {
        let query = query.into();

        self.has_submitted = true;
        self.loading = true;
        self.results.clear();
        self.last_error = None;
        self.generation += 1;
        self.started = Some(Instant::now());

        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();

        tracing::debug!("Searching for {:?} (generation {})", query, generation);
        tokio::spawn(async move {
            let result = service.search(&query).await;
            let _ = tx.send(SearchEvent {
                generation,
                submitted: query,
                result,
            });
        });
    }

    /// Apply a finished search. Replies for superseded submissions are ignored.
    pub fn apply(&mut self, event: SearchEvent) {
        if event.generation != self.generation {
            tracing::debug!(
                "Discarding stale results for {:?} (generation {}, current {})",
                event.submitted,
                event.generation,
                self.generation
            );
            return;
        }

        self.loading = false;
        let elapsed = self.started.take().map(|start| start.elapsed());
        self.elapsed = elapsed;

        match event.result {
            Ok(response) => {
                self.committed_query = if response.query.trim().is_empty() {
                    event.submitted
                } else {
                    response.query
                };
                self.results = response.results;
                tracing::info!(
                    "Search for {:?} returned {} result(s) in {:?}",
                    self.committed_query,
                    self.results.len(),
                    elapsed.unwrap_or_default()
                );
            }
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", event.submitted, e);
                self.committed_query = event.submitted;
                self.results = Vec::new();
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Wait for the next finished search.
    pub async fn next_event(&mut self) -> Option<SearchEvent> {
        self.events_rx.recv().await
    }

    /// Wait for one finished search and apply it.
    pub async fn pump(&mut self) {
        if let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// Pump until the latest submission has resolved.
    pub async fn settle(&mut self) {
        while self.loading {
            self.pump().await;
        }
    }

    /// Return to the freshly-constructed state. Replies still in flight become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.committed_query.clear();
        self.loading = false;
        self.results.clear();
        self.elapsed = None;
        self.has_submitted = false;
        self.last_error = None;
        self.started = None;
        self.sort = SortCriterion::default();
    }

    pub fn set_sort(&mut self, criterion: SortCriterion) {
        self.sort = criterion;
    }

    pub fn sort(&self) -> SortCriterion {
        self.sort
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_submitted(&self) -> bool {
        self.has_submitted
    }

    /// Results in service (relevance) order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Results in display order under the active sort.
    pub fn displayed(&self) -> Vec<&SearchResult> {
        sort_results(&self.results, self.sort)
    }

    /// Displayed results with query terms highlighted.
    pub fn view(&self) -> Vec<ResultView<'_>> {
        self.displayed()
            .into_iter()
            .map(|result| ResultView::new(result, &self.committed_query))
            .collect()
    }

    pub fn status(&self) -> SessionStatus {
        if !self.has_submitted {
            SessionStatus::Pristine
        } else if self.loading {
            SessionStatus::Loading
        } else if self.results.is_empty() {
            SessionStatus::NoResults
        } else {
            SessionStatus::Results {
                count: self.results.len(),
                elapsed: self.elapsed.unwrap_or_default(),
            }
        }
    }

    /// Summary lines for the results pane.
    ///
    /// The timing line appears once a search has finished in a nonzero number of
    /// milliseconds; an empty result set adds "No results found" below it.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.has_submitted || self.loading {
            return lines;
        }

        let millis = self.elapsed.unwrap_or_default().as_millis();
        if millis > 0 {
            lines.push(format!("Search completed in {}ms", millis));
        }
        if self.results.is_empty() {
            lines.push("No results found".to_string());
        }
        lines
    }
}
