//! Debounced typeahead suggestions with keyboard navigation.
//!
//! The engine is driven by discrete events. Input and key methods change state
//! directly; timer fires and autocomplete replies arrive as [`SuggestEvent`]s on the
//! engine's own channel and take effect only when the owner passes them to
//! [`SuggestionEngine::apply`]. Both kinds of event carry the generation that produced
//! them, and anything older than the latest generation is dropped.

use crate::error::Result;
use crate::service::SearchService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Keys the suggestion list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Where the engine currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending and nothing shown.
    Idle,
    /// Waiting for a pause in typing.
    Debouncing,
    /// An autocomplete request is outstanding.
    Fetching,
    /// Suggestions are visible, none selected.
    Showing,
    /// Suggestions are visible and one is selected.
    Navigating,
}

/// Completion posted back to the engine by its background tasks.
#[derive(Debug)]
pub enum SuggestEvent {
    /// The debounce timer armed as `generation` ran out.
    DebounceElapsed { generation: u64 },
    /// The autocomplete request tagged `token` finished.
    Fetched {
        token: u64,
        prefix: String,
        result: Result<Vec<String>>,
    },
}

/// Typeahead state for one search input.
pub struct SuggestionEngine<S> {
    service: Arc<S>,
    debounce: Duration,

    query: String,
    suggestions: Vec<String>,
    cursor: Option<usize>,
    visible: bool,
    /// Set on submission, cleared by the next keystroke. Suppresses fetching.
    has_searched: bool,

    timer: Option<JoinHandle<()>>,
    timer_generation: u64,
    fetch_token: u64,
    in_flight: Option<u64>,

    events_tx: mpsc::UnboundedSender<SuggestEvent>,
    events_rx: mpsc::UnboundedReceiver<SuggestEvent>,
}

impl<S: SearchService> std::fmt::Debug for SuggestionEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("query", &self.query)
            .field("suggestions", &self.suggestions)
            .field("cursor", &self.cursor)
            .field("visible", &self.visible)
            .field("has_searched", &self.has_searched)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl<S: SearchService> SuggestionEngine<S> {
    pub fn new(service: Arc<S>, debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            debounce,
            query: String::new(),
            suggestions: Vec::new(),
            cursor: None,
            visible: false,
            has_searched: false,
            timer: None,
            timer_generation: 0,
            fetch_token: 0,
            in_flight: None,
            events_tx,
            events_rx,
        }
    }

    /// Handle a change of the input text (one keystroke, paste, or clear).
    ///
    /// Text identical to the current query is not a change and is ignored.
    pub fn input(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.query {
            return;
        }
        self.query = text;
        self.has_searched = false;
        self.cancel_timer();

        if self.query.is_empty() {
            tracing::debug!("Query cleared, hiding suggestions");
            self.in_flight = None;
            self.clear_suggestions();
            return;
        }

        self.arm_timer();
    }

    /// Handle a key press in the search input.
    ///
    /// Returns the query to submit when the key commits one.
    pub fn key(&mut self, key: Key) -> Option<String> {
        if !self.visible {
            return match key {
                Key::Enter => Some(self.submit(self.query.clone())),
                Key::Escape => {
                    self.dismiss();
                    None
                }
                Key::ArrowDown | Key::ArrowUp => None,
            };
        }

        match key {
            Key::ArrowDown => {
                if let Some(last) = self.suggestions.len().checked_sub(1) {
                    self.cursor = Some(self.cursor.map_or(0, |i| (i + 1).min(last)));
                }
                None
            }
            Key::ArrowUp => {
                // Never steps back to "no selection" once something is selected
                if let Some(i) = self.cursor {
                    self.cursor = Some(i.saturating_sub(1));
                }
                None
            }
            Key::Escape => {
                self.dismiss();
                None
            }
            Key::Enter => {
                let chosen = self
                    .cursor
                    .and_then(|i| self.suggestions.get(i).cloned())
                    .unwrap_or_else(|| self.query.clone());
                Some(self.submit(chosen))
            }
        }
    }

    /// Submit the current input text (the search button / form submit).
    pub fn submit_current(&mut self) -> String {
        self.submit(self.query.clone())
    }

    /// Pointer selection of a suggestion. Same path as submitting it.
    pub fn click_suggestion(&mut self, index: usize) -> Option<String> {
        let chosen = self.suggestions.get(index).cloned()?;
        Some(self.submit(chosen))
    }

    /// A click outside the search region. Query and cursor are left alone.
    pub fn click_outside(&mut self) {
        self.dismiss();
    }

    /// The input lost focus.
    pub fn blur(&mut self) {
        self.dismiss();
    }

    /// The input gained focus; re-show whatever suggestions are still held.
    pub fn focus(&mut self) {
        if !self.suggestions.is_empty() {
            self.visible = true;
        }
    }

    /// Apply a completion from one of the engine's tasks.
    pub fn apply(&mut self, event: SuggestEvent) {
        match event {
            SuggestEvent::DebounceElapsed { generation } => {
                if generation != self.timer_generation || self.timer.is_none() {
                    tracing::trace!("Ignoring superseded debounce timer {}", generation);
                    return;
                }
                self.timer = None;

                if self.has_searched || self.query.is_empty() {
                    self.clear_suggestions();
                    return;
                }

                self.start_fetch();
            }
            SuggestEvent::Fetched {
                token,
                prefix,
                result,
            } => {
                if self.in_flight != Some(token) {
                    tracing::debug!("Discarding stale suggestions for {:?}", prefix);
                    return;
                }
                self.in_flight = None;

                let suggestions = result.unwrap_or_else(|e| {
                    tracing::warn!("Autocomplete for {:?} failed: {}", prefix, e);
                    Vec::new()
                });
                tracing::debug!("{} suggestion(s) for {:?}", suggestions.len(), prefix);
                self.suggestions = suggestions;
                self.cursor = None;
            }
        }
    }

    /// Wait for the next completion from the engine's tasks.
    pub async fn next_event(&mut self) -> Option<SuggestEvent> {
        self.events_rx.recv().await
    }

    /// Wait for one completion and apply it.
    pub async fn pump(&mut self) {
        if let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// Apply every completion that has already arrived, without waiting.
    pub fn apply_pending(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    /// Pump until no timer or request is outstanding.
    pub async fn settle(&mut self) {
        while self.has_pending() {
            self.pump().await;
        }
    }

    /// Whether a timer fire or a current autocomplete reply is still to come.
    pub fn has_pending(&self) -> bool {
        self.timer.is_some() || self.in_flight.is_some()
    }

    /// Return to the freshly-constructed state.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.in_flight = None;
        self.query.clear();
        self.clear_suggestions();
        self.has_searched = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Index of the highlighted suggestion; `None` means nothing is selected.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The list is open and waiting on an autocomplete reply.
    pub fn is_loading(&self) -> bool {
        self.visible && self.in_flight.is_some()
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn phase(&self) -> Phase {
        if self.timer.is_some() {
            Phase::Debouncing
        } else if self.in_flight.is_some() {
            Phase::Fetching
        } else if self.visible && !self.suggestions.is_empty() {
            if self.cursor.is_some() {
                Phase::Navigating
            } else {
                Phase::Showing
            }
        } else {
            Phase::Idle
        }
    }

    fn submit(&mut self, query: String) -> String {
        tracing::debug!("Submitting {:?}", query);
        self.cancel_timer();
        self.in_flight = None;
        self.query.clone_from(&query);
        self.has_searched = true;
        self.clear_suggestions();
        query
    }

    /// Hide the list and drop anything still pending. Query and cursor survive.
    fn dismiss(&mut self) {
        self.cancel_timer();
        self.in_flight = None;
        self.visible = false;
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.cursor = None;
        self.visible = false;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn arm_timer(&mut self) {
        self.timer_generation += 1;
        let generation = self.timer_generation;
        let delay = self.debounce;
        let tx = self.events_tx.clone();

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the engine was dropped
            let _ = tx.send(SuggestEvent::DebounceElapsed { generation });
        }));
    }

    fn start_fetch(&mut self) {
        self.fetch_token += 1;
        let token = self.fetch_token;
        self.in_flight = Some(token);
        self.cursor = None;
        self.visible = true;

        let prefix = self.query.clone();
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();

        tracing::debug!("Fetching suggestions for {:?} (token {})", prefix, token);
        tokio::spawn(async move {
            let result = service.autocomplete(&prefix).await;
            let _ = tx.send(SuggestEvent::Fetched {
                token,
                prefix,
                result,
            });
        });
    }
}

impl<S> Drop for SuggestionEngine<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
