//! The search page: one suggestion engine feeding one search session.
//!
//! User events go to the engine. Whenever the engine commits a query (Enter, a
//! clicked suggestion, the search button) the page forwards it to the session. The
//! page's event loop waits on both components' completion channels.

use crate::config::ClientConfig;
use crate::search::SortCriterion;
use crate::service::SearchService;
use crate::session::{SearchEvent, SearchSession};
use crate::suggest::{Key, SuggestEvent, SuggestionEngine};
use std::sync::Arc;

/// A completion from either half of the page.
#[derive(Debug)]
pub enum PageEvent {
    Suggest(SuggestEvent),
    Search(SearchEvent),
}

pub struct SearchPage<S> {
    engine: SuggestionEngine<S>,
    session: SearchSession<S>,
}

impl<S: SearchService> std::fmt::Debug for SearchPage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPage")
            .field("engine", &self.engine)
            .field("session", &self.session)
            .finish()
    }
}

impl<S: SearchService> SearchPage<S> {
    pub fn new(service: Arc<S>, config: &ClientConfig) -> Self {
        Self {
            engine: SuggestionEngine::new(Arc::clone(&service), config.debounce),
            session: SearchSession::new(service),
        }
    }

    /// The input text changed.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.engine.input(text);
    }

    pub fn key(&mut self, key: Key) {
        if let Some(query) = self.engine.key(key) {
            self.session.submit(query);
        }
    }

    /// The search button was pressed.
    pub fn submit(&mut self) {
        let query = self.engine.submit_current();
        self.session.submit(query);
    }

    pub fn click_suggestion(&mut self, index: usize) {
        if let Some(query) = self.engine.click_suggestion(index) {
            self.session.submit(query);
        }
    }

    pub fn click_outside(&mut self) {
        self.engine.click_outside();
    }

    pub fn focus(&mut self) {
        self.engine.focus();
    }

    pub fn blur(&mut self) {
        self.engine.blur();
    }

    pub fn set_sort(&mut self, criterion: SortCriterion) {
        self.session.set_sort(criterion);
    }

    /// Wait for the next completion from either component.
    pub async fn next_event(&mut self) -> Option<PageEvent> {
        tokio::select! {
            Some(event) = self.engine.next_event() => Some(PageEvent::Suggest(event)),
            Some(event) = self.session.next_event() => Some(PageEvent::Search(event)),
            else => None,
        }
    }

    /// Route a completion to the component that spawned it.
    pub fn apply(&mut self, event: PageEvent) {
        match event {
            PageEvent::Suggest(event) => self.engine.apply(event),
            PageEvent::Search(event) => self.session.apply(event),
        }
    }

    /// Wait for one completion and apply it.
    pub async fn pump(&mut self) {
        if let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// Pump until neither component has anything outstanding.
    pub async fn settle(&mut self) {
        while self.has_pending() {
            self.pump().await;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.engine.has_pending() || self.session.is_loading()
    }

    /// Clear the input, suggestions and results.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.session.reset();
    }

    pub fn suggestions(&self) -> &SuggestionEngine<S> {
        &self.engine
    }

    pub fn results(&self) -> &SearchSession<S> {
        &self.session
    }
}
