//! Contracts for the remote search and ingest services, plus the HTTP implementation.
//!
//! The pipeline only ever talks to [`SearchService`] and [`IngestService`]; tests swap
//! in in-process fakes.

use crate::config::ClientConfig;
use crate::error::{Result, ServiceError};
use crate::ingest::NewDocument;
use crate::types::{AutocompleteResponse, SearchResponse};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Remote ranked search and typeahead.
pub trait SearchService: Send + Sync + 'static {
    /// Run a ranked search for the committed query.
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResponse>> + Send;

    /// Completion candidates for a typed prefix.
    fn autocomplete(&self, prefix: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Remote document submission.
pub trait IngestService: Send + Sync + 'static {
    /// Submit a validated document. `Ok` means the service acknowledged it.
    fn add(&self, document: &NewDocument) -> impl Future<Output = Result<()>> + Send;
}

/// HTTP client for the search service endpoints.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    search_url: Url,
    autocomplete_url: Url,
    add_url: Url,
}

impl HttpSearchClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            search_url: config.endpoint("search")?,
            autocomplete_url: config.endpoint("autocomplete")?,
            add_url: config.endpoint("add")?,
        })
    }

    /// GET `url?q=<value>` and decode the JSON body.
    ///
    /// The query value is percent-encoded, so `&`, `#` and spaces reach the service
    /// intact.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &Url,
        q: &str,
    ) -> Result<T> {
        tracing::debug!("GET {} q={:?}", endpoint, q);

        let response = self
            .client
            .get(url.clone())
            .query(&[("q", q)])
            .send()
            .await
            .map_err(|source| ServiceError::Transport { endpoint, source })?;

        check_status(endpoint, response)?
            .json::<T>()
            .await
            .map_err(|source| ServiceError::Decode { endpoint, source })
    }
}

fn check_status(endpoint: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ServiceError::Status {
            endpoint,
            status: status.as_u16(),
        })
    }
}

impl SearchService for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.get_json("/search", &self.search_url, query).await
    }

    async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>> {
        let response: AutocompleteResponse = self
            .get_json("/autocomplete", &self.autocomplete_url, prefix)
            .await?;
        Ok(response.suggestions)
    }
}

impl IngestService for HttpSearchClient {
    async fn add(&self, document: &NewDocument) -> Result<()> {
        const ENDPOINT: &str = "/add";
        tracing::debug!("POST {} title={:?}", ENDPOINT, document.title);

        let response = self
            .client
            .post(self.add_url.clone())
            .json(document)
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        check_status(ENDPOINT, response)?;
        Ok(())
    }
}
