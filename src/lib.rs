pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod ingest;
pub mod page;
pub mod render;
pub mod search;
pub mod service;
pub mod session;
pub mod suggest;
pub mod tracing;
pub mod types;

pub use config::ClientConfig;
pub use error::{FieldError, ServiceError, ValidationErrors};
pub use ingest::{DocumentDraft, NewDocument, Notification, NotificationKind, SubmitOutcome};
pub use page::{PageEvent, SearchPage};
pub use search::{Marker, SortCriterion, Token, highlight, sort_results, stem};
pub use service::{HttpSearchClient, IngestService, SearchService};
pub use session::{ResultView, SearchSession, SessionStatus};
pub use suggest::{Key, Phase, SuggestionEngine};
pub use types::{SearchResponse, SearchResult};
