use crate::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::search::SortCriterion;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "paper-search")]
#[command(about = "Search research papers from the terminal", long_about = None)]
pub struct Cli {
    /// Search service base URL
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a search and print highlighted results
    Search {
        query: String,
        #[arg(short, long, default_value_t = SortCriterion::Relevance)]
        sort: SortCriterion,
        /// Never emit ANSI colour codes
        #[arg(long)]
        plain: bool,
    },
    /// Type a prefix and print the typeahead suggestions
    Suggest { prefix: String },
    /// Validate and submit a new document
    Add {
        #[arg(long)]
        doc_id: String,
        #[arg(long)]
        title: String,
        #[arg(long = "abstract")]
        summary: String,
        /// Comma-separated keywords
        #[arg(long)]
        keywords: String,
        #[arg(long)]
        venue: String,
        #[arg(long)]
        year: i32,
        #[arg(long, default_value_t = 0)]
        citations: u64,
        #[arg(long, default_value_t = 0.0)]
        score: f64,
        #[arg(long)]
        url: String,
    },
}
