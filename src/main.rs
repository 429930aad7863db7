use anyhow::Context;
use clap::Parser;
use paper_search::cli::{Cli, Commands};
use paper_search::render::{render_results, render_suggestions};
use paper_search::{
    ClientConfig, DocumentDraft, HttpSearchClient, Marker, SearchPage,
    SubmitOutcome, ingest,
};
use std::io::IsTerminal;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    paper_search::tracing::init(cli.verbose);

    let config = ClientConfig::new(&cli.base_url)?;
    let client = Arc::new(
        HttpSearchClient::new(&config).context("Failed to create search service client")?,
    );

    match cli.command {
        Commands::Search { query, sort, plain } => {
            let mut page = SearchPage::new(client, &config);
            page.set_sort(sort);
            page.type_text(query);
            page.submit();
            page.settle().await;

            let marker = if plain || !std::io::stdout().is_terminal() {
                Marker::PLAIN
            } else {
                Marker::ANSI
            };
            print!("{}", render_results(page.results(), marker));
        }
        Commands::Suggest { prefix } => {
            let mut page = SearchPage::new(client, &config);
            page.type_text(prefix);
            page.settle().await;
            print!("{}", render_suggestions(page.suggestions()));
        }
        Commands::Add {
            doc_id,
            title,
            summary,
            keywords,
            venue,
            year,
            citations,
            score,
            url,
        } => {
            let draft = DocumentDraft {
                doc_id,
                title,
                summary,
                keywords: DocumentDraft::keywords_from_csv(&keywords),
                venue,
                year,
                citations,
                score,
                url,
            };

            let outcome = ingest::submit_document(client.as_ref(), &draft).await;
            match &outcome {
                SubmitOutcome::Invalid(errors) => {
                    for error in errors.iter() {
                        eprintln!("{}", error);
                    }
                }
                SubmitOutcome::Notified(notification) => {
                    println!("{}: {}", notification.title, notification.description);
                }
            }
            if !outcome.is_success() {
                anyhow::bail!("Document was not added");
            }
        }
    }

    Ok(())
}
