//! Search session submission ordering and status reporting.

mod common;

use assert2::check;
use common::{FakeService, doc_ids, paper};
use paper_search::{SearchSession, SessionStatus};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn two_topic_service(quantum_delay: u64, graphene_delay: u64) -> Arc<FakeService> {
    paper_search::tracing::init(false);
    Arc::new(
        FakeService::new()
            .with_results(
                "quantum computing",
                vec![
                    paper("q1", "Quantum Supremacy", "2019", "3000"),
                    paper("q2", "Quantum Error Correction", "2016", "900"),
                ],
            )
            .with_results(
                "graphene",
                vec![paper("g1", "Electric Field Effect in Graphene", "2004", "50000")],
            )
            .with_delay("quantum computing", Duration::from_millis(quantum_delay))
            .with_delay("graphene", Duration::from_millis(graphene_delay)),
    )
}

/// Whatever order the replies come back in, only the last submission is shown.
#[rstest]
#[case::first_reply_slower(400, 50)]
#[case::first_reply_faster(50, 400)]
#[case::same_latency(100, 100)]
#[tokio::test(start_paused = true)]
async fn test_last_submission_wins(#[case] quantum_delay: u64, #[case] graphene_delay: u64) {
    let service = two_topic_service(quantum_delay, graphene_delay);
    let mut session = SearchSession::new(Arc::clone(&service));

    session.submit("quantum computing");
    session.submit("graphene");
    check!(session.is_loading());

    session.settle().await;
    check!(!session.is_loading());
    check!(session.committed_query() == "graphene");
    check!(doc_ids(&session.displayed()) == ["g1"]);

    // The superseded reply must not overwrite anything once it lands
    sleep(Duration::from_secs(1)).await;
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_millis(1), session.next_event()).await
    {
        session.apply(event);
    }

    check!(service.search_calls() == ["quantum computing", "graphene"]);
    check!(session.committed_query() == "graphene");
    check!(doc_ids(&session.displayed()) == ["g1"]);
}

#[tokio::test(start_paused = true)]
async fn test_resubmission_clears_previous_results_immediately() {
    let service = two_topic_service(10, 10);
    let mut session = SearchSession::new(Arc::clone(&service));

    session.submit("quantum computing");
    session.settle().await;
    check!(session.results().len() == 2);

    session.submit("graphene");
    check!(session.results().is_empty());
    check!(session.status() == SessionStatus::Loading);
    check!(session.status_lines().is_empty());

    session.settle().await;
    check!(session.results().len() == 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_clears_loading_and_reports() {
    paper_search::tracing::init(false);
    let service = Arc::new(FakeService::new().failing("broken"));
    let mut session = SearchSession::new(service);

    session.submit("broken");
    session.settle().await;

    check!(!session.is_loading());
    check!(session.status() == SessionStatus::NoResults);
    check!(session.status_lines() == ["No results found"]);
    check!(session.committed_query() == "broken");
    let error = session.last_error().unwrap_or_default();
    check!(error.contains("broken"));
}

#[tokio::test(start_paused = true)]
async fn test_status_line_reports_elapsed_time() {
    let service = two_topic_service(120, 0);
    let mut session = SearchSession::new(service);
    check!(session.status() == SessionStatus::Pristine);

    session.submit("quantum computing");
    session.settle().await;

    let SessionStatus::Results { count, elapsed } = session.status() else {
        panic!("expected results, got {:?}", session.status());
    };
    check!(count == 2);
    check!(elapsed >= Duration::from_millis(120));
    check!(session.status_lines() == [format!("Search completed in {}ms", elapsed.as_millis())]);
}

#[tokio::test(start_paused = true)]
async fn test_reset_makes_in_flight_reply_stale() {
    let service = two_topic_service(100, 0);
    let mut session = SearchSession::new(service);

    session.submit("quantum computing");
    session.reset();
    check!(session.status() == SessionStatus::Pristine);

    sleep(Duration::from_millis(200)).await;
    if let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_millis(1), session.next_event()).await
    {
        session.apply(event);
    }

    check!(session.results().is_empty());
    check!(session.committed_query().is_empty());
    check!(!session.has_submitted());
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_set_reports_time_and_no_results() {
    paper_search::tracing::init(false);
    let service = Arc::new(FakeService::new().with_delay("dark matter", Duration::from_millis(80)));
    let mut session = SearchSession::new(service);

    session.submit("dark matter");
    session.settle().await;

    let Some(elapsed) = session.elapsed() else {
        panic!("a finished search records its elapsed time");
    };
    check!(session.status() == SessionStatus::NoResults);
    check!(
        session.status_lines()
            == [
                format!("Search completed in {}ms", elapsed.as_millis()),
                "No results found".to_string(),
            ]
    );
}
