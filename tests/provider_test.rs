//! Rate provider and feed tests.

mod common;

use std::io::Write;
use std::time::Duration;

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use ratescope::api::{FetchError, LocalProvider, RateProvider, RatesClient, RemoteProvider};
use ratescope::feed::{FeedState, RateFeed};
use ratescope::filter::FilterCriteria;

use common::{RATES_ERROR_JSON, RATES_JSON, fixture_page, rate};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_local_provider_reads_envelope_file() {
    let file = write_temp(RATES_JSON);
    let provider = LocalProvider::from_file(file.path()).expect("Failed to load rates file");

    let page = provider.preloaded().expect("local data is preloaded");
    assert_eq!(page, fixture_page());
    assert_eq!(provider.describe(), file.path().display().to_string());
}

#[test]
fn test_local_provider_reads_bare_array() {
    let rates = vec![rate("a", dec!(4.5), "Alpha"), rate("b", dec!(4.7), "Beta")];
    let file = write_temp(&serde_json::to_string(&rates).unwrap());

    let provider = LocalProvider::from_file(file.path()).expect("Failed to load rates file");
    let page = provider.preloaded().unwrap();
    assert_eq!(page.rates, rates);
    assert_eq!(page.total, Some(2));
}

#[test]
fn test_local_provider_rejects_failure_envelope() {
    let file = write_temp(RATES_ERROR_JSON);
    let err = LocalProvider::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Rates are temporarily unavailable"));
}

#[test]
fn test_local_provider_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LocalProvider::from_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ratescope::RatescopeError::Io(_)));
}

#[test]
fn test_local_fetch_ignores_criteria() {
    let provider = LocalProvider::new(vec![rate("a", dec!(4.5), "Alpha")]);
    let criteria =
        FilterCriteria::from_labels("Quebec", "Renewal", "Variable", "1 Year", "Credit Unions");

    let page = tokio_test::block_on(provider.fetch(&criteria)).unwrap();
    assert_eq!(page.rates.len(), 1);
}

#[test]
fn test_local_feed_starts_loaded_and_never_fetches() {
    let provider = LocalProvider::new(vec![rate("a", dec!(4.5), "Alpha")]);
    let mut feed = RateFeed::for_provider(&provider);

    assert!(feed.is_external());
    assert!(matches!(feed.state(), FeedState::Loaded(_)));
    assert_eq!(feed.retry(), None);
    assert_eq!(feed.begin(FilterCriteria::default()), None);
    assert_eq!(feed.rates().len(), 1);
}

#[tokio::test]
async fn test_remote_feed_reports_connectivity_failure() {
    // Bind then drop to get a loopback port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RatesClient::new(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("Failed to build client");
    let provider = RemoteProvider::new(client, false);
    assert!(provider.preloaded().is_none());

    let mut feed = RateFeed::for_provider(&provider);
    let ticket = feed.begin(FilterCriteria::default()).expect("remote feed fetches");
    assert!(feed.is_loading());

    let result = provider.fetch(&ticket.criteria).await;
    assert!(matches!(result, Err(FetchError::Network(_))));
    assert!(feed.complete(ticket.seq, result));

    let FeedState::Failed(err) = feed.state() else {
        panic!("expected failure, got {:?}", feed.state());
    };
    assert_eq!(
        err.user_message(),
        "Unable to connect to the rates service. Please check your internet connection."
    );
}

#[test]
fn test_late_response_is_discarded() {
    let mut feed = RateFeed::new();
    let first = feed.begin(FilterCriteria::default()).unwrap();
    let second = feed.retry().unwrap();

    // Newest response arrives first, then the stale one
    assert!(feed.complete(second.seq, Ok(fixture_page())));
    assert!(!feed.complete(first.seq, Err(FetchError::Server(500))));
    assert_eq!(feed.rates().len(), 5);
}
