use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yard_scout::config::MarkerConfig;
use yard_scout::query::{
    build_http_client, run_queries, Extractor, QueryOutcome, Source, YearExtractor, YearWindow,
    QUERIES_FAILED,
};
use yard_scout::QueryError;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Renders a yard listing table with one row per year
fn listing(years: &[&str]) -> String {
    let rows: String = years
        .iter()
        .enumerate()
        .map(|(i, year)| {
            format!(
                r#"<tr data-rowindex="{i}">
                    <td><span id="el{i}_yard_locations_Year"><span>{year}</span></span></td>
                    <td><span id="el{i}_yard_locations_Make">NISSAN</span></td>
                    <td><span id="el{i}_yard_locations_Model">MAXIMA</span></td>
                </tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><head><title>Yard Locations</title></head><body><table class="ewTable">{}</table></body></html>"#,
        rows
    )
}

fn year_extractor() -> Arc<dyn Extractor> {
    Arc::new(YearExtractor::new(
        MarkerConfig::default(),
        YearWindow::new(1984, 1988),
    ))
}

fn source(server: &MockServer, route: &str, label: &str) -> Arc<Source> {
    Arc::new(Source::new(
        format!("{}{}", server.uri(), route),
        label,
        year_extractor(),
    ))
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html"))
        .mount(server)
        .await;
}

async fn run(sources: &[Arc<Source>], timeout: Duration) -> QueryOutcome {
    let client = build_http_client("yard-scout-test/1.0", timeout).expect("Failed to build client");
    run_queries(&client, sources, timeout).await
}

#[tokio::test]
async fn test_all_sources_hit() {
    let server = MockServer::start().await;
    mount_page(&server, "/spokane", listing(&["1983", "1985", "1988", "1989"])).await;
    mount_page(&server, "/mead", listing(&["1987"])).await;

    let sources = vec![
        source(&server, "/spokane", "maxima"),
        source(&server, "/mead", "toyota"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
    assert_eq!(outcome.hits.len(), sources.len());
    assert!(outcome.is_complete());

    assert_eq!(outcome.hits[0].source().label(), "maxima");
    assert_eq!(outcome.hits[0].description(), "1985 1988");
    assert_eq!(outcome.hits[1].source().label(), "toyota");
    assert_eq!(outcome.hits[1].description(), "1987");
}

#[tokio::test]
async fn test_failed_fetch_does_not_block_others() {
    let server = MockServer::start().await;
    mount_page(&server, "/first", listing(&["1986"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/last", listing(&["1985"])).await;

    let sources = vec![
        source(&server, "/first", "maxima"),
        source(&server, "/broken", "toyota"),
        source(&server, "/last", "pickup"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert_eq!(outcome.hits.len(), 2);
    assert_eq!(outcome.hits[0].source().label(), "maxima");
    assert_eq!(outcome.hits[1].source().label(), "pickup");

    let error = outcome.error.as_ref().expect("expected aggregate error");
    assert_eq!(error.failures().len(), 1);
    assert_eq!(error.failures()[0].label, "toyota");
    assert!(matches!(
        error.failures()[0].error,
        QueryError::Status { status: 500, .. }
    ));
    assert!(error.to_string().ends_with(QUERIES_FAILED));
    assert!(outcome.is_degraded());
    assert!(!outcome.is_complete());
}

#[tokio::test]
async fn test_timeout_and_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing(&["1986"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/fast", listing(&["1987"])).await;

    let sources = vec![
        source(&server, "/slow", "maxima"),
        source(&server, "/fast", "toyota"),
    ];
    let outcome = run(&sources, Duration::from_millis(300)).await;

    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].source().label(), "toyota");
    assert_eq!(outcome.hits[0].description(), "1987");

    let error = outcome.error.as_ref().expect("expected aggregate error");
    assert!(error.failures()[0].error.is_timeout());

    let message = error.to_string();
    assert!(message.contains(QUERIES_FAILED));
    assert!(message.contains("timed out"), "message was: {}", message);
    assert!(message.contains("/slow"));
}

#[tokio::test]
async fn test_each_source_gets_fresh_timeout() {
    let server = MockServer::start().await;
    for route in ["/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing(&["1986"]))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;
    }

    // Together the three take longer than one budget; each alone fits.
    let sources = vec![
        source(&server, "/a", "a"),
        source(&server, "/b", "b"),
        source(&server, "/c", "c"),
    ];
    let outcome = run(&sources, Duration::from_millis(600)).await;

    assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
    assert_eq!(outcome.hits.len(), 3);
}

#[tokio::test]
async fn test_no_match_is_not_an_error() {
    let server = MockServer::start().await;
    mount_page(&server, "/old", listing(&["1979", "1984"])).await;
    mount_page(
        &server,
        "/empty",
        "<html><body><p>No records found</p></body></html>".to_string(),
    )
    .await;
    mount_page(&server, "/junk", listing(&["unknown"])).await;

    let sources = vec![
        source(&server, "/old", "maxima"),
        source(&server, "/empty", "toyota"),
        source(&server, "/junk", "pickup"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert!(outcome.error.is_none());
    assert!(outcome.hits.is_empty());
    assert!(!outcome.is_complete());
    assert!(!outcome.is_degraded());
}

#[tokio::test]
async fn test_empty_and_text_bodies_are_no_match() {
    let server = MockServer::start().await;
    mount_page(&server, "/blank", String::new()).await;
    Mock::given(method("GET"))
        .and(path("/text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Database is down for maintenance"))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", listing(&["1988"])).await;

    let sources = vec![
        source(&server, "/blank", "maxima"),
        source(&server, "/text", "toyota"),
        source(&server, "/ok", "pickup"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].source().label(), "pickup");
    assert_eq!(outcome.hits[0].description(), "1988");
}

#[tokio::test]
async fn test_content_mismatch_scoped_to_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            br#"{"years":[1986]}"#.to_vec(),
            "application/json",
        ))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", listing(&["1988"])).await;

    let sources = vec![
        source(&server, "/api", "maxima"),
        source(&server, "/ok", "toyota"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].description(), "1988");

    let error = outcome.error.as_ref().expect("expected aggregate error");
    assert_eq!(error.labels().collect::<Vec<_>>(), vec!["maxima"]);
    assert!(matches!(
        error.failures()[0].error,
        QueryError::ContentMismatch { ref content_type, .. } if content_type.starts_with("application/json")
    ));
    assert!(error.to_string().contains("Content-Type mismatch"));
}

#[tokio::test]
async fn test_unreachable_source() {
    let server = MockServer::start().await;
    mount_page(&server, "/ok", listing(&["1986"])).await;

    let sources = vec![
        Arc::new(Source::new("http://127.0.0.1:9/list", "gone", year_extractor())),
        source(&server, "/ok", "toyota"),
    ];
    let outcome = run(&sources, Duration::from_secs(2)).await;

    assert_eq!(outcome.hits.len(), 1);
    let error = outcome.error.expect("expected aggregate error");
    assert_eq!(error.labels().collect::<Vec<_>>(), vec!["gone"]);
    assert_eq!(error.failures()[0].url, "http://127.0.0.1:9/list");
}

#[tokio::test]
async fn test_every_failure_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let sources = vec![
        source(&server, "/missing", "maxima"),
        source(&server, "/limited", "toyota"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert!(outcome.hits.is_empty());
    let error = outcome.error.expect("expected aggregate error");
    assert_eq!(error.failures().len(), 2);

    let message = error.to_string();
    assert!(message.contains("HTTP status 404"));
    assert!(message.contains("HTTP status 429"));
    assert!(message.find("404").unwrap() < message.find("429").unwrap());
    assert!(message.ends_with(QUERIES_FAILED));
}

#[tokio::test]
async fn test_hits_never_exceed_sources() {
    let server = MockServer::start().await;
    mount_page(&server, "/many", listing(&["1985", "1986", "1987", "1988"])).await;

    let sources = vec![
        source(&server, "/many", "maxima"),
        source(&server, "/many", "maxima-again"),
    ];
    let outcome = run(&sources, TIMEOUT).await;

    assert!(outcome.hits.len() <= sources.len());
    assert_eq!(outcome.hits.len(), 2);
    assert_eq!(outcome.hits[0].finding().years(), &[1985, 1986, 1987, 1988]);
}
