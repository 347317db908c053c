use docfetch::config::{parse_config, FetcherConfig, UserAgentConfig};
use docfetch::event::{ChannelEventSink, CrawlerEvent, EventKind};
use docfetch::pipeline::{run_fetch, Collaborators, FetchOutcome, FetchStage, PipelineContext};
use docfetch::queue::MemoryCrawlQueue;
use docfetch::{CrawlReference, CrawlState, FetchClient, HttpFetchClient, HttpMethod};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use url::Url;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn fetcher() -> FetcherConfig {
    FetcherConfig {
        connect_timeout_ms: 1000,
        request_timeout_ms: 2000,
    }
}

struct Run {
    outcome: FetchOutcome,
    reference: CrawlReference,
    events: Vec<CrawlerEvent>,
    queued: Vec<CrawlReference>,
}

fn drain(rx: &mut UnboundedReceiver<CrawlerEvent>) -> Vec<CrawlerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Runs the fetch stage once against `url` with the real HTTP client
async fn fetch(url: &str) -> Run {
    let client = HttpFetchClient::new(&fetcher(), &user_agent()).expect("Failed to build client");
    let (tx, mut rx) = unbounded_channel();
    let queue = Arc::new(MemoryCrawlQueue::new());
    let collaborators = Collaborators::new(
        Arc::new(client),
        Arc::new(ChannelEventSink::new(tx)),
        queue.clone(),
    );

    let reference = CrawlReference::new(Url::parse(url).expect("Failed to parse URL"));
    let mut ctx = PipelineContext::new(reference, collaborators);
    let outcome = FetchStage::new().run(&mut ctx).await.expect("Fetch stage failed");

    Run {
        outcome,
        reference: ctx.into_reference(),
        events: drain(&mut rx),
        queued: queue.drain().expect("Failed to drain queue"),
    }
}

#[tokio::test]
async fn test_ok_page_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Hello</body></html>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let run = fetch(&format!("{}/page", mock_server.uri())).await;

    assert_eq!(run.outcome, FetchOutcome::Accepted);
    assert_eq!(run.reference.state, Some(CrawlState::New));
    assert_eq!(run.reference.content_type.as_deref(), Some("text/html"));
    assert_eq!(run.reference.content_encoding.as_deref(), Some("utf-8"));
    assert!(run.reference.crawl_date.is_some());

    assert_eq!(run.events.len(), 1);
    assert_eq!(run.events[0].kind, EventKind::DocumentFetched);
    assert_eq!(run.events[0].response.status_code, Some(200));
    assert!(run.queued.is_empty());
}

#[tokio::test]
async fn test_missing_page_is_rejected_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let run = fetch(&format!("{}/gone", mock_server.uri())).await;

    assert_eq!(run.outcome, FetchOutcome::Rejected(EventKind::RejectedNotFound));
    assert_eq!(run.reference.state, Some(CrawlState::NotFound));
    assert_eq!(run.events.len(), 1);
    assert_eq!(run.events[0].kind, EventKind::RejectedNotFound);
}

#[tokio::test]
async fn test_server_error_is_rejected_bad_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let run = fetch(&format!("{}/error", mock_server.uri())).await;

    assert_eq!(run.outcome, FetchOutcome::Rejected(EventKind::RejectedBadStatus));
    assert_eq!(run.reference.state, Some(CrawlState::BadStatus));
    assert_eq!(run.events.len(), 1);
    assert_eq!(run.events[0].kind, EventKind::RejectedBadStatus);
    assert_eq!(run.events[0].response.status_code, Some(500));
}

#[tokio::test]
async fn test_redirect_is_queued_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let run = fetch(&format!("{}/old", mock_server.uri())).await;
    let target = Url::parse(&format!("{}/new", mock_server.uri())).unwrap();

    assert_eq!(run.outcome, FetchOutcome::Redirected(target.clone()));
    assert!(run.reference.state.is_none());
    assert!(run.reference.crawl_date.is_some());
    assert!(run.events.is_empty());

    assert_eq!(run.queued.len(), 1);
    assert_eq!(run.queued[0].url(), &target);
    assert_eq!(run.queued[0].referrer.as_ref(), Some(run.reference.url()));
}

#[tokio::test]
async fn test_connection_refused_is_classified() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let run = fetch(&format!("http://127.0.0.1:{}/", port)).await;

    assert_eq!(run.outcome, FetchOutcome::Rejected(EventKind::RejectedBadStatus));
    assert_eq!(run.reference.state, Some(CrawlState::Error));
    assert!(run.reference.crawl_date.is_some());
    assert_eq!(run.events.len(), 1);
    assert!(run.events[0].response.status_code.is_none());
}

#[tokio::test]
async fn test_client_sends_user_agent_and_skips_body_on_head() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/doc"))
        .and(header_regex(
            "user-agent",
            r"^TestBot/1\.0\.0 \(\+https://example\.com/contact; test@example\.com\)$",
        ))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpFetchClient::new(&fetcher(), &user_agent()).unwrap();
    let doc = docfetch::Document::new(Url::parse(&format!("{}/doc", mock_server.uri())).unwrap());

    let response = client.fetch(&doc, HttpMethod::Head).await.unwrap();

    assert_eq!(response.crawl_state, CrawlState::New);
    assert_eq!(response.status_code, Some(200));
    assert_eq!(response.headers.get_first("content-type"), Some("application/pdf"));
    assert!(response.content.is_empty());
}

#[tokio::test]
async fn test_run_fetch_reports_every_reference_and_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/back"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/ok"))
        .mount(&mock_server)
        .await;

    let config = parse_config(
        r#"
[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[crawler]
max-concurrent-fetches = 2
"#,
    )
    .expect("Failed to parse config");

    let references = ["/ok", "/old", "/back"]
        .iter()
        .map(|p| CrawlReference::new(Url::parse(&format!("{}{}", mock_server.uri(), p)).unwrap()))
        .collect();

    let report = run_fetch(&config, references).await.expect("Run failed");

    assert_eq!(report.processed.len(), 3);
    assert_eq!(report.failures(), 0);
    assert!(matches!(report.processed[0].result, Ok(true)));
    assert_eq!(report.processed[0].reference.state, Some(CrawlState::New));
    assert!(matches!(report.processed[1].result, Ok(false)));
    assert!(report.processed[1].reference.state.is_none());

    // The redirect back to a start URL is dropped as already seen.
    assert_eq!(report.redirects.len(), 1);
    assert_eq!(report.redirects[0].url().path(), "/new");
}
