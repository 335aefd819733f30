//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, extract, chunk and flush cycle end-to-end over real HTTP.

use chunk_crawler::config::Config;
use chunk_crawler::crawler::{
    ChunkRecord, Coordinator, FixedStrategy, HttpFetcher, RequestHeaders, UnicodeSentenceSplitter,
};
use chunk_crawler::state::{CrawlPhase, PageState};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog near the river bank. \
    Crawlers collect visible text from every page they visit on a site. \
    Each chunk stays within the configured word budget for retrieval.";

/// Creates a test configuration writing results into `dir`
fn create_test_config(dir: &TempDir, max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.min_delay_ms = 0;
    config.crawler.max_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.output.results_path = dir
        .path()
        .join("crawler_results.jsonl")
        .to_string_lossy()
        .into_owned();
    config
}

fn page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">more</a>"#, l))
        .collect();
    format!(
        r#"<html><head><title>{}</title></head><body>
        <header>Site header</header>
        <nav>Menu</nav>
        <main><p>{}</p>{}</main>
        <footer>Copyright</footer>
        <script>var tracking = true;</script>
        </body></html>"#,
        title, PARAGRAPH, anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn coordinator(config: &Config, seed: &Url) -> Coordinator<HttpFetcher, FixedStrategy> {
    let fetcher = HttpFetcher::new(&config.crawler).expect("Failed to build HTTP client");
    Coordinator::with_parts(
        config,
        seed,
        fetcher,
        FixedStrategy::immediate(),
        UnicodeSentenceSplitter,
    )
    .expect("Failed to create coordinator")
}

fn read_results(config: &Config) -> Vec<ChunkRecord> {
    std::fs::read_to_string(&config.output.results_path)
        .expect("Failed to read results file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", page("Home", &["/page1", "/page2"])).await;
    mount_page(&mock_server, "/page1", page("Page One", &["/", "/page2"])).await;
    mount_page(&mock_server, "/page2", page("Page Two", &["/page1"])).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&format!("{}/", base_url)).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    let phase = coordinator.run(std::future::pending()).await;
    assert_eq!(phase, CrawlPhase::Done);

    let report = coordinator.finish().expect("Failed to finish crawl");
    assert_eq!(report.stats.count(PageState::Processed), 3);
    assert_eq!(report.stats.pages_visited(), 3);

    let records = read_results(&config);
    assert_eq!(report.records_written, records.len());

    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Home - Part 1", "Page One - Part 1", "Page Two - Part 1"]
    );

    for record in &records {
        assert!(record.content.contains("quick brown fox"));
        assert!(!record.content.contains("Site header"));
        assert!(!record.content.contains("Menu"));
        assert!(!record.content.contains("Copyright"));
        assert!(!record.content.contains("tracking"));
    }
}

#[tokio::test]
async fn test_results_use_title_key() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", page("Keys", &[])).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    coordinator.run(std::future::pending()).await;
    coordinator.finish().expect("Failed to finish crawl");

    let contents =
        std::fs::read_to_string(&config.output.results_path).expect("Failed to read results");
    let line = contents.lines().next().expect("No lines written");
    let value: serde_json::Value = serde_json::from_str(line).expect("Invalid JSON");
    let object = value.as_object().expect("Line is not an object");

    assert_eq!(object.len(), 2);
    assert_eq!(object["title"], "Keys - Part 1");
    assert!(object["content"]
        .as_str()
        .expect("content is not a string")
        .starts_with("Keys"));
}

#[tokio::test]
async fn test_missing_pages_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", page("Home", &["/missing", "/ok"])).await;
    mount_page(&mock_server, "/ok", page("Ok", &["/missing"])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    coordinator.run(std::future::pending()).await;
    let report = coordinator.finish().expect("Failed to finish crawl");

    assert_eq!(report.phase, CrawlPhase::Done);
    assert_eq!(report.stats.count(PageState::FetchFailed), 1);
    assert_eq!(report.stats.count(PageState::Processed), 2);

    let labels: Vec<String> = read_results(&config).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["Home - Part 1", "Ok - Part 1"]);
}

#[tokio::test]
async fn test_cross_domain_links_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Elsewhere", &[])))
        .expect(0)
        .mount(&other_server)
        .await;

    let external = format!("{}/external", other_server.uri());
    mount_page(
        &mock_server,
        "/",
        page("Home", &[external.as_str(), "https://example.invalid/"]),
    )
    .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    coordinator.run(std::future::pending()).await;

    assert_eq!(coordinator.frontier().visited_count(), 1);
    assert_eq!(coordinator.stats().links_queued, 0);
}

#[tokio::test]
async fn test_request_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "ChunkCrawlerTest/1.0"))
        .and(header("accept", "text/html"))
        .and(header("accept-language", "en-GB"))
        .and(header("referer", "https://referrer.test/"))
        .and(header("dnt", "1"))
        .and(header("upgrade-insecure-requests", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Headers", &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let strategy = FixedStrategy::new(
        RequestHeaders {
            user_agent: "ChunkCrawlerTest/1.0".to_string(),
            accept: "text/html".to_string(),
            accept_language: "en-GB".to_string(),
            referer: "https://referrer.test/".to_string(),
        },
        Duration::ZERO,
    );
    let fetcher = HttpFetcher::new(&config.crawler).expect("Failed to build HTTP client");
    let mut coordinator =
        Coordinator::with_parts(&config, &seed, fetcher, strategy, UnicodeSentenceSplitter)
            .expect("Failed to create coordinator");

    coordinator.run(std::future::pending()).await;

    // The mock only answers when every header matched
    assert_eq!(coordinator.stats().count(PageState::Processed), 1);
}

#[tokio::test]
async fn test_page_budget_limits_requests() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", page("Home", &["/a", "/b", "/c"])).await;
    mount_page(&mock_server, "/a", page("A", &[])).await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("B", &[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 2);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    coordinator.run(std::future::pending()).await;
    let report = coordinator.finish().expect("Failed to finish crawl");

    assert_eq!(report.stats.pages_visited(), 2);
    let labels: Vec<String> = read_results(&config).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["Home - Part 1", "A - Part 1"]);
}

#[tokio::test]
async fn test_interrupt_during_slow_page_keeps_earlier_chunks() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", page("Home", &["/slow"])).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Slow", &[]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    let phase = coordinator
        .run(tokio::time::sleep(Duration::from_millis(1000)))
        .await;
    assert_eq!(phase, CrawlPhase::Interrupted);

    let report = coordinator.finish().expect("Failed to finish crawl");
    assert_eq!(report.phase, CrawlPhase::Interrupted);

    let labels: Vec<String> = read_results(&config).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["Home - Part 1"]);
}

#[tokio::test]
async fn test_nothing_extracted_leaves_no_file() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "<html><head><title>Tiny</title></head><body><p>Too short.</p></body></html>".to_string(),
    )
    .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&temp_dir, 10);
    let seed = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    let mut coordinator = coordinator(&config, &seed);
    coordinator.run(std::future::pending()).await;
    let report = coordinator.finish().expect("Failed to finish crawl");

    assert_eq!(report.stats.count(PageState::Empty), 1);
    assert_eq!(report.records_written, 0);
    assert!(!std::path::Path::new(&config.output.results_path).exists());
}
