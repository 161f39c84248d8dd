//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use pagewalk::config::{Config, CrawlerConfig, HttpConfig};
use pagewalk::crawler::{crawl_website, crawl_with_config, Crawler, HttpFetcher};
use pagewalk::output::{write_report, OutputFormat};
use pagewalk::{ConfigError, PagewalkError, UrlError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            fetch_delay_ms: 0,
        },
        http: HttpConfig {
            timeout_secs: 5,
            ..HttpConfig::default()
        },
    }
}

/// Mounts an HTML page at `page_path`
async fn mount_html(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="/page2/">Page 2</a>
            <a href="https://external.example.org/">External</a>
            <a href="/logo.png">Logo</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &mock_server,
        "/page1",
        r#"<html><body><a href="/">Home</a><a href="page3">Page 3</a></body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/page2", "<html><body>No links</body></html>").await;
    mount_html(&mock_server, "/page3", "<html><body>Leaf</body></html>").await;

    let report = crawl_with_config(&base_url, &create_test_config(50))
        .await
        .expect("Crawl should start");

    assert_eq!(
        report.discovered,
        vec![
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            format!("{}/page3", base_url),
        ]
    );
    assert_eq!(report.visited.len(), 4);
    assert_eq!(report.stats.pages_visited, 4);
    assert_eq!(report.stats.links_out_of_scope, 1);
    assert_eq!(report.stats.links_excluded, 1);

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.iter().all(|r| r.url.path() != "/logo.png"));
}

#[tokio::test]
async fn test_seed_not_found_returns_seed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/missing/", mock_server.uri());
    let report = crawl_with_config(&seed, &create_test_config(50))
        .await
        .expect("Crawl should start");

    assert!(report.visited.is_empty());
    assert_eq!(report.stats.non_success_statuses, 1);
    assert_eq!(report.into_urls(), vec![seed]);
}

#[tokio::test]
async fn test_non_html_content_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/feed">Feed</a><a href="/data">Data</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/hidden">not followed</a>"#)
                .insert_header("content-type", "application/rss+xml"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"a": 1})))
        .mount(&mock_server)
        .await;

    let report = crawl_with_config(&base_url, &create_test_config(50))
        .await
        .expect("Crawl should start");

    assert_eq!(report.visited, vec![base_url.clone()]);
    assert_eq!(report.stats.non_html_skipped, 2);
    assert!(!report.discovered.iter().any(|u| u.ends_with("/hidden")));
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>late</p>")
                .insert_header("content-type", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/fast", "<p>fast</p>").await;

    let mut config = create_test_config(50);
    config.http.timeout_secs = 1;

    let report = crawl_with_config(&base_url, &config)
        .await
        .expect("Crawl should start");

    assert_eq!(report.stats.fetch_failures, 1);
    assert_eq!(
        report.visited,
        vec![base_url.clone(), format!("{}/fast", base_url)]
    );
    // A failed fetch is still a discovered link target
    assert_eq!(report.discovered.len(), 2);
}

#[tokio::test]
async fn test_configured_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "pagewalk-test/1.0"))
        .and(header("accept-language", "de"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/next">next</a>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(1);
    config.http.user_agent = "pagewalk-test/1.0".to_string();
    config.http.accept_language = "de".to_string();

    let report = crawl_with_config(&mock_server.uri(), &config)
        .await
        .expect("Crawl should start");

    assert_eq!(report.stats.pages_visited, 1);
    assert_eq!(report.discovered, vec![format!("{}/next", mock_server.uri())]);
}

#[tokio::test]
async fn test_page_budget_respected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    mount_html(&mock_server, "/", &links).await;
    for i in 1..=5 {
        mount_html(&mock_server, &format!("/p{}", i), "<p>leaf</p>").await;
    }

    let report = crawl_with_config(&base_url, &create_test_config(3))
        .await
        .expect("Crawl should start");

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.discovered.len(), 5);
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_redirect_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/home", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/home", r#"<a href="/docs">Docs</a>"#).await;

    let report = crawl_with_config(&base_url, &create_test_config(1))
        .await
        .expect("Crawl should start");

    assert_eq!(report.visited, vec![base_url.clone()]);
    assert_eq!(report.discovered, vec![format!("{}/docs", base_url)]);
}

#[tokio::test]
async fn test_crawl_website_entry_point() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", r#"<a href="/about.md">About</a>"#).await;
    mount_html(&mock_server, "/about", "<p>about</p>").await;

    let urls = crawl_website(&base_url, 1).await;
    assert_eq!(urls, vec![format!("{}/about", base_url)]);
}

#[tokio::test]
async fn test_crawler_with_custom_fetcher_and_json_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", r#"<a href="/a">a</a>"#).await;
    mount_html(&mock_server, "/a", "<p>a</p>").await;

    let fetcher = HttpFetcher::new(&HttpConfig::default()).expect("Client should build");
    let report = Crawler::new(
        fetcher,
        CrawlerConfig {
            max_pages: 10,
            fetch_delay_ms: 0,
        },
    )
    .run(&base_url)
    .await;

    let mut out = Vec::new();
    write_report(&report, OutputFormat::Json, &mut out).expect("Report should serialize");
    let value: serde_json::Value = serde_json::from_slice(&out).expect("Valid JSON");

    assert_eq!(value["seed"], base_url.as_str());
    assert_eq!(value["urls"][0], format!("{}/a", base_url).as_str());
    assert_eq!(value["stats"]["pages_visited"], 2);
}

#[tokio::test]
async fn test_unusable_seed_rejected_before_fetching() {
    let result = crawl_with_config("not a url", &create_test_config(50)).await;
    assert!(matches!(result, Err(PagewalkError::Url(UrlError::Parse(_)))));

    // The infallible entry point falls back to the seed instead
    let urls = crawl_website("not a url", 50).await;
    assert_eq!(urls, vec!["not a url".to_string()]);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let mock_server = MockServer::start().await;

    let result = crawl_with_config(&mock_server.uri(), &create_test_config(0)).await;
    assert!(matches!(
        result,
        Err(PagewalkError::Config(ConfigError::Validation(_)))
    ));

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
