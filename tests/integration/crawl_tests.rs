//! Integration tests for the catalog crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full discovery cycle end-to-end over real HTTP.

use chapter_scout::config::{parse_config, Config};
use chapter_scout::crawler::{CatalogWalker, HttpFetcher, PageFetcher, SniffingDecoder};
use chapter_scout::{crawl, ScoutError};
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Configuration with no politeness delay
fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.page_delay_ms = 0;
    config.fetcher.timeout_secs = 5;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>目录</title></head><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

fn chapter_links(range: std::ops::Range<usize>) -> String {
    range
        .map(|i| format!(r#"<a href="{i}.html">第{i}章 标题</a>"#))
        .collect()
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(&body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_with_catalog_redirect_and_pagination() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // Landing page only shows the latest chapters
    mount_page(
        &server,
        "/book/1/",
        r#"<div class="nav"><a href="/">首页</a></div>
        <ul class="latest"><li><a href="30.html">第30章 最新</a></li></ul>
        <a href="/book/1/all/">查看更多章节</a>"#
            .to_string(),
        1,
    )
    .await;

    // Full catalog, page 1: no named container, one dense div
    mount_page(
        &server,
        "/book/1/all/",
        format!(
            r#"<div class="header"><a href="/">首页</a><a href="/login">登录</a></div>
            <div class="chapters">{}</div>
            <div class="pager"><a href="/book/1/all/">上一页</a><a href="2/">下一页</a></div>"#,
            chapter_links(0..25)
        ),
        1,
    )
    .await;

    // Page 2 repeats the last two chapters of page 1 by absolute path
    mount_page(
        &server,
        "/book/1/all/2/",
        format!(
            r#"<div id="list">
            <a href="/book/1/all/23.html">第23章 标题</a><a href="/book/1/all/24.html">第24章 标题</a>
            {}</div>
            <div class="pager"><a href="../">上一页</a><a href="../">下一页</a></div>"#,
            chapter_links(25..31)
        ),
        1,
    )
    .await;

    let outcome = crawl(&test_config(), &format!("{}/book/1/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.chapters.len(), 31);
    assert_eq!(
        outcome.report.catalog_url,
        Some(format!("{}/book/1/all/", base_url))
    );
    assert_eq!(outcome.report.pages_visited, 2);
    assert_eq!(outcome.report.pages_failed, 0);

    // Page 1 links resolve against page 1, page 2 links against page 2
    assert_eq!(outcome.chapters[0].title, "第0章 标题");
    assert_eq!(
        outcome.chapters[0].url,
        format!("{}/book/1/all/0.html", base_url)
    );
    assert_eq!(
        outcome.chapters[25].url,
        format!("{}/book/1/all/2/25.html", base_url)
    );

    let urls: HashSet<_> = outcome.chapters.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(urls.len(), outcome.chapters.len());
}

#[tokio::test]
async fn test_gbk_page_without_declared_charset() {
    let server = MockServer::start().await;

    let page = r#"<html><body><div id="list"><a href="1.html">第一章 风起</a><a href="2.html">第二章 云涌</a></div></body></html>"#;
    let (bytes, _, _) = encoding_rs::GBK.encode(page);

    Mock::given(method("GET"))
        .and(path("/gbk/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.into_owned(), "text/html"))
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(), &format!("{}/gbk/", server.uri()))
        .await
        .expect("Crawl failed");

    let titles: Vec<_> = outcome.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["第一章 风起", "第二章 云涌"]);
}

#[tokio::test]
async fn test_declared_charset_respected() {
    let server = MockServer::start().await;

    let page = r#"<html><body><a href="1.html">第1章 晨</a></body></html>"#;
    let (bytes, _, _) = encoding_rs::GBK.encode(page);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(bytes.into_owned(), "text/html; charset=gb2312"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config().fetcher).unwrap();
    let url = url::Url::parse(&format!("{}/", server.uri())).unwrap();
    let body = fetcher.fetch(&url).await.expect("Fetch failed");
    assert!(body.contains("第1章 晨"));
}

#[tokio::test]
async fn test_seed_failure_yields_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(), &format!("{}/missing/", server.uri()))
        .await
        .expect("Crawl should not fail on a dead seed");

    assert!(outcome.chapters.is_empty());
    assert_eq!(outcome.report.pages_failed, 1);
}

#[tokio::test]
async fn test_unreachable_host_yields_empty_result() {
    // Bind a server to get a free port, then shut it down
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let outcome = crawl(&test_config(), &format!("{}/book/", uri))
        .await
        .expect("Crawl should not fail on a connection error");
    assert!(outcome.chapters.is_empty());
}

#[tokio::test]
async fn test_non_text_response_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cover.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config().fetcher).unwrap();
    let url = url::Url::parse(&format!("{}/cover.png", server.uri())).unwrap();
    assert!(fetcher.fetch(&url).await.is_none());
}

/// Serves an endless chain of catalog pages: /p/N links to /p/N+1
struct EndlessPager;

impl Respond for EndlessPager {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let n: usize = request
            .url
            .path()
            .trim_start_matches("/p/")
            .parse()
            .unwrap_or(0);
        html(&format!(
            r#"<div id="list"><a href="/c/{n}.html">第{n}章</a></div><a href="/p/{}">下一页</a>"#,
            n + 1
        ))
    }
}

#[tokio::test]
async fn test_endless_pagination_stops_at_page_cap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(EndlessPager)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config().fetcher).unwrap();
    let walker = CatalogWalker::from_config(fetcher, &test_config()).unwrap();
    let start = url::Url::parse(&format!("{}/p/0", server.uri())).unwrap();

    let outcome = walker.walk(&start).await;

    assert_eq!(outcome.report.pages_visited, 50);
    assert!(outcome.report.hit_page_cap);
    assert_eq!(outcome.chapters.len(), 50);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 50);
}

#[tokio::test]
async fn test_custom_keyword_table_from_config() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/toc",
        r#"<nav><a href="/">Home</a></nav>
        <ol class="toc">
            <li><a href="/read/1">Chapter 1: Arrival</a></li>
            <li><a href="/read/2">Chapter 2: Departure</a></li>
            <li><a href="/about">Hi</a></li>
        </ol>
        <a href="/toc?page=2">Next &raquo;</a>"#
            .to_string(),
        2,
    )
    .await;

    let config = parse_config(
        r#"
[crawler]
page-delay-ms = 0

[container]
selectors = [".toc"]

[classifier]
chapter-patterns = ['^Chapter \d+']
min-fallback-chars = 10

[[keyword]]
text = "Home"
effect = "exclude"

[[keyword]]
text = "Next"
effect = "next-page"
"#,
    )
    .unwrap();

    // "?page=2" is served by the same mock; its chapters are duplicates and
    // its next link points back at itself, so the walk stops after two pages
    let outcome = crawl(&config, &format!("{}/toc", server.uri()))
        .await
        .expect("Crawl failed");

    let titles: Vec<_> = outcome.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Chapter 1: Arrival", "Chapter 2: Departure"]);
}

#[tokio::test]
async fn test_invalid_start_url_is_an_error() {
    let result = crawl(&test_config(), "novel.example/book/1").await;
    assert!(matches!(result, Err(ScoutError::InvalidUrl { .. })));
}

#[tokio::test]
async fn test_fetcher_with_replaced_decoder() {
    let server = MockServer::start().await;

    let page = r#"<html><body><a href="1.html">第1章 晨</a></body></html>"#;
    let (bytes, _, _) = encoding_rs::BIG5.encode(page);

    Mock::given(method("GET"))
        .and(path("/big5/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.into_owned(), "text/html"))
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/big5/", server.uri())).unwrap();

    let gbk_fetcher = HttpFetcher::new(&test_config().fetcher).unwrap();
    let body = gbk_fetcher.fetch(&url).await.expect("Fetch failed");
    assert!(!body.contains("第1章 晨"));

    let big5_fetcher = HttpFetcher::new(&test_config().fetcher)
        .unwrap()
        .with_decoder(SniffingDecoder::new(encoding_rs::BIG5));
    let body = big5_fetcher.fetch(&url).await.expect("Fetch failed");
    assert!(body.contains("第1章 晨"));
}
