//! End-to-end crawl tests.
//!
//! The `wiremock` tests serve canned result pages to the real adapters and
//! the real HTTP fetcher. Tests against the live engines are marked with
//! `#[ignore]` because they require network access and may be slow or flaky.
//!
//! Run the live ones with: `cargo test --test integration -- --ignored`

use googly::engines::{EngineRegistry, Google, Startpage};
use googly::{Engine, EngineConfig, PageLimit, Search, SearchOptions, SearchResult, TimeRange};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn links(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.link.as_str()).collect()
}

fn google_at(server: &MockServer) -> Google {
    let config = EngineConfig {
        base_url: server.uri(),
        ..Google::new().config().clone()
    };
    Google::new().with_config(config)
}

fn startpage_at(server: &MockServer) -> Startpage {
    let config = EngineConfig {
        base_url: server.uri(),
        ..Startpage::new().config().clone()
    };
    Startpage::new().with_config(config)
}

fn google_page(links: &[&str], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><div id=\"search\">");
    for link in links {
        html.push_str(&format!(
            r#"<div class="g"><a href="{0}"><h3>Title {0}</h3></a><div class="VwiC3b">About {0}</div></div>"#,
            link
        ));
    }
    html.push_str("</div>");
    if let Some(href) = next {
        html.push_str(&format!(r#"<a id="pnnext" href="{}">Next</a>"#, href));
    }
    html.push_str("</body></html>");
    html
}

fn startpage_page(links: &[&str]) -> String {
    let mut html = String::from("<html><body><section class=\"w-gl\">");
    for link in links {
        html.push_str(&format!(
            r#"<div class="w-gl__result"><a class="w-gl__result-title" href="{0}"><h3>Title {0}</h3></a><p class="w-gl__description">About {0}</p></div>"#,
            link
        ));
    }
    html.push_str(r#"</section><form><button class="next" type="submit">Next</button></form></body></html>"#);
    html
}

async fn mount_google(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(google_page(
            &["https://g.test/3", "https://shared.test/"],
            Some("/search?q=rust+ownership&start=20"),
        )))
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust ownership"))
        .respond_with(ResponseTemplate::new(200).set_body_string(google_page(
            &["https://g.test/1", "https://g.test/2"],
            Some("/search?q=rust+ownership&start=10"),
        )))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_startpage(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/do/search"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(startpage_page(&["https://shared.test/", "https://sp.test/4"])),
        )
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/do/search"))
        .and(query_param("query", "rust ownership"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(startpage_page(&["https://sp.test/1", "https://sp.test/2"])),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_engines_follow_pagination_and_merge() {
    let google_server = MockServer::start().await;
    let startpage_server = MockServer::start().await;
    mount_google(&google_server).await;
    mount_startpage(&startpage_server).await;

    let registry = EngineRegistry::new()
        .with_engine(google_at(&google_server))
        .with_engine(startpage_at(&startpage_server));
    let search = Search::new().unwrap().with_registry(registry);
    let options = SearchOptions::new().with_pages(PageLimit::Limited(2));

    let results = search
        .search("rust ownership", &options, &names(&["google", "startpage"]))
        .await
        .unwrap();

    assert!(results.failures().is_empty());
    assert_eq!(results.pages_fetched, 4);
    assert_eq!(
        links(results.items()),
        vec![
            "https://g.test/1",
            "https://sp.test/1",
            "https://g.test/2",
            "https://sp.test/2",
            "https://g.test/3",
            "https://shared.test/",
            "https://sp.test/4",
        ]
    );
    assert_eq!(results.items()[0].title, "Title https://g.test/1");
    assert_eq!(results.items()[0].description, "About https://g.test/1");
}

#[tokio::test]
async fn test_failing_engine_does_not_affect_the_other() {
    let google_server = MockServer::start().await;
    let startpage_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&google_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/do/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(startpage_page(&["https://sp.test/1"])))
        .expect(1)
        .mount(&startpage_server)
        .await;

    let registry = EngineRegistry::new()
        .with_engine(google_at(&google_server))
        .with_engine(startpage_at(&startpage_server));
    let search = Search::new().unwrap().with_registry(registry);
    let options = SearchOptions::new()
        .with_pages(PageLimit::Limited(1))
        .with_user_agent("TestBot/1.0");

    let results = search
        .search("rust", &options, &names(&["g", "sp"]))
        .await
        .unwrap();

    assert_eq!(links(results.items()), vec!["https://sp.test/1"]);
    assert_eq!(results.failures().len(), 1);
    assert_eq!(results.failures()[0].engine, "Google");
    assert_eq!(results.failures()[0].status, Some(429));
}

#[tokio::test]
async fn test_date_bounds_reach_the_engine() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("tbs", "cdr:1,cd_min:01/02/2020"))
        .and(query_param("hl", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_string(google_page(&["https://g.test/1"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let registry = EngineRegistry::new().with_engine(google_at(&server));
    let search = Search::new().unwrap().with_registry(registry);
    let options = SearchOptions::new()
        .with_lang("fr")
        .with_time_range(TimeRange::Week)
        .with_from(chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());

    let results = search.search("rust", &options, &names(&["google"])).await.unwrap();
    assert_eq!(results.count, 1);
}

mod live {
    use super::*;

    async fn live_search(engine: &str) -> Vec<SearchResult> {
        let search = Search::new().unwrap();
        let options = SearchOptions::new().with_pages(PageLimit::Limited(1));
        match search.search("rust programming", &options, &names(&[engine])).await {
            Ok(results) => {
                println!("Engine '{}' returned {} results", engine, results.count);
                for (i, result) in results.items().iter().take(3).enumerate() {
                    println!("  {}. {} - {}", i + 1, result.title, result.link);
                }
                for failure in results.failures() {
                    println!("Engine '{}' failed: {}", failure.engine, failure.message);
                }
                results.into_items()
            }
            Err(e) => {
                println!("Search failed: {}", e);
                vec![]
            }
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_google_live() {
        let results = live_search("google").await;
        println!("Google returned {} results", results.len());
    }

    #[tokio::test]
    #[ignore]
    async fn test_duckduckgo_live() {
        let results = live_search("ddg").await;
        assert!(!results.is_empty(), "DuckDuckGo should return results");
        assert!(results.iter().all(|r| !r.link.contains("duckduckgo.com/l/")));
    }

    #[tokio::test]
    #[ignore]
    async fn test_startpage_live() {
        let results = live_search("startpage").await;
        println!("Startpage returned {} results", results.len());
    }

    #[tokio::test]
    #[ignore]
    async fn test_ecosia_live() {
        let results = live_search("ecosia").await;
        println!("Ecosia returned {} results", results.len());
    }

    #[tokio::test]
    #[ignore]
    async fn test_yahoo_live() {
        let results = live_search("yahoo").await;
        println!("Yahoo returned {} results", results.len());
    }

    #[tokio::test]
    #[ignore]
    async fn test_naver_live() {
        let results = live_search("naver").await;
        println!("Naver returned {} results", results.len());
    }
}
