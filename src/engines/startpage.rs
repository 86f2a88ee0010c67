//! Startpage search engine adapter.
//!
//! Startpage's next-page control is a form button, so the next URL is built
//! by setting the `page` index on the current request.

use scraper::ElementRef;
use url::Url;

use crate::document::{child_attr, child_text};
use crate::engine::{build_search_url, set_query_param, QueryParams};
use crate::{
    BrowserConfig, Engine, EngineConfig, Result, SearchOptions, SearchResult, TimeRange,
};

/// Stored preference blob that disables family filter and result previews.
const PREFERENCES: &str = "36c84513558a2d34bf0d89ea505333ad761002405484af2476571afac1710d79d80647dbf3b0d6646044dd543d05df3a";

/// Startpage search engine.
pub struct Startpage {
    config: EngineConfig,
}

impl Startpage {
    /// Creates a new Startpage engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "Startpage".to_string(),
                shortcut: "sp".to_string(),
                base_url: "https://www.startpage.com".to_string(),
                lang_param: "language".to_string(),
                browsers: BrowserConfig::desktop_and_mobile(),
            },
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Startpage {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Startpage {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url> {
        build_search_url(self, "do/search", "query", query, &[("prfe", PREFERENCES)], options)
    }

    fn time_range_params(&self, range: TimeRange) -> QueryParams {
        let value = match range {
            TimeRange::Any => return Vec::new(),
            TimeRange::Hour => "h",
            TimeRange::Day => "d",
            TimeRange::Week => "w",
            TimeRange::Month => "m",
            TimeRange::Year => "y",
        };
        vec![("with_date", value.to_string())]
    }

    fn result_selector(&self) -> &str {
        ".w-gl__result"
    }

    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult {
        SearchResult {
            title: child_text(item, ".w-gl__result-title h3"),
            link: child_attr(item, "a.w-gl__result-title", "href"),
            description: child_text(item, ".w-gl__description"),
        }
    }

    fn pagination_selector(&self) -> &str {
        "button.next"
    }

    fn pagination_url(
        &self,
        page: u32,
        _options: &SearchOptions,
        _control: ElementRef<'_>,
        current: &Url,
    ) -> Result<Url> {
        let mut next = current.clone();
        set_query_param(&mut next, "page", &page.to_string());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::selector;
    use scraper::Html;

    const RESULTS_HTML: &str = r#"
        <section class="w-gl">
            <div class="w-gl__result">
                <a class="w-gl__result-title" href="https://blog.rust-lang.org/"><h3>Rust Blog</h3></a>
                <p class="w-gl__description">Empowering everyone to build reliable software.</p>
            </div>
        </section>
        <form><button class="next" type="submit">Next</button></form>
    "#;

    #[test]
    fn test_startpage_search_url() {
        let engine = Startpage::new();
        let options = SearchOptions::new().with_time_range(TimeRange::Day);
        let url = engine.search_url("rust", &options).unwrap();
        assert_eq!(
            url.as_str(),
            format!(
                "https://www.startpage.com/do/search?query=rust&prfe={}&with_date=d&language=en",
                PREFERENCES
            )
        );
    }

    #[test]
    fn test_startpage_time_range_table() {
        let engine = Startpage::new();
        assert!(engine.time_range_params(TimeRange::Any).is_empty());
        assert_eq!(engine.time_range_params(TimeRange::Hour), vec![("with_date", "h".to_string())]);
        assert_eq!(engine.time_range_params(TimeRange::Month), vec![("with_date", "m".to_string())]);
    }

    #[test]
    fn test_startpage_extract_result() {
        let engine = Startpage::new();
        let doc = Html::parse_document(RESULTS_HTML);
        let sel = selector(engine.result_selector()).unwrap();
        let item = doc.select(&sel).next().unwrap();
        assert_eq!(
            engine.extract_result(item),
            SearchResult::new(
                "Rust Blog",
                "https://blog.rust-lang.org/",
                "Empowering everyone to build reliable software."
            )
        );
    }

    #[test]
    fn test_startpage_pagination_sets_page_index() {
        let engine = Startpage::new();
        let doc = Html::parse_document(RESULTS_HTML);
        let sel = selector(engine.pagination_selector()).unwrap();
        let control = doc.select(&sel).next().unwrap();

        let first = Url::parse("https://www.startpage.com/do/search?query=rust&language=en").unwrap();
        let second = engine.pagination_url(2, &SearchOptions::new(), control, &first).unwrap();
        assert_eq!(
            second.as_str(),
            "https://www.startpage.com/do/search?query=rust&language=en&page=2"
        );

        let third = engine.pagination_url(3, &SearchOptions::new(), control, &second).unwrap();
        assert_eq!(
            third.as_str(),
            "https://www.startpage.com/do/search?query=rust&language=en&page=3"
        );
    }
}
