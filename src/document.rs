//! Thin helpers over `scraper` for querying fetched pages.
//!
//! Sub-queries on a matched element never fail: a pattern that matches
//! nothing reads as an empty string.

use scraper::{ElementRef, Selector};

use crate::{Result, SearchError};

/// Parses a CSS selector.
pub fn selector(pattern: &str) -> Result<Selector> {
    Selector::parse(pattern)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector '{}': {:?}", pattern, e)))
}

/// Returns the whitespace-trimmed text content of an element.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns the first descendant of `element` matching `pattern`.
pub fn first<'a>(element: ElementRef<'a>, pattern: &str) -> Option<ElementRef<'a>> {
    let selector = selector(pattern).ok()?;
    let found = element.select(&selector).next();
    found
}

/// Text of the first descendant matching `pattern`, or empty.
pub fn child_text(element: ElementRef<'_>, pattern: &str) -> String {
    first(element, pattern).map(text).unwrap_or_default()
}

/// Attribute of the first descendant matching `pattern`, or empty.
pub fn child_attr(element: ElementRef<'_>, pattern: &str, attr: &str) -> String {
    first(element, pattern)
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Attribute of the element itself, or empty.
pub fn attr(element: ElementRef<'_>, attr: &str) -> String {
    element
        .value()
        .attr(attr)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// The parent element, if the parent node is an element.
pub fn parent(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const HTML: &str = r#"
        <div class="item">
            <h3>  Hello   </h3>
            <a class="link" href=" https://example.com ">link</a>
            <form><input name="s" value="30"><input class="next" value="Next"></form>
        </div>
    "#;

    fn item(doc: &Html) -> ElementRef<'_> {
        doc.select(&selector("div.item").unwrap()).next().unwrap()
    }

    #[test]
    fn test_child_text_trims() {
        let doc = Html::parse_fragment(HTML);
        assert_eq!(child_text(item(&doc), "h3"), "Hello");
    }

    #[test]
    fn test_child_text_missing_is_empty() {
        let doc = Html::parse_fragment(HTML);
        assert_eq!(child_text(item(&doc), "span.nothing"), "");
    }

    #[test]
    fn test_child_attr() {
        let doc = Html::parse_fragment(HTML);
        assert_eq!(child_attr(item(&doc), "a.link", "href"), "https://example.com");
        assert_eq!(child_attr(item(&doc), "a.link", "title"), "");
        assert_eq!(child_attr(item(&doc), "a.other", "href"), "");
    }

    #[test]
    fn test_invalid_pattern_reads_empty() {
        let doc = Html::parse_fragment(HTML);
        assert_eq!(child_text(item(&doc), "h3[["), "");
        assert!(selector("h3[[").is_err());
    }

    #[test]
    fn test_parent_and_attr() {
        let doc = Html::parse_fragment(HTML);
        let next = first(item(&doc), "input.next").unwrap();
        assert_eq!(attr(next, "value"), "Next");
        let form = parent(next).unwrap();
        assert_eq!(form.value().name(), "form");
        assert_eq!(child_attr(form, "[name='s']", "value"), "30");
    }
}
