// WHY: Detection only needs three query primitives; each host environment
// supplies them, so the detector never assumes a particular DOM engine

use anyhow::{anyhow, Result};
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

/// Candidates for the text-pattern phase
pub const INTERACTIVE_SELECTOR: &str = r#"button, a, [role="button"]"#;

/// Read access to one element of a page
pub trait PageElement {
    /// Concatenated descendant text, `None` when the engine has none to offer
    fn text_content(&self) -> Option<String>;

    /// Serialized markup of the element including its own tag
    fn outer_html(&self) -> String;
}

/// Queryable page the detector can scan
pub trait DocumentLike {
    type Element<'a>: PageElement
    where
        Self: 'a;

    fn url(&self) -> String;

    fn title(&self) -> String;

    /// First element matching `selector` in document order.
    /// Errors for selector syntax the engine does not understand.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element<'_>>>;

    /// Whether the element is rendered (not detached, not display:none)
    fn is_visible(&self, element: &Self::Element<'_>) -> bool;

    /// All `button`, `a` and `[role="button"]` elements in document order
    fn interactive_elements(&self) -> Vec<Self::Element<'_>>;
}

/// Static HTML page parsed with `scraper`
pub struct HtmlDocument {
    url: String,
    html: Html,
}

impl HtmlDocument {
    pub fn parse(url: impl Into<String>, markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            debug!("HTML parsed with {} recoverable errors", html.errors.len());
        }
        Self { url: url.into(), html }
    }
}

impl<'a> PageElement for ElementRef<'a> {
    fn text_content(&self) -> Option<String> {
        Some(self.text().collect())
    }

    fn outer_html(&self) -> String {
        self.html()
    }
}

impl DocumentLike for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.html
            .select(title_selector())
            .next()
            .map(|title| title.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    fn query_selector(&self, selector: &str) -> Result<Option<ElementRef<'_>>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| anyhow!("Unsupported selector {selector:?}: {e:?}"))?;
        Ok(self.html.select(&parsed).next())
    }

    fn is_visible(&self, element: &ElementRef<'_>) -> bool {
        is_rendered(element)
    }

    fn interactive_elements(&self) -> Vec<ElementRef<'_>> {
        self.html.select(interactive_selector()).collect()
    }
}

fn title_selector() -> &'static Selector {
    static TITLE: OnceLock<Selector> = OnceLock::new();
    TITLE.get_or_init(|| Selector::parse("title").expect("static selector is valid"))
}

fn interactive_selector() -> &'static Selector {
    static INTERACTIVE: OnceLock<Selector> = OnceLock::new();
    INTERACTIVE.get_or_init(|| Selector::parse(INTERACTIVE_SELECTOR).expect("static selector is valid"))
}

/// Static-markup approximation of "has a layout box": walks the element and its
/// ancestors looking for anything that keeps it out of rendering.
fn is_rendered(element: &ElementRef<'_>) -> bool {
    std::iter::once(*element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .all(|el| !hides_subtree(el.value()))
}

fn hides_subtree(el: &Element) -> bool {
    let name = el.name();
    if name == "head" || name == "template" {
        return true;
    }
    if el.attr("hidden").is_some() {
        return true;
    }
    if name == "input" && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
        return true;
    }
    el.attr("style").is_some_and(style_hides_element)
}

/// True for inline styles declaring `display: none`
fn style_hides_element(style: &str) -> bool {
    style.split(';').any(|declaration| {
        let mut parts = declaration.splitn(2, ':');
        let property = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        property.eq_ignore_ascii_case("display")
            && value
                .trim_end_matches("!important")
                .trim()
                .eq_ignore_ascii_case("none")
    })
}
