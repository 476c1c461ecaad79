//! Shared `scraper` helpers for the board adapters.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Descriptions longer than this are cut.
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

const DESCRIPTION_SELECTORS: &str = "#job-description-text, div.job-detail-content, \
     div[itemprop='description'], .panel-body.job-description";
const DESCRIPTION_CLASS_HINTS: &[&str] = &["description", "content", "job-details"];

pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Visible text of an element with whitespace collapsed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first descendant matching `css`, if non-empty.
pub fn first_text(element: &ElementRef<'_>, css: &str) -> Option<String> {
    let selector = selector(css)?;
    element
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

/// `href` of the first descendant matching `css`.
pub fn first_href(element: &ElementRef<'_>, css: &str) -> Option<String> {
    let selector = selector(css)?;
    element
        .select(&selector)
        .find_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Elements matching `primary`, or `fallback` when `primary` finds nothing.
pub fn select_with_fallback<'a>(document: &'a Html, primary: &str, fallback: &str) -> Vec<ElementRef<'a>> {
    for css in [primary, fallback] {
        if let Some(selector) = selector(css) {
            let found: Vec<_> = document.select(&selector).collect();
            if !found.is_empty() {
                return found;
            }
        }
    }
    Vec::new()
}

/// Resolves `href` against `base`. Absolute links pass through.
pub fn absolute_url(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

/// Pulls a job description out of a detail page.
///
/// Tries known description containers first, then any div/p/li/span whose
/// class mentions description or content, then plain paragraphs and list items.
pub fn extract_description(page: &str) -> Option<String> {
    let document = Html::parse_document(page);

    if let Some(selector) = selector(DESCRIPTION_SELECTORS) {
        if let Some(el) = document.select(&selector).next() {
            let text = element_text(&el);
            if !text.is_empty() {
                return Some(truncate_chars(&text, MAX_DESCRIPTION_CHARS));
            }
        }
    }

    let hinted = selector("div[class], p[class], li[class], span[class]").map(|sel| {
        document
            .select(&sel)
            .filter(|el| {
                el.value()
                    .attr("class")
                    .map(|class| {
                        let class = class.to_lowercase();
                        DESCRIPTION_CLASS_HINTS.iter().any(|hint| class.contains(hint))
                    })
                    .unwrap_or(false)
            })
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
    });

    let texts = match hinted {
        Some(texts) if !texts.is_empty() => texts,
        _ => selector("p, li")
            .map(|sel| {
                document
                    .select(&sel)
                    .map(|el| element_text(&el))
                    .filter(|text| !text.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    };

    let joined = texts.join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(truncate_chars(&joined, MAX_DESCRIPTION_CHARS))
    }
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
