//! Thin query layer over a parsed HTML document
//!
//! Extraction code talks to pages through `find_all` / `first` / `text` /
//! `attr` instead of raw `scraper` calls. Invalid selectors are logged and
//! treated as matching nothing, so one bad selector never aborts extraction.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never visible to a reader
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A parsed HTML page
///
/// Wraps [`scraper::Html`], which is not `Send`; documents are built and
/// dropped inside synchronous extraction code and never held across an await.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    /// Parses an HTML string (never fails; malformed markup is repaired)
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// All elements matching a CSS selector, in document order
    pub fn find_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match selector(css) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    /// The first element matching a CSS selector
    pub fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = selector(css)?;
        self.html.select(&sel).next()
    }

    /// Trimmed text of the first matching element, if non-empty
    pub fn first_text(&self, css: &str) -> Option<String> {
        self.first(css).map(text).filter(|t| !t.is_empty())
    }

    /// Number of elements matching a CSS selector
    pub fn count(&self, css: &str) -> usize {
        match selector(css) {
            Some(sel) => self.html.select(&sel).count(),
            None => 0,
        }
    }

    /// Visible text of `<body>`, with text nodes separated by spaces
    ///
    /// Script, style, noscript and template contents are skipped.
    pub fn body_text(&self) -> String {
        let Some(body) = self.first("body") else {
            return String::new();
        };

        let mut parts: Vec<&str> = Vec::new();
        for node in body.descendants() {
            if let Node::Text(content) = node.value() {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .map_or(false, |el| HIDDEN_TEXT_TAGS.contains(&el.name()))
                });
                if !hidden {
                    parts.push(content);
                }
            }
        }

        parts.join(" ")
    }
}

/// Compiles a CSS selector, logging instead of failing on invalid input
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!("Invalid selector '{}' skipped: {:?}", css, e);
            None
        }
    }
}

/// Concatenated, trimmed text content of an element
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed attribute value, if present and non-empty
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The first descendant of `element` matching a compiled selector
pub fn find_within<'a>(element: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    element.select(sel).next()
}

/// The next sibling that is an element, skipping text and comments
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Returns true if the payload is an HTML document
///
/// An explicit `<html>` or `<body>` tag is enough. Both tags are optional in
/// HTML5, so otherwise the payload is parsed and accepted when the document
/// holds at least one element besides the `html`/`head`/`body` skeleton the
/// parser synthesizes for any input. Plain text and JSON never do.
pub fn has_html_structure(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    if contains_tag(&lower, "<html") || contains_tag(&lower, "<body") {
        return true;
    }

    PageDocument::parse(raw).count("head *, body *") > 0
}

fn contains_tag(haystack: &str, open: &str) -> bool {
    haystack.match_indices(open).any(|(index, _)| {
        matches!(
            haystack[index + open.len()..].chars().next(),
            Some('>') | Some('/') | Some(' ') | Some('\t') | Some('\n') | Some('\r')
        )
    })
}
