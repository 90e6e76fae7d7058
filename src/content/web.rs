//! Web article adapter: downloads a page and keeps its primary readable text.

use async_trait::async_trait;
use reqwest::Client;
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

use super::BROWSER_USER_AGENT;
use crate::errors::BotError;

/// Regions tried in order when looking for the article body.
const CONTENT_SELECTORS: [&str; 4] = ["article", "main", "[role=main]", "body"];

/// Largest page body read into memory; bigger downloads are abandoned.
pub const MAX_PAGE_BYTES: usize = 20 * 1024 * 1024;

/// Subtrees that never contribute text. Tables are dropped on purpose.
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "svg", "canvas", "table", "nav",
    "footer", "aside", "form", "button", "select",
];

/// Class or id values that mark a comment thread. Matched as whole tokens.
const COMMENT_SECTION_NAMES: &[&str] = &[
    "comment",
    "comments",
    "comment-list",
    "commentlist",
    "comments-area",
    "comment-section",
    "comments-section",
    "disqus_thread",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5",
    "h6", "br", "blockquote", "pre", "dl", "dt", "dd", "hr", "figcaption",
];

/// Fetches a page and extracts its main text.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Returns the extracted text, which may be empty when the page has none.
    async fn extract_article(&self, url: &str) -> Result<String, BotError>;
}

pub struct HttpPageExtractor {
    http: Client,
    max_bytes: usize,
}

impl HttpPageExtractor {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build page client: {e}")))?;
        Ok(Self {
            http,
            max_bytes: MAX_PAGE_BYTES,
        })
    }

    /// Overrides the body size limit.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

#[async_trait]
impl PageExtractor for HttpPageExtractor {
    async fn extract_article(&self, url: &str) -> Result<String, BotError> {
        let mut response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::HttpError(format!(
                "Page fetch returned status {status}"
            )));
        }

        if let Some(declared) = response.content_length()
            && declared > self.max_bytes as u64
        {
            return Err(BotError::HttpError(format!(
                "Page declares {declared} bytes, over the {} byte limit",
                self.max_bytes
            )));
        }

        let headers = response.headers().clone();
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            append_capped(&mut body, &chunk, self.max_bytes)?;
        }
        debug!(bytes = body.len(), "Downloaded page");

        // Rebuilt so reqwest applies the Content-Type charset, which matters for Shift_JIS pages
        let mut capped = http::Response::new(body);
        *capped.headers_mut() = headers;
        let html = reqwest::Response::from(capped).text().await?;

        Ok(extract_main_text(&html))
    }
}

/// Appends a body chunk, failing once the total passes `max_bytes`.
///
/// # Errors
///
/// Returns `HttpError` when the limit is exceeded.
pub fn append_capped(body: &mut Vec<u8>, chunk: &[u8], max_bytes: usize) -> Result<(), BotError> {
    if body.len() + chunk.len() > max_bytes {
        return Err(BotError::HttpError(format!(
            "Page body exceeds the {max_bytes} byte limit"
        )));
    }
    body.extend_from_slice(chunk);
    Ok(())
}

/// Extracts readable text from the first non-empty content region of a page.
#[must_use]
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for sel_str in &CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(sel_str)
            && let Some(element) = document.select(&selector).next()
        {
            let mut raw = String::new();
            push_text(element, &mut raw, element.value().name() == "article");
            let cleaned = clean_extracted_text(&raw);
            if !cleaned.is_empty() {
                return cleaned;
            }
        }
    }

    String::new()
}

/// `in_article` keeps an article's own `<header>`, which usually holds its headline.
fn push_text(element: ElementRef<'_>, out: &mut String, in_article: bool) {
    for child in element.children() {
        match child.value() {
            // Source line breaks are layout, not structure
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let child_value = child_el.value();
                if is_excluded(child_value) || (child_value.name() == "header" && !in_article) {
                    continue;
                }
                let is_block = BLOCK_TAGS.contains(&child_el.value().name());
                if is_block {
                    out.push('\n');
                }
                push_text(child_el, out, in_article || child_value.name() == "article");
                if is_block {
                    out.push('\n');
                }
            }
            // HTML comments, doctype and processing instructions carry no text
            _ => {}
        }
    }
}

fn is_excluded(element: &Element) -> bool {
    EXCLUDED_TAGS.contains(&element.name())
        || element.id().is_some_and(names_comment_section)
        || element.classes().any(names_comment_section)
}

fn names_comment_section(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    COMMENT_SECTION_NAMES.contains(&name.as_str())
}

/// Collapses runs of whitespace inside lines and drops blank lines.
#[must_use]
pub fn clean_extracted_text(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_article_and_skips_navigation() {
        let html = r#"
            <html><body>
              <nav>Home | About</nav>
              <article>
                <h1>Rust 2024</h1>
                <p>The   new edition
                   ships today.</p>
              </article>
              <footer>Copyright</footer>
            </body></html>"#;
        assert_eq!(extract_main_text(html), "Rust 2024\nThe new edition ships today.");
    }

    #[test]
    fn drops_tables_and_comment_sections() {
        let html = r#"
            <html><body><main>
              <p>Body text.</p>
              <table><tr><td>cell</td></tr></table>
              <div id="comments"><p>first!</p></div>
              <section class="comment-list"><p>nice post</p></section>
              <!-- an html comment -->
              <script>var x = 1;</script>
            </main></body></html>"#;
        assert_eq!(extract_main_text(html), "Body text.");
    }

    #[test]
    fn falls_back_to_body_when_article_is_empty() {
        let html = "<html><body><article><table><tr><td>x</td></tr></table></article>\
                    <p>Plain body paragraph.</p></body></html>";
        assert_eq!(extract_main_text(html), "Plain body paragraph.");
    }

    #[test]
    fn comment_like_wrapper_names_keep_their_text() {
        let html = r#"
            <html><body><main>
              <div class="entry-content commentary-series">
                <p>This opinion column is the whole article.</p>
              </div>
              <div id="no-comments" class="commentable"><p>Closing note.</p></div>
              <ol class="commentlist"><li>me too</li></ol>
            </main></body></html>"#;
        assert_eq!(
            extract_main_text(html),
            "This opinion column is the whole article.\nClosing note."
        );
    }

    #[test]
    fn article_header_keeps_headline_but_site_header_is_dropped() {
        let html = r#"
            <html><body>
              <article>
                <header><h1>Launch day</h1><nav>Share</nav></header>
                <p>The rocket flew.</p>
              </article>
            </body></html>"#;
        assert_eq!(extract_main_text(html), "Launch day\nThe rocket flew.");

        let html = "<html><body><header><h1>Site name</h1></header>\
                    <p>Only a body paragraph.</p></body></html>";
        assert_eq!(extract_main_text(html), "Only a body paragraph.");
    }

    #[test]
    fn body_cap_rejects_the_chunk_that_crosses_it() {
        let mut body = Vec::new();
        append_capped(&mut body, &[b'a'; 6], 10).unwrap();
        append_capped(&mut body, &[b'b'; 4], 10).unwrap();
        assert_eq!(body.len(), 10);

        let err = append_capped(&mut body, b"c", 10).unwrap_err();
        assert!(matches!(err, BotError::HttpError(msg) if msg.contains("10 byte limit")));
        assert_eq!(body.len(), 10);
    }

    #[test]
    fn empty_page_yields_empty_text() {
        assert_eq!(extract_main_text("<html><body><script>x()</script></body></html>"), "");
    }
}
