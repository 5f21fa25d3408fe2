//! ИноСМИ article sanitizer.
//!
//! Extracts article text from [inosmi.ru](https://inosmi.ru) pages. The
//! article body lives in `div.article__text` blocks (older layouts use
//! `div.article-body`), with the headline in an `h1` above it. Scripts,
//! navigation and ad markup around the body are simply never selected.

use scraper::{Html, Selector};
use tracing::debug;

/// Extract article content from inosmi.ru markup.
///
/// With `plaintext = true`, returns the headline followed by the article
/// text, one block per line. Otherwise returns the article body markup with
/// the surrounding page chrome stripped.
pub fn sanitize(markup: &str, plaintext: bool) -> String {
    let document = Html::parse_document(markup);
    let title_selector =
        Selector::parse("h1.article-header__title, h1").expect("selector is valid");
    let body_selector =
        Selector::parse("div.article__text, div.article-body, article").expect("selector is valid");

    if !plaintext {
        let html = document
            .select(&body_selector)
            .map(|element| element.html())
            .collect::<Vec<_>>()
            .join("\n");
        debug!(bytes = html.len(), "Sanitized inosmi article markup");
        return html;
    }

    let mut content = String::new();
    for element in document
        .select(&title_selector)
        .chain(document.select(&body_selector))
    {
        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.trim();
        if !text.is_empty() {
            content.push_str(text);
            content.push('\n');
        }
    }
    debug!(bytes = content.len(), "Sanitized inosmi article text");
    content
}
