//! Render — turns content blocks into HTML cards and serves the page shell.
//!
//! Pure functions only. All model- and user-supplied text is escaped.

use crate::generation::pipeline::{
    DEFAULT_COUNT, EMPTY_INTERESTS_WARNING, MAX_COUNT, MIN_COUNT,
};
use crate::llm_client::MODEL;
use crate::models::content::ContentBlock;

mod page;

/// Renders one card: heading, labelled rationale, body paragraph.
pub fn render_block(block: &ContentBlock) -> String {
    format!(
        "<div class=\"recommend-box\">\n\
         <h4>📌 {title}</h4>\n\
         <p><b>Why Recommended:</b> {reason}</p>\n\
         <p>{body}</p>\n\
         </div>",
        title = escape_html(&block.title),
        reason = escape_html(&block.reason),
        body = escape_html(&block.body),
    )
}

/// The single-page shell: styles, form widgets and the card container.
pub fn render_page() -> String {
    page::PAGE_TEMPLATE
        .replace("{min_count}", &MIN_COUNT.to_string())
        .replace("{max_count}", &MAX_COUNT.to_string())
        .replace("{default_count}", &DEFAULT_COUNT.to_string())
        .replace("{empty_warning}", EMPTY_INTERESTS_WARNING)
        .replace("{model}", MODEL)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
