//! HTML rendering of the post grid
//!
//! Turns a bounded slice of fetched posts into a card grid. Rendering never
//! fails: a fetch error becomes a fixed error paragraph so the surrounding page
//! still renders.

use std::fmt::{self, Write};

use askama::Template;
use askama_escape::Escaper;

use crate::config::Config;
use crate::data::{FetchError, Post, PostsClient};

/// Fragment shown in place of the grid when posts cannot be fetched
pub const ERROR_FRAGMENT: &str = "<p>Error fetching posts.</p>";

/// HTML escaper used by every template in the crate
///
/// Neutralizes `&`, `<`, `>`, `"` and `'`, writing the single quote as
/// `&#039;` like WordPress' `esc_html`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WpHtml;

impl Escaper for WpHtml {
    fn write_escaped<W>(&self, mut fmt: W, string: &str) -> fmt::Result
    where
        W: Write,
    {
        let mut last = 0;
        for (index, byte) in string.bytes().enumerate() {
            let entity = match byte {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#039;",
                _ => continue,
            };
            fmt.write_str(&string[last..index])?;
            fmt.write_str(entity)?;
            last = index + 1;
        }
        fmt.write_str(&string[last..])
    }
}

#[derive(Template)]
#[template(
    source = r#"<div class="wp-json-fetcher-container">{% for post in posts %}<div class="wp-json-fetcher-card"><h3>{{ post.title }}</h3><p>{{ post.body }}</p></div>{% endfor %}</div>"#,
    ext = "html"
)]
struct PostGridTemplate<'a> {
    posts: &'a [Post],
}

/// Fetches posts and renders the first `config.num_posts` of them
pub async fn display_posts(client: &PostsClient, config: &Config) -> String {
    render_result(client.get_posts(config).await, config)
}

/// Renders the outcome of a fetch
///
/// Both error kinds currently render the same fragment; the kind is kept so a
/// host can tell them apart without parsing HTML.
pub fn render_result(result: Result<Vec<Post>, FetchError>, config: &Config) -> String {
    match result {
        Ok(posts) => render_posts(&posts, config.display_limit()),
        Err(FetchError::FetchFailed(_)) | Err(FetchError::EmptyResult) => ERROR_FRAGMENT.to_string(),
    }
}

/// Renders at most `limit` posts, in order, inside the grid container
pub fn render_posts(posts: &[Post], limit: usize) -> String {
    let template = PostGridTemplate {
        posts: &posts[..limit.min(posts.len())],
    };
    template
        .render()
        .unwrap_or_else(|_| ERROR_FRAGMENT.to_string())
}
