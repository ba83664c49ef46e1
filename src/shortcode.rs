//! The `[wp_json_fetcher]` directive and public page output
//!
//! Content may embed the directive anywhere; each occurrence is replaced with
//! the rendered post grid. A doubled form (`[[wp_json_fetcher]]`) is left in
//! place as literal text minus the outer brackets.

use askama::Template;

use crate::config::Config;
use crate::data::PostsClient;
use crate::render::display_posts;

/// Name of the directive
pub const SHORTCODE: &str = "wp_json_fetcher";

/// Stylesheet for the post grid, included on public pages
pub const STYLESHEET: &str = include_str!("../assets/style.css");

/// Spellings of the directive, which takes no arguments
const TAG_FORMS: [&str; 3] = ["[wp_json_fetcher]", "[wp_json_fetcher/]", "[wp_json_fetcher /]"];

/// Finds the next directive at or after `from`, returning its byte range
fn next_tag(content: &str, from: usize) -> Option<(usize, usize)> {
    TAG_FORMS
        .iter()
        .filter_map(|tag| {
            content[from..]
                .find(tag)
                .map(|offset| (from + offset, from + offset + tag.len()))
        })
        .min_by_key(|(start, _)| *start)
}

/// Replaces every directive in `content` with the rendered post grid
///
/// Posts are fetched at most once per call, and only if an unescaped directive
/// is present.
pub async fn expand_shortcodes(content: &str, client: &PostsClient, config: &Config) -> String {
    let mut output = String::with_capacity(content.len());
    let mut rendered: Option<String> = None;
    let mut cursor = 0;

    while let Some((start, end)) = next_tag(content, cursor) {
        output.push_str(&content[cursor..start]);

        let escaped = start > cursor
            && content[..start].ends_with('[')
            && content[end..].starts_with(']');

        if escaped {
            output.pop();
            output.push_str(&content[start..end]);
            cursor = end + 1;
            continue;
        }

        if rendered.is_none() {
            rendered = Some(display_posts(client, config).await);
        }
        if let Some(html) = &rendered {
            output.push_str(html);
        }
        cursor = end;
    }

    output.push_str(&content[cursor..]);
    output
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    stylesheet: &'a str,
    body: &'a str,
}

/// Renders a complete public page around `content`, expanding directives
///
/// Content is trusted page markup and goes into the body unescaped.
pub async fn render_page(
    content: &str,
    client: &PostsClient,
    config: &Config,
) -> askama::Result<String> {
    let body = expand_shortcodes(content, client, config).await;

    PageTemplate {
        stylesheet: STYLESHEET,
        body: &body,
    }
    .render()
}
