//! Admin settings page
//!
//! Renders the settings form for the two display options. The `min`
//! attributes mirror the checks [`update_settings`](crate::config::update_settings)
//! applies when the form is saved.

use askama::Template;

use crate::config::{
    Config, CACHE_TIME_OPTION, MIN_CACHE_SECONDS, MIN_NUM_POSTS, NUM_POSTS_OPTION,
};

/// Title shown at the top of the settings page
pub const SETTINGS_PAGE_TITLE: &str = "WP JSON Fetcher Settings";

#[derive(Template)]
#[template(path = "settings.html")]
struct SettingsTemplate {
    title: &'static str,
    num_posts_option: &'static str,
    num_posts: i64,
    min_num_posts: i64,
    cache_time_option: &'static str,
    cache_seconds: i64,
    min_cache_seconds: i64,
}

/// Renders the settings form pre-filled with `config`
pub fn render_settings_page(config: &Config) -> askama::Result<String> {
    SettingsTemplate {
        title: SETTINGS_PAGE_TITLE,
        num_posts_option: NUM_POSTS_OPTION,
        num_posts: config.num_posts,
        min_num_posts: MIN_NUM_POSTS,
        cache_time_option: CACHE_TIME_OPTION,
        cache_seconds: config.cache_seconds,
        min_cache_seconds: MIN_CACHE_SECONDS,
    }
    .render()
}
