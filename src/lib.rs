//! Fetch, cache and render remote JSON posts
//!
//! The pipeline fetches the JSONPlaceholder post collection through a
//! [`PostsClient`](data::PostsClient), keeps it in a [`CacheStore`](cache::CacheStore)
//! for the configured duration, and renders the first few posts as an HTML
//! grid that can be embedded with the `[wp_json_fetcher]` directive.

pub mod admin;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod render;
pub mod shortcode;
