//! Command-line interface parsing for json-fetcher
//!
//! This module handles parsing of CLI arguments using clap. Setting values are
//! checked against the same minimums as the admin settings form before they
//! reach the options store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{MIN_CACHE_SECONDS, MIN_NUM_POSTS};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The value is not a whole number
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// The value is below the setting's minimum
    #[error("Value {value} is below the minimum of {min}")]
    BelowMinimum { value: i64, min: i64 },

    /// No config directory could be found and none was given
    #[error("Could not determine a config directory; pass --config-dir")]
    NoConfigDir,
}

/// Fetch, cache and render remote JSON posts as embeddable HTML
#[derive(Parser, Debug)]
#[command(name = "json-fetcher")]
#[command(about = "Fetch, cache and render remote JSON posts as HTML")]
#[command(version)]
pub struct Cli {
    /// Directory for cached responses (defaults to the XDG cache directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Directory holding options.json (defaults to the XDG config directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Fetch posts from this URL instead of JSONPlaceholder
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the rendered post grid
    Render,

    /// Print a full HTML page, expanding [wp_json_fetcher] in the content
    ///
    /// Examples:
    ///   json-fetcher page               # Page containing only the grid
    ///   json-fetcher page content.html  # Expand the directive inside content.html
    Page {
        /// File whose content is placed in the page body
        file: Option<PathBuf>,
    },

    /// Show or change the display settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,

    /// Save new settings; omitted values are kept
    Set {
        /// Number of posts to display (at least 1)
        #[arg(long, value_parser = parse_num_posts_arg)]
        num_posts: Option<i64>,

        /// Cache duration in seconds (at least 60)
        #[arg(long, value_parser = parse_cache_time_arg)]
        cache_time: Option<i64>,
    },

    /// Print the admin settings form
    Form,
}

/// Parses a whole number no smaller than `min`
///
/// # Returns
/// * `Ok(i64)` if the string is a whole number of at least `min`
/// * `Err(CliError)` otherwise
pub fn parse_bounded_arg(s: &str, min: i64) -> Result<i64, CliError> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidNumber(s.to_string()))?;

    if value < min {
        return Err(CliError::BelowMinimum { value, min });
    }
    Ok(value)
}

/// Parses the `--num-posts` value
pub fn parse_num_posts_arg(s: &str) -> Result<i64, CliError> {
    parse_bounded_arg(s, MIN_NUM_POSTS)
}

/// Parses the `--cache-time` value
pub fn parse_cache_time_arg(s: &str) -> Result<i64, CliError> {
    parse_bounded_arg(s, MIN_CACHE_SECONDS)
}
