//! Display settings and the options store they are persisted in
//!
//! Settings live in a small JSON options file (`~/.config/json-fetcher/options.json`
//! on Linux), keyed by option name. [`Config::load`] reads them fresh on every
//! render and falls back to defaults for anything unset or unreadable; the
//! minimums are only enforced when settings are saved through
//! [`update_settings`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use directories::ProjectDirs;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Option holding how many posts to display
pub const NUM_POSTS_OPTION: &str = "wp_json_fetcher_num_posts";

/// Option holding the cache duration in seconds
pub const CACHE_TIME_OPTION: &str = "wp_json_fetcher_cache_time";

pub const DEFAULT_NUM_POSTS: i64 = 8;
pub const DEFAULT_CACHE_SECONDS: i64 = 3600;

/// Smallest value the settings form accepts for the post count
pub const MIN_NUM_POSTS: i64 = 1;

/// Smallest value the settings form accepts for the cache duration
pub const MIN_CACHE_SECONDS: i64 = 60;

/// Longest cache lifetime used at render time (100 years)
pub const MAX_CACHE_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// Errors that can occur when reading or saving options
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Reading or writing the options file failed
    #[error("Options file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The options file is not valid JSON
    #[error("Failed to parse options file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A submitted value is below the form's minimum
    #[error("{name} must be at least {min}, got {value}")]
    BelowMinimum {
        name: &'static str,
        min: i64,
        value: i64,
    },
}

/// Settings that shape a single render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Config {
    /// How many posts to render; zero or negative renders none
    pub num_posts: i64,
    /// How long a fetched collection stays cached
    pub cache_seconds: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_posts: DEFAULT_NUM_POSTS,
            cache_seconds: DEFAULT_CACHE_SECONDS,
        }
    }
}

impl Config {
    /// Reads the current settings from the options store
    ///
    /// Values are taken as stored, without re-checking the form minimums.
    pub fn load(options: &OptionsStore) -> Self {
        let defaults = Self::default();
        Self {
            num_posts: options.get_i64(NUM_POSTS_OPTION).unwrap_or(defaults.num_posts),
            cache_seconds: options
                .get_i64(CACHE_TIME_OPTION)
                .unwrap_or(defaults.cache_seconds),
        }
    }

    /// Reads settings from `options`, or uses the defaults when there is no store
    pub fn load_or_default(options: Option<&OptionsStore>) -> Self {
        options.map(Self::load).unwrap_or_default()
    }

    /// Number of posts to take from the collection
    pub fn display_limit(&self) -> usize {
        usize::try_from(self.num_posts).unwrap_or(0)
    }

    /// Cache lifetime, clamped to between one second and [`MAX_CACHE_SECONDS`]
    pub fn cache_ttl(&self) -> Duration {
        let seconds = self.cache_seconds.clamp(1, MAX_CACHE_SECONDS);
        Duration::try_seconds(seconds).unwrap_or_else(|| Duration::seconds(MAX_CACHE_SECONDS))
    }
}

/// Persisted named settings with per-name defaults
#[derive(Debug, Clone)]
pub struct OptionsStore {
    path: PathBuf,
}

impl OptionsStore {
    /// Creates a store in the XDG-compliant config directory
    ///
    /// Returns `None` if the config directory cannot be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "json-fetcher")?;
        Some(Self::with_dir(project_dirs.config_dir()))
    }

    /// Creates a store whose options file lives in `dir`
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join("options.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw stored value for `name`
    ///
    /// A missing or unreadable options file reads as "nothing set".
    pub fn get_option(&self, name: &str) -> Option<Value> {
        match self.read_all() {
            Ok(mut options) => options.remove(name),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable options file");
                None
            }
        }
    }

    /// Returns `name` as an integer, accepting numbers and numeric strings
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get_option(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Stores `value` under `name`, keeping every other option
    pub fn update_option(&self, name: &str, value: impl Into<Value>) -> Result<(), OptionsError> {
        let mut options = self.read_all()?;
        options.insert(name.to_string(), value.into());
        self.write_all(&options)
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, OptionsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, options: &BTreeMap<String, Value>) -> Result<(), OptionsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(options)?)?;
        Ok(())
    }
}

/// Saves settings submitted through the settings form
///
/// Unset fields keep their stored value. Submitted values must meet the form
/// minimums; nothing is written if either is rejected.
pub fn update_settings(
    options: &OptionsStore,
    num_posts: Option<i64>,
    cache_seconds: Option<i64>,
) -> Result<Config, OptionsError> {
    if let Some(value) = num_posts {
        check_minimum(NUM_POSTS_OPTION, MIN_NUM_POSTS, value)?;
    }
    if let Some(value) = cache_seconds {
        check_minimum(CACHE_TIME_OPTION, MIN_CACHE_SECONDS, value)?;
    }

    if let Some(value) = num_posts {
        options.update_option(NUM_POSTS_OPTION, value)?;
    }
    if let Some(value) = cache_seconds {
        options.update_option(CACHE_TIME_OPTION, value)?;
    }

    Ok(Config::load(options))
}

fn check_minimum(name: &'static str, min: i64, value: i64) -> Result<(), OptionsError> {
    if value < min {
        return Err(OptionsError::BelowMinimum { name, min, value });
    }
    Ok(())
}
