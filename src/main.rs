//! json-fetcher - render remote JSON posts as embeddable HTML
//!
//! Prints the post grid, a full public page, or the admin settings form to
//! stdout. Logs go to stderr and are filtered with `RUST_LOG`.

use std::error::Error;
use std::fs;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use json_fetcher::admin::render_settings_page;
use json_fetcher::cache::{CacheManager, CacheStore, MemoryCache};
use json_fetcher::cli::{Cli, CliError, Command, SettingsAction};
use json_fetcher::config::{update_settings, Config, OptionsStore};
use json_fetcher::data::PostsClient;
use json_fetcher::render::display_posts;
use json_fetcher::shortcode::render_page;

/// Page body used when `page` is run without a content file
const DEFAULT_PAGE_CONTENT: &str = "[wp_json_fetcher]";

/// Sets up stderr logging, defaulting to warnings only
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Picks the cache store: the given directory, the XDG cache dir, or memory
fn cache_store(cli: &Cli) -> Arc<dyn CacheStore> {
    if let Some(dir) = &cli.cache_dir {
        return Arc::new(CacheManager::with_dir(dir.clone()));
    }
    match CacheManager::new() {
        Some(cache) => Arc::new(cache),
        None => {
            warn!("no cache directory available, caching in memory for this run");
            Arc::new(MemoryCache::new())
        }
    }
}

/// Picks the options store: the given directory or the XDG config dir
///
/// `None` means settings can be read as defaults but not saved.
fn options_store(cli: &Cli) -> Option<OptionsStore> {
    match &cli.config_dir {
        Some(dir) => Some(OptionsStore::with_dir(dir)),
        None => OptionsStore::new(),
    }
}

fn posts_client(cli: &Cli) -> PostsClient {
    let client = PostsClient::new(cache_store(cli));
    match &cli.endpoint {
        Some(endpoint) => client.with_endpoint(endpoint.clone()),
        None => client,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let options = options_store(&cli);
    if options.is_none() {
        warn!("no config directory available, using default settings");
    }
    let config = Config::load_or_default(options.as_ref());

    match &cli.command {
        Command::Render => {
            let html = display_posts(&posts_client(&cli), &config).await;
            println!("{}", html);
        }
        Command::Page { file } => {
            let content = match file {
                Some(path) => fs::read_to_string(path)?,
                None => DEFAULT_PAGE_CONTENT.to_string(),
            };
            let page = render_page(&content, &posts_client(&cli), &config).await?;
            print!("{}", page);
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            SettingsAction::Set {
                num_posts,
                cache_time,
            } => {
                let options = options.as_ref().ok_or(CliError::NoConfigDir)?;
                let config = update_settings(options, *num_posts, *cache_time)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            SettingsAction::Form => {
                println!("{}", render_settings_page(&config)?);
            }
        },
    }

    Ok(())
}
