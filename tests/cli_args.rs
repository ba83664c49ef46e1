//! Integration tests for CLI argument handling
//!
//! Runs the built binary against temporary config and cache directories.
//! Nothing here touches the real endpoint: rendering is pointed at a port
//! with nothing listening.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:1/posts";

/// Helper to run the CLI with isolated directories and capture output
fn run_cli(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_json-fetcher"))
        .args(args)
        .arg("--config-dir")
        .arg(dir.join("config"))
        .arg("--cache-dir")
        .arg(dir.join("cache"))
        .output()
        .expect("Failed to execute json-fetcher")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = Command::new(env!("CARGO_BIN_EXE_json-fetcher"))
        .arg("--help")
        .output()
        .expect("Failed to execute json-fetcher");
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("json-fetcher"), "Help should mention json-fetcher");
    assert!(stdout.contains("render"), "Help should mention the render command");
    assert!(stdout.contains("settings"), "Help should mention the settings command");
}

#[test]
fn test_settings_show_prints_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["settings", "show"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"num_posts\": 8"));
    assert!(stdout.contains("\"cache_seconds\": 3600"));
}

#[test]
fn test_settings_set_persists_to_options_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(
        temp_dir.path(),
        &["settings", "set", "--num-posts", "4", "--cache-time", "120"],
    );
    assert!(output.status.success());

    let options = fs::read_to_string(temp_dir.path().join("config").join("options.json"))
        .expect("Options file should exist");
    assert!(options.contains("wp_json_fetcher_num_posts"));

    let output = run_cli(temp_dir.path(), &["settings", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"num_posts\": 4"));
    assert!(stdout.contains("\"cache_seconds\": 120"));
}

#[test]
fn test_settings_set_below_minimum_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["settings", "set", "--num-posts", "0"]);

    assert!(!output.status.success(), "Expected zero posts to be rejected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("minimum"),
        "Should print error message about the minimum: {}",
        stderr
    );
    assert!(!temp_dir.path().join("config").join("options.json").exists());
}

#[test]
fn test_settings_form_renders_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["settings", "form"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"name="wp_json_fetcher_num_posts" value="8" min="1""#));
    assert!(stdout.contains(r#"name="wp_json_fetcher_cache_time" value="3600" min="60""#));
}

#[test]
fn test_render_with_unreachable_endpoint_prints_error_fragment() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["render", "--endpoint", UNREACHABLE_ENDPOINT]);

    assert!(output.status.success(), "Render never fails the process");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "<p>Error fetching posts.</p>");
}

#[test]
fn test_page_expands_directive_in_content_file() {
    let temp_dir = TempDir::new().unwrap();
    let content = temp_dir.path().join("content.html");
    fs::write(&content, "<h2>Latest</h2>[wp_json_fetcher]").unwrap();

    let output = run_cli(
        temp_dir.path(),
        &[
            "page",
            content.to_str().unwrap(),
            "--endpoint",
            UNREACHABLE_ENDPOINT,
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<!DOCTYPE html>"));
    assert!(stdout.contains("<h2>Latest</h2><p>Error fetching posts.</p>"));
    assert!(stdout.contains("wp-json-fetcher-style-css"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use json_fetcher::cli::{parse_num_posts_arg, Cli, Command, SettingsAction};

    #[test]
    fn test_cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["json-fetcher"]).is_err());
    }

    #[test]
    fn test_cli_settings_form() {
        let cli = Cli::parse_from(["json-fetcher", "settings", "form"]);
        assert_eq!(
            cli.command,
            Command::Settings {
                action: SettingsAction::Form
            }
        );
    }

    #[test]
    fn test_cli_page_without_file() {
        let cli = Cli::parse_from(["json-fetcher", "page"]);
        assert_eq!(cli.command, Command::Page { file: None });
    }

    #[test]
    fn test_parse_num_posts_arg_rejects_negative() {
        assert!(parse_num_posts_arg("-1").is_err());
    }
}
