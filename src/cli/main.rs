use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

use exif_report::config::Config;
use exif_report::context::FieldContext;
use exif_report::i18n::{Locale, MessageKey};
use exif_report::pipeline::ReportPipeline;

#[derive(Parser, Debug)]
#[command(
    name = "exif-report",
    version,
    about = "Download attachments and print a report of their EXIF metadata"
)]
struct Cli {
    /// Attachment URLs to process
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// JSON file with host input: { "file": [ record | [record, ...] | null, ... ] }
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// JSON file with host correlation context (logID, tenantKey, ...)
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Message language (zh-CN, en-US, ja-JP); overrides the config file
    #[arg(long)]
    locale: Option<Locale>,

    /// Overall deadline in seconds; overrides the config file
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output the full result as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config and apply CLI overrides
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if cli.deadline.is_some() {
        config.deadline_secs = cli.deadline;
    }

    let ctx = match cli.context.as_deref() {
        Some(path) => read_json(path).and_then(|v| {
            serde_json::from_value::<FieldContext>(v).context("Invalid context file")
        })?,
        None => FieldContext::default(),
    };

    let input = cli.input.as_deref().map(read_json).transpose()?;
    let params = build_params(input, &cli.urls)?;

    let pipeline = ReportPipeline::from_config(&config)?;
    log::debug!(
        "{}: {} top-level item(s), locale {}",
        pipeline.messages().get(MessageKey::InputText),
        params["file"].as_array().map(Vec::len).unwrap_or(0),
        config.locale
    );

    let result = pipeline
        .execute_with_deadline(&params, &ctx, config.deadline())
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        log::info!("{}", result.msg);
        println!("{}", result.data);
    }

    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge the `--input` document and positional URLs into one host input.
///
/// Positional URLs are appended as one multi-valued field after whatever the
/// input file already selected.
fn build_params(input: Option<Value>, urls: &[String]) -> Result<Value> {
    let mut params = input.unwrap_or_else(|| json!({ "file": [] }));
    if !params.is_object() {
        anyhow::bail!("Input must be a JSON object with a \"file\" list");
    }

    if urls.is_empty() {
        return Ok(params);
    }

    let records: Vec<Value> = urls
        .iter()
        .map(|url| json!({ "url": url, "name": name_from_url(url) }))
        .collect();

    if matches!(params.get("file"), None | Some(Value::Null)) {
        params["file"] = json!([]);
    }
    match params.get_mut("file") {
        Some(Value::Array(items)) => items.push(Value::Array(records)),
        _ => anyhow::bail!("\"file\" in the input must be a list when URLs are also given"),
    }

    Ok(params)
}

/// Last non-empty path segment of a URL, or the URL itself.
fn name_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()?
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        })
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_url_uses_last_segment() {
        assert_eq!(name_from_url("https://cdn.example.com/a/b/IMG_1.jpg?sig=1"), "IMG_1.jpg");
        assert_eq!(name_from_url("https://cdn.example.com/a/b/"), "b");
        assert_eq!(name_from_url("https://cdn.example.com"), "https://cdn.example.com");
        assert_eq!(name_from_url("not a url"), "not a url");
    }

    #[test]
    fn build_params_from_urls_only() {
        let params = build_params(None, &["https://x/a.jpg".to_string()]).unwrap();
        assert_eq!(
            params,
            json!({ "file": [[{ "url": "https://x/a.jpg", "name": "a.jpg" }]] })
        );
    }

    #[test]
    fn build_params_appends_to_input() {
        let input = json!({ "file": [{ "tmp_url": "https://x/1", "name": "1" }] });
        let params = build_params(Some(input), &["https://x/2.png".to_string()]).unwrap();
        let file = params["file"].as_array().unwrap();
        assert_eq!(file.len(), 2);
        assert_eq!(file[1], json!([{ "url": "https://x/2.png", "name": "2.png" }]));
    }

    #[test]
    fn build_params_without_anything_is_empty_selection() {
        assert_eq!(build_params(None, &[]).unwrap(), json!({ "file": [] }));
    }

    #[test]
    fn build_params_keeps_odd_input_for_pipeline() {
        let input = json!({ "file": "oops" });
        assert_eq!(build_params(Some(input.clone()), &[]).unwrap(), input);
        assert!(build_params(Some(input), &["https://x/a".to_string()]).is_err());
        assert!(build_params(Some(json!([1, 2])), &[]).is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "exif-report",
            "--locale",
            "ja-JP",
            "--deadline",
            "30",
            "--json",
            "https://x/a.jpg",
        ])
        .unwrap();
        assert_eq!(cli.locale, Some(Locale::JaJp));
        assert_eq!(cli.deadline, Some(30));
        assert!(cli.json);
        assert_eq!(cli.urls, vec!["https://x/a.jpg"]);
    }

    #[test]
    fn cli_unknown_locale_falls_back_to_english() {
        let cli = Cli::try_parse_from(["exif-report", "--locale", "fr"]).unwrap();
        assert_eq!(cli.locale, Some(Locale::EnUs));
    }
}
