use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::attachment::{self, AttachmentRef};
use crate::config::Config;
use crate::context::FieldContext;
use crate::exif::{DecodeError, ExifDecoder, NomExifDecoder, TagSet};
use crate::fetch::{FetchError, Fetcher, HttpFetcher};
use crate::format::format_entry;
use crate::i18n::{MessageKey, Messages};

/// Status channel of a [`FieldResult`].
///
/// Always `Success`: failures are reported as readable text in `data` and
/// `msg`, so the host always has something to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldCode {
    Success,
}

/// What an invocation hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldResult {
    pub code: FieldCode,
    pub data: String,
    pub msg: String,
}

impl FieldResult {
    fn success(data: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code: FieldCode::Success,
            data: data.into(),
            msg: msg.into(),
        }
    }
}

/// Why one attachment produced a diagnostic line instead of a report block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemError {
    #[error("download failed with status {status}")]
    Download { status: u16 },
    #[error("download failed: {0}")]
    Network(String),
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("no metadata found")]
    NoMetadata,
}

impl From<FetchError> for ItemError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Status(status) => Self::Download { status },
            FetchError::Network(msg) => Self::Network(msg),
        }
    }
}

impl From<DecodeError> for ItemError {
    fn from(e: DecodeError) -> Self {
        Self::Parse(e.0)
    }
}

/// Outcome of fetching and decoding one attachment.
pub type ItemOutcome = std::result::Result<TagSet, ItemError>;

/// Fetch and decode one attachment URL.
///
/// Every failure is captured in the returned outcome; nothing propagates.
pub async fn process_attachment(
    url: &str,
    fetcher: &dyn Fetcher,
    decoder: &dyn ExifDecoder,
) -> ItemOutcome {
    let bytes = fetcher.fetch(url).await?;
    let tags = decoder.decode(&bytes)?;
    if tags.is_empty() {
        return Err(ItemError::NoMetadata);
    }
    Ok(tags)
}

/// Render one attachment's outcome as its report entry.
pub fn render_outcome(name: &str, outcome: &ItemOutcome, messages: &Messages) -> String {
    match outcome {
        Ok(tags) => format_entry(name, tags),
        Err(ItemError::Download { status }) => {
            format!("{name}: {} ({status})", messages.get(MessageKey::DownloadError))
        }
        Err(ItemError::Network(msg)) => {
            format!("{name}: {} - {msg}", messages.get(MessageKey::DownloadError))
        }
        Err(ItemError::Parse(msg)) => {
            format!("{name}: {} - {msg}", messages.get(MessageKey::ParseFailed))
        }
        Err(ItemError::NoMetadata) => {
            format!("{name}: {}", messages.get(MessageKey::NoExifData))
        }
    }
}

/// The attachment → report pipeline with its collaborators.
///
/// # Example
///
/// ```rust,no_run
/// use exif_report::config::Config;
/// use exif_report::context::FieldContext;
/// use exif_report::pipeline::ReportPipeline;
/// use serde_json::json;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pipeline = ReportPipeline::from_config(&Config::default())?;
/// let params = json!({ "file": [[{ "name": "a.jpg", "tmp_url": "https://example.com/a.jpg" }]] });
///
/// let result = pipeline.execute(&params, &FieldContext::default()).await;
/// println!("{}", result.data);
/// # Ok(())
/// # }
/// ```
pub struct ReportPipeline {
    fetcher: Box<dyn Fetcher>,
    decoder: Box<dyn ExifDecoder>,
    messages: Messages,
}

impl ReportPipeline {
    pub fn new(fetcher: Box<dyn Fetcher>, decoder: Box<dyn ExifDecoder>, messages: Messages) -> Self {
        Self {
            fetcher,
            decoder,
            messages,
        }
    }

    /// HTTP fetcher + nom-exif decoder, localized per the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Ok(Self::new(
            Box::new(fetcher),
            Box::new(NomExifDecoder::new()),
            Messages::new(config.locale),
        ))
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Process every candidate record in order, one entry per processable record.
    ///
    /// Records without a URL are skipped silently. A failing record yields a
    /// diagnostic entry in its own position and never stops the others.
    pub async fn build_report(&self, candidates: &[&Value], ctx: &FieldContext) -> Vec<String> {
        let mut entries = Vec::with_capacity(candidates.len());

        for record in candidates {
            let att = AttachmentRef::resolve(record);
            let Some(url) = att.url.as_deref() else {
                log::debug!("{ctx} Skipping attachment without URL: {}", att.name);
                continue;
            };

            log::info!("{ctx} Processing file: {}", att.name);
            let outcome = process_attachment(url, self.fetcher.as_ref(), self.decoder.as_ref()).await;

            match &outcome {
                Ok(tags) => log::info!("{ctx} {}: {} EXIF tags", att.name, tags.len()),
                Err(ItemError::NoMetadata) => log::info!("{ctx} {}: no EXIF data", att.name),
                Err(e) => log::error!("{ctx} Failed to process {}: {e}", att.name),
            }

            entries.push(render_outcome(&att.name, &outcome, &self.messages));
        }

        entries
    }

    /// Normalize the host's `file` value and build the report entries.
    ///
    /// Anything but a list is an invocation-level error.
    async fn collect_entries(&self, file: &Value, ctx: &FieldContext) -> Result<Vec<String>> {
        let Value::Array(items) = file else {
            anyhow::bail!("attachment input must be a list, got {}", json_kind(file));
        };
        let candidates = attachment::normalize(items);
        log::debug!("{ctx} {} candidate attachment(s) after normalization", candidates.len());
        Ok(self.build_report(&candidates, ctx).await)
    }

    /// Run one invocation: `params` is the host's `{ "file": [...] }` input.
    pub async fn execute(&self, params: &Value, ctx: &FieldContext) -> FieldResult {
        log::info!("{ctx} Starting EXIF extraction");

        let file = match params.get("file") {
            None | Some(Value::Null) => return self.nothing_selected(ctx),
            Some(Value::Array(items)) if items.is_empty() => return self.nothing_selected(ctx),
            Some(file) => file,
        };
        log::debug!("{ctx} Attachment input: {file}");

        match self.collect_entries(file, ctx).await {
            Ok(entries) if entries.is_empty() => {
                let none = self.messages.get(MessageKey::NoExifData);
                FieldResult::success(none, none)
            }
            Ok(entries) => FieldResult::success(
                entries.join("\n\n"),
                self.messages.get(MessageKey::ParseSuccess),
            ),
            Err(e) => self.failed(&e, ctx),
        }
    }

    /// [`execute`](Self::execute) under an overall deadline, if one is given.
    pub async fn execute_with_deadline(
        &self,
        params: &Value,
        ctx: &FieldContext,
        deadline: Option<Duration>,
    ) -> FieldResult {
        let Some(limit) = deadline else {
            return self.execute(params, ctx).await;
        };

        match tokio::time::timeout(limit, self.execute(params, ctx)).await {
            Ok(result) => result,
            Err(_) => {
                let err = anyhow::anyhow!("deadline of {}s exceeded", limit.as_secs_f64());
                self.failed(&err, ctx)
            }
        }
    }

    fn nothing_selected(&self, ctx: &FieldContext) -> FieldResult {
        log::warn!("{ctx} No attachments supplied");
        FieldResult::success(
            self.messages.get(MessageKey::NoFieldsSelected),
            self.messages.get(MessageKey::ErrorProcessing),
        )
    }

    fn failed(&self, err: &anyhow::Error, ctx: &FieldContext) -> FieldResult {
        log::error!("{ctx} Execution failed: {err:#}");
        let text = format!("{}: {err}", self.messages.get(MessageKey::ParseFailed));
        FieldResult::success(text.clone(), text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
