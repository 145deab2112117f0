//! # exif-report
//!
//! Fetch attachment URLs, read their embedded EXIF metadata, and render one
//! curated text report covering every attachment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_report::config::Config;
//! use exif_report::context::FieldContext;
//! use exif_report::pipeline::ReportPipeline;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!     let pipeline = ReportPipeline::from_config(&config)?;
//!
//!     // Host input: a list of attachment records, possibly nested one level
//!     let params = json!({
//!         "file": [
//!             [{ "name": "IMG_0001.jpg", "tmp_url": "https://example.com/IMG_0001.jpg" }],
//!             { "name": "scan.tif", "link": "https://example.com/scan.tif" }
//!         ]
//!     });
//!
//!     let result = pipeline.execute(&params, &FieldContext::default()).await;
//!     println!("{}", result.data);
//!     Ok(())
//! }
//! ```
//!
//! Each attachment contributes either a block like
//!
//! ```text
//! IMG_0001.jpg
//! Make: Canon
//! Model: EOS R5
//! ExposureTime: 1/250
//! FNumber: f/2.8
//! GPS: 40.712800, -74.006000
//! ```
//!
//! or a one-line diagnostic (`scan.tif: Failed to download attachment (404)`).
//! One attachment failing never stops the others.
//!
//! ## Modules
//!
//! - [`attachment`]: input flattening and URL/name resolution
//! - [`fetch`]: attachment download ([`fetch::Fetcher`] trait, reqwest implementation)
//! - [`exif`]: EXIF decoding into a uniform tag set
//! - [`format`]: per-attachment report block
//! - [`pipeline`]: per-item isolation and report aggregation
//! - [`i18n`]: localized messages
//! - [`context`]: host correlation fields for log lines
//! - [`config`]: configuration loading/saving

pub mod attachment;
pub mod config;
pub mod context;
pub mod exif;
pub mod fetch;
pub mod format;
pub mod i18n;
pub mod pipeline;
