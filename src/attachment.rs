use serde_json::Value;

/// Display name used when a record carries no `name`.
pub const UNKNOWN_NAME: &str = "unknown";

/// Fields checked for the download location, highest priority first.
const URL_FIELDS: &[&str] = &["tmp_url", "url", "link"];

/// One attachment record resolved into something fetchable.
///
/// Records arrive as loosely shaped JSON from the host; only `name` and the
/// URL fields are read.
///
/// ```rust
/// use exif_report::attachment::AttachmentRef;
/// use serde_json::json;
///
/// let att = AttachmentRef::resolve(&json!({ "url": "https://x/a.jpg", "name": "a.jpg" }));
/// assert_eq!(att.url.as_deref(), Some("https://x/a.jpg"));
/// assert_eq!(att.name, "a.jpg");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentRef {
    /// `None` means the record cannot be processed and should be skipped.
    pub url: Option<String>,
    pub name: String,
}

impl AttachmentRef {
    pub fn resolve(record: &Value) -> Self {
        let url = URL_FIELDS
            .iter()
            .find_map(|field| non_empty_str(record, field))
            .map(str::to_string);
        let name = non_empty_str(record, "name")
            .unwrap_or(UNKNOWN_NAME)
            .to_string();

        Self { url, name }
    }
}

fn non_empty_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Flatten the host's attachment input by exactly one level.
///
/// The host may hand over several selected fields, each of them multi-valued,
/// so top-level elements are either arrays of records or single records.
/// Arrays are expanded in place, `null`s are dropped at both levels, and
/// relative order is kept. Nested arrays below the first level are passed
/// through untouched (they resolve to no URL later).
pub fn normalize(items: &[Value]) -> Vec<&Value> {
    let mut flat = Vec::with_capacity(items.len());

    for item in items {
        match item {
            Value::Null => {}
            Value::Array(inner) => flat.extend(inner.iter().filter(|v| !v.is_null())),
            other => flat.push(other),
        }
    }

    flat
}
