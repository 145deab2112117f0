use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// One decoded metadata tag.
///
/// Decoders fill in whatever they have: a raw `value`, a human-readable
/// `description`, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text shown for this tag in a report.
    ///
    /// The description wins, then the raw value (strings unquoted), then the
    /// record itself serialized as JSON. Empty strings count as absent.
    pub fn display_value(&self) -> String {
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            return desc.to_string();
        }

        match &self.value {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                serde_json::to_string(self).unwrap_or_default()
            }
            Some(other) => other.to_string(),
        }
    }
}

/// Tag name → tag record for one decoded object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, tag: Tag) {
        self.0.insert(name.into(), tag);
    }

    /// Insert only if no tag of that name exists yet.
    pub fn insert_first(&mut self, name: impl Into<String>, tag: Tag) {
        self.0.entry(name.into()).or_insert(tag);
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Tag)> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Tag)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, Tag)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The decoder rejected the bytes (unknown container, corrupt data, ...).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct DecodeError(pub String);

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Turns raw file bytes into a [`TagSet`].
///
/// An object without embedded metadata decodes to an empty set, not an error.
pub trait ExifDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<TagSet, DecodeError>;
}
