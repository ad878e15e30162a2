//! Document sources: where raw content JSON comes from.

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

/// Top-level keys that never carry page content and are removed before parsing.
pub const RESERVED_KEYS: &[&str] = &["l10n", "override"];

/// Anything that can produce the raw content document.
///
/// Retry and cancellation, if any, belong to the implementation.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable location used in logs and errors.
    fn location(&self) -> &str;

    /// Fetch and parse the content document.
    async fn fetch(&self) -> Result<Value, FetchError>;
}

/// Remove the localization and override blocks from a raw document.
///
/// Non-object documents are left untouched.
pub fn strip_reserved_keys(raw: &mut Value) {
    if let Some(root) = raw.as_object_mut() {
        for key in RESERVED_KEYS {
            if root.remove(*key).is_some() {
                log::debug!("Stripped reserved key '{}'", key);
            }
        }
    }
}

/// Content document already held in memory as JSON text.
#[derive(Debug, Clone)]
pub struct JsonSource {
    location: String,
    body: String,
}

impl JsonSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            location: "<memory>".to_string(),
            body: body.into(),
        }
    }

    /// Set the location reported in logs and errors.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

#[async_trait]
impl DocumentSource for JsonSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        serde_json::from_str(&self.body).map_err(|source| FetchError::MalformedJson {
            location: self.location.clone(),
            source,
        })
    }
}
