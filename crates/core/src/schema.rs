//! Path-aware access to raw content JSON.
//!
//! Format normalizers read the untyped tree through [`SchemaReader`], which
//! validates each page or element against a typed record and reports any
//! mismatch as a [`StructuralError`] naming the JSON path, page and format.

use crate::error::StructuralError;
use crate::types::ContentFormat;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Location of a value inside a raw document, e.g. `presentation.slides[0].elements`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(String);

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of an object member below this one.
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }

    /// Path of an array item below this one.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        if self.0.is_empty() {
            "$"
        } else {
            &self.0
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads required values for one format, optionally scoped to one page.
#[derive(Debug, Clone, Copy)]
pub struct SchemaReader {
    format: ContentFormat,
    page: Option<usize>,
}

impl SchemaReader {
    pub fn new(format: ContentFormat) -> Self {
        Self { format, page: None }
    }

    /// Reader whose errors are attributed to the given zero-based page.
    pub fn for_page(&self, page: usize) -> Self {
        Self {
            format: self.format,
            page: Some(page),
        }
    }

    pub fn format(&self) -> ContentFormat {
        self.format
    }

    pub fn error(&self, path: &JsonPath, message: impl Into<String>) -> StructuralError {
        StructuralError::new(self.format, self.page, path.as_str(), message)
    }

    /// Required object member.
    pub fn field<'a>(
        &self,
        value: &'a Value,
        path: &JsonPath,
        key: &str,
    ) -> Result<&'a Value, StructuralError> {
        let object = value
            .as_object()
            .ok_or_else(|| self.error(path, format!("expected an object, found {}", kind(value))))?;
        object
            .get(key)
            .ok_or_else(|| self.error(path, format!("missing field `{}`", key)))
    }

    /// Required array member.
    pub fn array<'a>(
        &self,
        value: &'a Value,
        path: &JsonPath,
        key: &str,
    ) -> Result<&'a [Value], StructuralError> {
        let member = self.field(value, path, key)?;
        member.as_array().map(Vec::as_slice).ok_or_else(|| {
            self.error(
                &path.key(key),
                format!("expected an array, found {}", kind(member)),
            )
        })
    }

    /// Validate a value against a typed record.
    pub fn record<'a, T>(&self, value: &'a Value, path: &JsonPath) -> Result<T, StructuralError>
    where
        T: Deserialize<'a>,
    {
        T::deserialize(value).map_err(|e| self.error(path, e.to_string()))
    }
}

/// Name of a JSON value's type, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                E::invalid_value(de::Unexpected::Str(&s), &"a number or numeric string")
            }),
        }
    }
}

/// Deserialize a geometry value written either as a JSON number or as a
/// numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?.into_f64()
}

/// Like [`number`], with `null` read as `None`. Pair with `#[serde(default)]`
/// so an absent member is `None` too.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(NumberOrText::into_f64)
        .transpose()
}
