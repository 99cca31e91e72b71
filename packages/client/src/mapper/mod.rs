//! Pluggable JSON mapping
//!
//! The client never talks to `serde_json` directly when it turns payloads
//! into text or back. It goes through a [`Mapper`] held by the client
//! configuration, so applications can swap in their own formatting or
//! parsing rules. Typed conversion happens on `serde_json::Value`, which
//! keeps the trait object-safe.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{self, Result};

/// Failure reported by a [`Mapper`]
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("failed to write value: {0}")]
    Write(#[source] serde_json::Error),

    #[error("failed to read value: {0}")]
    Read(#[source] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Serializer capability injected into the client configuration.
pub trait Mapper: Send + Sync + fmt::Debug {
    /// Render a JSON value as text.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if the value cannot be written.
    fn write_value(&self, value: &serde_json::Value) -> std::result::Result<String, MappingError>;

    /// Parse text into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if the text is not valid JSON for this mapper.
    fn read_value(&self, text: &str) -> std::result::Result<serde_json::Value, MappingError>;
}

/// Default mapper backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMapper {
    pretty: bool,
}

impl JsonMapper {
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Mapper that writes indented JSON.
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Mapper for JsonMapper {
    fn write_value(&self, value: &serde_json::Value) -> std::result::Result<String, MappingError> {
        let written = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        written.map_err(MappingError::Write)
    }

    fn read_value(&self, text: &str) -> std::result::Result<serde_json::Value, MappingError> {
        serde_json::from_str(text).map_err(MappingError::Read)
    }
}

/// The mapper used when a configuration does not name one.
#[must_use]
pub fn default_mapper() -> Arc<dyn Mapper> {
    Arc::new(JsonMapper::new())
}

/// A `serde_json` mapper, compact or indented.
#[must_use]
pub fn json_mapper(pretty: bool) -> Arc<dyn Mapper> {
    Arc::new(JsonMapper { pretty })
}

/// Serialize `value` to text through `mapper`.
///
/// # Errors
///
/// Returns a `Mapping` error if the value cannot be represented as JSON or
/// the mapper rejects it.
pub fn to_json<T: Serialize + ?Sized>(mapper: &dyn Mapper, value: &T) -> Result<String> {
    let value = serde_json::to_value(value)
        .map_err(MappingError::Write)
        .map_err(error::mapping)?;
    mapper.write_value(&value).map_err(error::mapping)
}

/// Deserialize `text` into `T` through `mapper`.
///
/// # Errors
///
/// Returns a `Mapping` error if the text cannot be parsed or does not match `T`.
pub fn from_json<T: DeserializeOwned>(mapper: &dyn Mapper, text: &str) -> Result<T> {
    let value = mapper.read_value(text).map_err(error::mapping)?;
    serde_json::from_value(value)
        .map_err(MappingError::Read)
        .map_err(error::mapping)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        email: String,
        user_id: u64,
        tags: Vec<String>,
    }

    fn user() -> User {
        User {
            email: "ada@example.com".to_string(),
            user_id: 7,
            tags: vec!["admin".to_string(), "ops".to_string()],
        }
    }

    #[test]
    fn object_survives_write_then_read() {
        let mapper = JsonMapper::new();
        let text = to_json(&mapper, &user()).unwrap();
        let back: User = from_json(&mapper, &text).unwrap();
        assert_eq!(back, user());
    }

    #[test]
    fn pretty_mapper_indents() {
        let text = to_json(&JsonMapper::pretty(), &user()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("  \"email\""));
    }

    #[test]
    fn non_json_text_is_a_mapping_error() {
        let err = from_json::<User>(&JsonMapper::new(), "not a json string").unwrap_err();
        assert!(err.is_mapping());
    }

    #[test]
    fn shape_mismatch_is_a_mapping_error() {
        let err = from_json::<User>(&JsonMapper::new(), r#"{"email":"x"}"#).unwrap_err();
        assert!(err.is_mapping());
    }

    #[test]
    fn non_string_map_keys_fail_to_write() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "tuple key");
        let err = to_json(&JsonMapper::new(), &map).unwrap_err();
        assert!(err.is_mapping());
    }
}
