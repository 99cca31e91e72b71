//! Request body encoding
//!
//! `RequestBody` is the logical payload handed to a request builder. It is
//! turned into bytes plus an optional `Content-Type` by [`RequestBody::encode`].

use bytes::Bytes;
use serde::Serialize;

use crate::error::{self, Result};
use crate::mapper::Mapper;
use crate::multipart::MultipartBody;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Logical request payload.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Text sent as-is
    Text(String),
    /// Raw bytes sent as-is
    Bytes(Bytes),
    /// Structured value written through the configured mapper
    Json(serde_json::Value),
    /// Ordered form pairs, never empty
    Form(Vec<(String, String)>),
    /// Multipart parts
    Multipart(MultipartBody),
}

/// Transport-ready payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl RequestBody {
    /// JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns a `Mapping` error if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(error::mapping)
    }

    /// Form body from ordered key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if there are no pairs.
    pub fn form<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        if pairs.is_empty() {
            return Err(error::invalid_state("form data requires at least one pair"));
        }
        Ok(RequestBody::Form(pairs))
    }

    /// Form body flattened from a struct or map with `serde_urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns a `Mapping` error if the value does not flatten to pairs and
    /// an `InvalidState` error if it flattens to none.
    pub fn form_from<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(value).map_err(error::mapping)?;
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(&encoded).map_err(error::mapping)?;
        Self::form(pairs)
    }

    /// Turn the payload into bytes and the matching content type.
    ///
    /// # Errors
    ///
    /// - `Mapping` if the mapper rejects a JSON value
    /// - `InvalidState` for an empty form
    /// - `Body` if a multipart file cannot be read
    pub fn encode(&self, mapper: &dyn Mapper) -> Result<EncodedBody> {
        match self {
            RequestBody::Text(text) => Ok(EncodedBody {
                content_type: None,
                bytes: Bytes::from(text.clone()),
            }),
            RequestBody::Bytes(bytes) => Ok(EncodedBody {
                content_type: None,
                bytes: bytes.clone(),
            }),
            RequestBody::Json(value) => {
                let text = mapper.write_value(value).map_err(error::mapping)?;
                Ok(EncodedBody {
                    content_type: Some(APPLICATION_JSON.to_string()),
                    bytes: Bytes::from(text),
                })
            }
            RequestBody::Form(pairs) => {
                if pairs.is_empty() {
                    return Err(error::invalid_state("form data requires at least one pair"));
                }
                let text = serde_urlencoded::to_string(pairs).map_err(error::mapping)?;
                Ok(EncodedBody {
                    content_type: Some(APPLICATION_FORM_URLENCODED.to_string()),
                    bytes: Bytes::from(text),
                })
            }
            RequestBody::Multipart(body) => Ok(EncodedBody {
                content_type: Some(body.content_type()),
                bytes: body.encode()?,
            }),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for RequestBody {
    fn from(bytes: &[u8]) -> Self {
        RequestBody::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<MultipartBody> for RequestBody {
    fn from(body: MultipartBody) -> Self {
        RequestBody::Multipart(body)
    }
}
