//! Completed HTTP exchange
//!
//! A `Response<T>` carries the status, the received headers and a body that
//! has already been converted to `T`. It keeps a handle to the mapper of the
//! client that produced it so the body can be re-typed later.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderName};
use serde::de::DeserializeOwned;

use crate::error::{self, Result};
use crate::mapper::{self, Mapper};

/// HTTP response with a typed body.
#[derive(Clone)]
pub struct Response<T> {
    status: u16,
    headers: HeaderMap,
    body: T,
    mapper: Arc<dyn Mapper>,
}

impl<T> Response<T> {
    pub fn new(status: u16, headers: HeaderMap, body: T, mapper: Arc<dyn Mapper>) -> Self {
        Self {
            status,
            headers,
            body,
            mapper,
        }
    }

    /// Get the status code
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for any status in `200..=299`.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_body(self) -> T {
        self.body
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Distinct header names, lowercased, in first-seen order.
    #[must_use]
    pub fn header_names(&self) -> Vec<&HeaderName> {
        self.headers.keys().collect()
    }

    /// First value of a header, ignoring case. Values that are not visible
    /// ASCII are skipped.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(name)
            .iter()
            .find_map(|value| value.to_str().ok())
    }

    /// All values of a header, ignoring case, in received order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Mapper of the client that produced this response.
    #[must_use]
    pub fn mapper(&self) -> &Arc<dyn Mapper> {
        &self.mapper
    }

    /// Transform the body, keeping status and headers.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            status: self.status,
            headers: self.headers,
            body: f(self.body),
            mapper: self.mapper,
        }
    }
}

impl Response<String> {
    /// Deserialize the body when the status matches `expected`.
    ///
    /// # Errors
    ///
    /// - `UnexpectedResponse` carrying this response if the status differs
    /// - `Mapping` if the body cannot be read as `T`
    pub fn as_object<T: DeserializeOwned>(self, expected: u16) -> Result<T> {
        if self.status != expected {
            return Err(error::unexpected_response(self, expected));
        }
        mapper::from_json(self.mapper.as_ref(), &self.body)
    }

    /// Deserialize the body regardless of status.
    ///
    /// # Errors
    ///
    /// Returns a `Mapping` error if the body cannot be read as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        mapper::from_json(self.mapper.as_ref(), &self.body)
    }
}

impl Response<Bytes> {
    /// Decode the body as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn into_text(self) -> Response<String> {
        self.map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<T: fmt::Debug> fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
