//! Core `RequestBuilder` structure
//!
//! The builder accumulates method, URL, headers, query parameters, timeout
//! and body. Problems that cannot be reported mid-chain are kept and
//! returned by [`RequestBuilder::build`].

use std::fmt;
use std::time::Duration;

use curlew_client::error::{self, Error, Result};
use curlew_client::http::{IntoUrl, RequestBody, RequestDescriptor, Url};
use curlew_client::HttpClient;
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method};

use crate::request::Request;

/// Fluent builder for a single request.
#[must_use = "a builder does nothing until `build` is called"]
pub struct RequestBuilder {
    pub(crate) client: HttpClient,
    pub(crate) method: Method,
    pub(crate) url: Result<Url>,
    pub(crate) headers: HeaderMap,
    pub(crate) timeout: Option<Duration>,
    pub(crate) body: Option<RequestBody>,
    /// First problem recorded on the chain, reported by `build`
    pub(crate) deferred: Option<Error>,
}

impl RequestBuilder {
    pub(crate) fn new<U: IntoUrl>(client: HttpClient, method: Method, url: U) -> Self {
        Self {
            client,
            method,
            url: url.into_url(),
            headers: HeaderMap::new(),
            timeout: None,
            body: None,
            deferred: None,
        }
    }

    /// Remember `err` unless an earlier problem is already recorded.
    pub(crate) fn defer(mut self, err: Error) -> Self {
        if self.deferred.is_none() {
            self.deferred = Some(err);
        }
        self
    }

    /// Timeout for this request, overriding the client default.
    ///
    /// A zero duration is reported by [`build`](Self::build).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if timeout.is_zero() {
            return self.defer(error::invalid_state("request timeout cannot be zero"));
        }
        self.timeout = Some(timeout);
        self
    }

    /// Finish the request.
    ///
    /// The body is encoded here, so multipart files are read at this point.
    /// `Content-Type` comes from the body unless set explicitly and the
    /// configured `User-Agent` is added when missing.
    ///
    /// # Errors
    ///
    /// - the first problem recorded on the chain
    /// - `MalformedUrl` / `BadUrl` for an unusable URL
    /// - `Mapping`, `InvalidState` or `Body` from body encoding
    pub fn build(self) -> Result<Request> {
        if let Some(err) = self.deferred {
            return Err(err);
        }

        let config = self.client.config();
        let url = self.url?.create()?;
        let mut headers = self.headers;

        let body = match &self.body {
            Some(body) => Some(body.encode(config.mapper.as_ref())?),
            None => None,
        };

        if let Some(content_type) = body.as_ref().and_then(|b| b.content_type.as_deref())
            && !headers.contains_key(CONTENT_TYPE)
        {
            let value = HeaderValue::from_str(content_type).map_err(error::invalid_state)?;
            headers.insert(CONTENT_TYPE, value);
        }

        if !headers.contains_key(USER_AGENT) {
            let value = HeaderValue::from_str(&config.user_agent).map_err(error::invalid_state)?;
            headers.insert(USER_AGENT, value);
        }

        if config.logging_enabled {
            log::debug!(
                "curlew: built {} {} ({} body bytes)",
                self.method,
                url,
                body.as_ref().map_or(0, |b| b.bytes.len())
            );
        }

        let descriptor = RequestDescriptor::new(self.method, url, headers, self.timeout, body);

        Ok(Request::new(self.client, descriptor))
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url.as_ref().map(ToString::to_string))
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("body", &self.body.is_some())
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}
