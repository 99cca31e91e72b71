//! Immutable request description handed to the dispatcher

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method};

use super::body::EncodedBody;

/// Everything needed to perform one exchange.
///
/// The URL is already rendered and validated, the body already encoded.
/// A descriptor is fixed once constructed and only exposes accessors.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: ::url::Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    body: Option<EncodedBody>,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(
        method: Method,
        url: ::url::Url,
        headers: HeaderMap,
        timeout: Option<Duration>,
        body: Option<EncodedBody>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            timeout,
            body,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &::url::Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Per-request timeout, overriding the client default when set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub fn body(&self) -> Option<&EncodedBody> {
        self.body.as_ref()
    }

    /// Encoded payload bytes, empty when the request has no body.
    #[must_use]
    pub fn body_bytes(&self) -> Bytes {
        self.body
            .as_ref()
            .map(|body| body.bytes.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn constructor_keeps_every_part() {
        let url = ::url::Url::parse("http://localhost:8080/items").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-trace", HeaderValue::from_static("abc"));
        let body = EncodedBody {
            content_type: Some("text/plain".to_string()),
            bytes: Bytes::from_static(b"payload"),
        };

        let descriptor = RequestDescriptor::new(
            Method::PUT,
            url.clone(),
            headers,
            Some(Duration::from_secs(2)),
            Some(body),
        );

        assert_eq!(descriptor.method(), &Method::PUT);
        assert_eq!(descriptor.url(), &url);
        assert_eq!(descriptor.headers()["x-trace"], "abc");
        assert_eq!(descriptor.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(descriptor.body().and_then(|b| b.content_type.as_deref()), Some("text/plain"));
        assert_eq!(descriptor.body_bytes(), Bytes::from_static(b"payload"));
    }

    #[test]
    fn clones_are_independent_snapshots() {
        let url = ::url::Url::parse("http://localhost/").unwrap();
        let original = RequestDescriptor::new(Method::GET, url, HeaderMap::new(), None, None);
        let copy = original.clone();
        assert_eq!(copy.url(), original.url());
        assert!(copy.body().is_none());
        assert!(copy.body_bytes().is_empty());
    }
}
