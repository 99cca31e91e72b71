//! hyper-backed transport
//!
//! Wraps the hyper-util pooled client. Requests carry a `Full<Bytes>` body
//! and responses are collected completely before they are returned.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use futures::future::BoxFuture;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::Connect;
use hyper_util::rt::TokioExecutor;

use super::tls::HttpsConnector;
use super::{Transport, TransportError, TransportRequest, TransportResponse};

/// Transport over a pooled hyper client.
///
/// The default connector reaches both `http` and `https` URLs. Any other
/// hyper connector can be supplied through [`HyperTransport::with_connector`].
#[derive(Clone)]
pub struct HyperTransport<C = HttpsConnector> {
    client: Client<C, Full<Bytes>>,
}

impl HyperTransport<HttpsConnector> {
    /// Transport with the given connect timeout and the bundled TLS roots.
    #[must_use]
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        Self::with_connector(HttpsConnector::new(connect_timeout))
    }
}

impl<C> HyperTransport<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    pub fn with_connector(connector: C) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }
}

impl<C> fmt::Debug for HyperTransport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

impl<C> Transport for HyperTransport<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    fn execute(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'static, Result<TransportResponse, TransportError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let mut outgoing = http::Request::new(Full::new(request.body));
            *outgoing.method_mut() = request.method;
            *outgoing.uri_mut() = request.uri;
            *outgoing.headers_mut() = request.headers;

            let response = client.request(outgoing).await.map_err(classify)?;
            let (parts, body) = response.into_parts();
            let body = body
                .collect()
                .await
                .map_err(|e: hyper::Error| TransportError::Body(describe(&e)))?
                .to_bytes();

            Ok(TransportResponse {
                status: parts.status.as_u16(),
                headers: parts.headers,
                body,
            })
        })
    }
}

fn classify(err: hyper_util::client::legacy::Error) -> TransportError {
    if timed_out(&err) {
        TransportError::TimedOut
    } else if err.is_connect() {
        TransportError::Connect(describe(&err))
    } else {
        TransportError::Protocol(describe(&err))
    }
}

fn timed_out(err: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::TimedOut
        {
            return true;
        }
        source = current.source();
    }
    false
}

/// Render an error and its source chain on one line.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(current) = source {
        let next = current.to_string();
        if !text.contains(&next) {
            text.push_str(": ");
            text.push_str(&next);
        }
        source = current.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connect failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn describe_joins_the_source_chain() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"));
        assert_eq!(describe(&err), "connect failed: refused");
    }

    #[test]
    fn io_timeouts_are_found_in_the_chain() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"));
        assert!(timed_out(&err));
        let err = Outer(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert!(!timed_out(&err));
    }
}
