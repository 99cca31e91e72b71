//! Transport seam
//!
//! The dispatcher hands a [`TransportRequest`] to a [`Transport`] and gets a
//! fully collected [`TransportResponse`] back. The default implementation
//! is [`HyperTransport`]; tests and embedders can plug in their own.

use std::fmt;

use bytes::Bytes;
use futures::future::BoxFuture;
use http::{HeaderMap, Method, Uri};

use crate::http::RequestDescriptor;

pub mod hyper_transport;
pub mod tls;

pub use hyper_transport::HyperTransport;
pub use tls::{HttpsConnector, MaybeTlsStream};

/// Wire-level failure reported by a transport.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("operation timed out")]
    TimedOut,
}

impl TransportError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::TimedOut)
    }

    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

/// Request in the shape a transport consumes.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TransportRequest {
    /// Convert a descriptor, rejecting URLs `http::Uri` cannot hold.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` for an unrepresentable URI.
    pub fn from_descriptor(descriptor: &RequestDescriptor) -> Result<Self, TransportError> {
        let uri = descriptor
            .url()
            .as_str()
            .parse::<Uri>()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            method: descriptor.method().clone(),
            uri,
            headers: descriptor.headers().clone(),
            body: descriptor.body_bytes(),
        })
    }
}

/// Status, headers and the complete body of a finished exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Performs one HTTP exchange.
pub trait Transport: Send + Sync + fmt::Debug {
    fn execute(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'static, Result<TransportResponse, TransportError>>;
}
