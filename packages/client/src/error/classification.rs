use std::error::Error as StdError;

use super::types::{Error, Kind};
use crate::http::Response;
use crate::dispatch::DispatchError;
use crate::transport::TransportError;

impl Error {
    /// Returns true if the input could not be parsed into a URL, or the
    /// rendered URL was rejected.
    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self.inner.kind, Kind::MalformedUrl | Kind::BadUrl)
    }

    /// Returns true if a builder or body precondition was violated.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidState)
    }

    /// Returns true if the error came from the serializer.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self.inner.kind, Kind::Mapping)
    }

    /// Returns true if the transport failed while a typed result was requested.
    #[must_use]
    pub fn is_request_execution(&self) -> bool {
        matches!(self.inner.kind, Kind::RequestExecution)
    }

    /// Returns true if the exchange completed with an unexpected status.
    #[must_use]
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self.inner.kind, Kind::UnexpectedResponse(_))
    }

    /// Returns true if a multipart part could not be read.
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self.inner.kind, Kind::Body)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(dispatch) = err.downcast_ref::<DispatchError>()
                && dispatch.is_timeout()
            {
                return true;
            }
            if let Some(transport) = err.downcast_ref::<TransportError>()
                && transport.is_timeout()
            {
                return true;
            }
            if let Some(io) = err.downcast_ref::<std::io::Error>()
                && io.kind() == std::io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// The response carried by an `UnexpectedResponse` error.
    #[must_use]
    pub fn response(&self) -> Option<&Response<String>> {
        match &self.inner.kind {
            Kind::UnexpectedResponse(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the status code, if the error was generated from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }
}
