use super::types::{Error, Kind};
use crate::http::Response;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for input that has no recognizable scheme://host prefix.
pub fn malformed_url<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::MalformedUrl).with(e.into())
}

/// Creates an `Error` for a rendered URL rejected by the `url` crate.
pub fn bad_url<E: Into<BoxError>>(e: E, url: impl Into<String>) -> Error {
    Error::new(Kind::BadUrl).with(e.into()).with_url(url)
}

/// Creates an `Error` for a violated builder or body precondition.
pub fn invalid_state<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidState).with(e.into())
}

/// Creates an `Error` for a serializer failure.
pub fn mapping<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Mapping).with(e.into())
}

/// Creates an `Error` for a transport failure on the typed path.
pub fn request_execution<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::RequestExecution).with(e.into())
}

/// Creates an `Error` for an exchange whose status did not match.
pub fn unexpected_response(response: Response<String>, expected: u16) -> Error {
    let actual = response.status();
    Error::new(Kind::UnexpectedResponse(Box::new(response))).with(format!(
        "expected status {expected}, got {actual}"
    ))
}

/// Creates an `Error` for a body that could not be produced.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}
