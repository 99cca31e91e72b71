use std::error::Error as StdError;
use std::fmt;

use crate::http::Response;

/// A Result alias where the Err case is `curlew_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors raised while building, sending or mapping a request.
#[derive(Clone)]
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub url: Option<String>,
}

impl Clone for Inner {
    fn clone(&self) -> Self {
        Inner {
            kind: self.kind.clone(),
            source: None, // Cannot clone trait objects, so we lose the source
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Kind {
    /// Input could not be parsed into a scheme://host URL
    MalformedUrl,
    /// Rendered URL was rejected by the platform URL parser
    BadUrl,
    /// Builder or body precondition violated before any network attempt
    InvalidState,
    /// Serialization or deserialization failure
    Mapping,
    /// Transport failure or timeout while a typed result was requested
    RequestExecution,
    /// The exchange completed with a status other than the expected one
    UnexpectedResponse(Box<Response<String>>),
    /// A multipart file part could not be read
    Body,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None, url: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("curlew::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::MalformedUrl => f.write_str("malformed url")?,
            Kind::BadUrl => f.write_str("bad url")?,
            Kind::InvalidState => f.write_str("invalid request state")?,
            Kind::Mapping => f.write_str("mapping error")?,
            Kind::RequestExecution => f.write_str("error executing request")?,
            Kind::Body => f.write_str("request body error")?,
            Kind::UnexpectedResponse(response) => {
                write!(f, "unexpected response status ({})", response.status())?;
            }
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
