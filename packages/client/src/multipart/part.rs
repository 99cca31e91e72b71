//! Part implementation for multipart fields
//!
//! Handles Part creation and per-part configuration. File-backed parts only
//! remember their path here; the file is read by the encoder.

use std::borrow::Cow;
use std::path::PathBuf;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};

use super::types::{Part, PartMetadata, PartSource};

impl Part {
    /// Makes a text parameter.
    pub fn text<T>(value: T) -> Part
    where
        T: Into<Cow<'static, str>>,
    {
        Part::new(PartSource::Text(value.into()))
    }

    /// Makes a new parameter from arbitrary bytes.
    pub fn bytes<T>(value: T) -> Part
    where
        T: Into<Bytes>,
    {
        Part::new(PartSource::Bytes(value.into()))
    }

    /// Makes a file parameter. The file name defaults to the last path
    /// component and the content type to the extension lookup.
    pub fn file<P>(path: P) -> Part
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let part = Part::new(PartSource::File(path));
        match file_name {
            Some(name) => part.file_name(name),
            None => part,
        }
    }

    fn new(source: PartSource) -> Part {
        Part {
            meta: PartMetadata::default(),
            source,
        }
    }

    /// Sets the content type, overriding extension detection.
    #[must_use]
    pub fn content_type(self, content_type: impl Into<String>) -> Part {
        let content_type = content_type.into();
        self.with_inner(move |mut meta| {
            meta.content_type = Some(content_type);
            meta
        })
    }

    /// Sets the filename, builder style.
    #[must_use]
    pub fn file_name(self, file_name: impl Into<String>) -> Part {
        let file_name = file_name.into();
        self.with_inner(move |mut meta| {
            meta.file_name = Some(file_name);
            meta
        })
    }

    /// Adds a custom header emitted after `Content-Type`.
    #[must_use]
    pub fn header(self, name: HeaderName, value: HeaderValue) -> Part {
        self.with_inner(move |mut meta| {
            meta.headers.append(name, value);
            meta
        })
    }

    /// Replaces the custom headers for the part.
    #[must_use]
    pub fn headers(self, headers: HeaderMap) -> Part {
        self.with_inner(move |mut meta| {
            meta.headers = headers;
            meta
        })
    }

    fn with_inner<F>(self, func: F) -> Self
    where
        F: FnOnce(PartMetadata) -> PartMetadata,
    {
        Part {
            meta: func(self.meta),
            source: self.source,
        }
    }

    /// Content type that will be written for this part, if any.
    ///
    /// An explicit value wins, file-backed parts are guessed from their
    /// extension, other parts have none.
    #[must_use]
    pub fn resolved_content_type(&self) -> Option<Cow<'_, str>> {
        if let Some(content_type) = &self.meta.content_type {
            return Some(Cow::Borrowed(content_type));
        }
        match &self.source {
            PartSource::File(path) => Some(Cow::Owned(super::mime::for_path(path))),
            PartSource::Text(_) | PartSource::Bytes(_) => None,
        }
    }

    #[must_use]
    pub fn file_name_ref(&self) -> Option<&str> {
        self.meta.file_name.as_deref()
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self.source, PartSource::File(_))
    }
}
