//! Core types for multipart body handling
//!
//! Defines the multipart subtype tag, the body container and the part
//! structures shared by the part builder and the encoder.

use std::borrow::Cow;
use std::path::PathBuf;

use bytes::Bytes;
use http::HeaderMap;

/// Multipart subtype carried in the `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipartType {
    /// multipart/form-data
    #[default]
    Form,
    /// multipart/mixed
    Mixed,
    /// multipart/alternative
    Alternative,
    /// multipart/digest
    Digest,
    /// multipart/parallel
    Parallel,
}

impl MultipartType {
    /// Subtype token as written after `multipart/`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MultipartType::Form => "form-data",
            MultipartType::Mixed => "mixed",
            MultipartType::Alternative => "alternative",
            MultipartType::Digest => "digest",
            MultipartType::Parallel => "parallel",
        }
    }
}

/// A multipart request body.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub(crate) kind: MultipartType,
    pub(crate) boundary: String,
    pub(crate) parts: Vec<(Cow<'static, str>, Part)>,
}

/// A named fragment of a multipart body.
#[derive(Debug, Clone)]
pub struct Part {
    pub(crate) meta: PartMetadata,
    pub(crate) source: PartSource,
}

/// Where a part's payload comes from.
#[derive(Debug, Clone)]
pub(crate) enum PartSource {
    Text(Cow<'static, str>),
    Bytes(Bytes),
    /// Read from disk when the body is encoded
    File(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PartMetadata {
    pub(crate) content_type: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) headers: HeaderMap,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    /// Empty form-data body with a generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(super::boundary::generate_boundary())
    }

    /// Empty form-data body with a caller-chosen boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        MultipartBody {
            kind: MultipartType::Form,
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Set the multipart subtype.
    #[must_use]
    pub fn kind(mut self, kind: MultipartType) -> Self {
        self.kind = kind;
        self
    }

    /// Add a named part. Parts are encoded in insertion order.
    #[must_use]
    pub fn part<T>(mut self, name: T, part: Part) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        self.parts.push((name.into(), part));
        self
    }

    /// Add a plain text part.
    #[must_use]
    pub fn text<T, U>(self, name: T, value: U) -> Self
    where
        T: Into<Cow<'static, str>>,
        U: Into<Cow<'static, str>>,
    {
        self.part(name, Part::text(value))
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    #[must_use]
    pub fn multipart_type(&self) -> MultipartType {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Value for the request's `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/{};boundary={}", self.kind.as_str(), self.boundary)
    }
}
