//! Immutable URL model with slash-tolerant normalization
//!
//! `Url` keeps scheme, host, path segments and query pairs as separate
//! parts and renders them on demand. Every transformation returns a new
//! value and leaves the receiver untouched.

use std::fmt;

use crate::error::{self, Result};

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

const HOST_DELIMITERS: [char; 3] = ['/', '?', '#'];

/// A single query pair. The value is absent for bare keys such as `?flag`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryPair {
    key: String,
    value: Option<String>,
}

/// URL assembled from scheme, host, path segments and query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    scheme: String,
    host: String,
    segments: Vec<String>,
    query: Vec<QueryPair>,
}

impl Url {
    /// Parse a complete URL string.
    ///
    /// Stray whitespace and leading slashes are trimmed and repeated
    /// slashes in the path collapse. Query pairs already present are kept
    /// as written, fragments are dropped.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedUrl` error if no `http://` or `https://` prefix
    /// followed by a host can be located.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_start_matches('/');
        let Some((scheme, rest)) = trimmed.split_once("://") else {
            return Err(error::malformed_url(format!("missing scheme in '{raw}'")));
        };
        let scheme = normalize_scheme(scheme)
            .ok_or_else(|| error::malformed_url(format!("unsupported scheme in '{raw}'")))?;

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (location, query) = match rest.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (rest, None),
        };

        let location = location.trim_start_matches('/');
        let (host, path) = location.split_once('/').unwrap_or((location, ""));
        let host = host.trim();
        if host.is_empty() {
            return Err(error::malformed_url(format!("missing host in '{raw}'")));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            segments: split_segments(path),
            query: query.map(parse_query).unwrap_or_default(),
        })
    }

    /// Build a URL from separate scheme and host tokens.
    ///
    /// Each token is cleaned independently: whitespace, slashes and colons
    /// around the scheme, whitespace and slashes around the host. Paths and
    /// queries are added afterwards, so the cleaned host must not contain
    /// `/`, `?` or `#`.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedUrl` error for an unsupported scheme, an empty
    /// host, or a host carrying a URL delimiter.
    pub fn from_parts(scheme: &str, host: &str) -> Result<Self> {
        let scheme_token =
            scheme.trim_matches(|c: char| c.is_whitespace() || c == '/' || c == ':');
        let scheme = normalize_scheme(scheme_token)
            .ok_or_else(|| error::malformed_url(format!("unsupported scheme '{scheme}'")))?;

        let host = host.trim_matches(|c: char| c.is_whitespace() || c == '/');
        if host.is_empty() {
            return Err(error::malformed_url("missing host"));
        }
        if host.contains(HOST_DELIMITERS) {
            return Err(error::malformed_url(format!(
                "host '{host}' must not contain '/', '?' or '#'"
            )));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            segments: Vec::new(),
            query: Vec::new(),
        })
    }

    /// Append one or more path segments.
    ///
    /// Surrounding whitespace and slashes are stripped, internal slashes
    /// split the input into several segments, and empty pieces are skipped.
    /// A `?` or `#` inside a segment is percent-encoded and stays part of
    /// the path.
    #[must_use]
    pub fn path(&self, segment: &str) -> Self {
        let mut next = self.clone();
        next.segments.extend(split_segments(segment));
        next
    }

    /// Append a query pair, percent-encoding key and value.
    #[must_use]
    pub fn query_param(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.push_query(key, value);
        next
    }

    /// Append several query pairs in iteration order.
    #[must_use]
    pub fn query_params<I, K, V>(&self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut next = self.clone();
        for (key, value) in params {
            next.push_query(key.as_ref(), value.as_ref());
        }
        next
    }

    fn push_query(&mut self, key: &str, value: &str) {
        self.query.push(QueryPair {
            key: urlencoding::encode(key).into_owned(),
            value: Some(urlencoding::encode(value).into_owned()),
        });
    }

    /// Validate the rendered URL with the `url` crate.
    ///
    /// # Errors
    ///
    /// Returns a `BadUrl` error if the rendered string is not a valid
    /// http(s) URL.
    pub fn create(&self) -> Result<::url::Url> {
        let rendered = self.to_string();
        let parsed = ::url::Url::parse(&rendered).map_err(|e| error::bad_url(e, rendered.clone()))?;
        if !SUPPORTED_SCHEMES.contains(&parsed.scheme()) {
            return Err(error::bad_url(
                format!("unsupported scheme '{}'", parsed.scheme()),
                rendered,
            ));
        }
        Ok(parsed)
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Query pairs in insertion order, as encoded on the wire.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.query
            .iter()
            .map(|pair| (pair.key.as_str(), pair.value.as_deref()))
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        for (index, pair) in self.query.iter().enumerate() {
            f.write_str(if index == 0 { "?" } else { "&" })?;
            f.write_str(&pair.key)?;
            if let Some(value) = &pair.value {
                write!(f, "={value}")?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Url {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s)
    }
}

fn normalize_scheme(token: &str) -> Option<String> {
    let scheme = token.trim().to_ascii_lowercase();
    SUPPORTED_SCHEMES.contains(&scheme.as_str()).then_some(scheme)
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(escape_delimiters)
        .collect()
}

fn escape_delimiters(segment: &str) -> String {
    segment.replace('?', "%3F").replace('#', "%23")
}

fn parse_query(query: &str) -> Vec<QueryPair> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => QueryPair {
                key: key.to_string(),
                value: Some(value.to_string()),
            },
            None => QueryPair {
                key: pair.to_string(),
                value: None,
            },
        })
        .collect()
}
