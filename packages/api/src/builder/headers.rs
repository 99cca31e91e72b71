//! Header and query parameter management
//!
//! Header names are case-insensitive. An invalid name or value is recorded
//! and reported when the request is built.

use curlew_client::error;
use http::{HeaderName, HeaderValue};

use crate::builder::core::RequestBuilder;

impl RequestBuilder {
    /// Set a header, replacing any earlier value for the same name.
    ///
    /// # Examples
    /// ```no_run
    /// use curlew::Curlew;
    ///
    /// let request = Curlew::new()
    ///     .get("http://localhost:8080/users")
    ///     .header("Accept", "application/json")
    ///     .build();
    /// ```
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match parse_header(key.as_ref(), value.as_ref()) {
            Ok((name, value)) => {
                self.headers.insert(name, value);
                self
            }
            Err(err) => self.defer(err),
        }
    }

    /// Add a header value, keeping earlier values for the same name.
    pub fn append_header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match parse_header(key.as_ref(), value.as_ref()) {
            Ok((name, value)) => {
                self.headers.append(name, value);
                self
            }
            Err(err) => self.defer(err),
        }
    }

    /// Set several headers at once. Later pairs win over earlier ones.
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (key, value)| builder.header(key, value))
    }

    /// Append a query parameter to the URL.
    pub fn query_param(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.url = self
            .url
            .map(|url| url.query_param(key.as_ref(), value.as_ref()));
        self
    }

    /// Append several query parameters in iteration order.
    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.url = self.url.map(|url| url.query_params(params));
        self
    }
}

fn parse_header(key: &str, value: &str) -> curlew_client::Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| error::invalid_state(format!("invalid header name '{key}': {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| error::invalid_state(format!("invalid value for header '{key}': {e}")))?;
    Ok((name, value))
}
