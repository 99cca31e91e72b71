//! Request body handling
//!
//! Raw bodies are taken as they are. JSON and form bodies are checked
//! immediately, so their failures surface on the chain itself.

use curlew_client::http::RequestBody;
use curlew_client::Result;
use serde::Serialize;

use crate::builder::core::RequestBuilder;

impl RequestBuilder {
    /// Set the body from text, bytes or a multipart body.
    ///
    /// # Examples
    /// ```no_run
    /// use curlew::{Curlew, MultipartBody, Part};
    ///
    /// let upload = MultipartBody::new()
    ///     .part("note", Part::text("hello").content_type("text/plain"))
    ///     .part("data", Part::file("/tmp/data.json"));
    ///
    /// let request = Curlew::new()
    ///     .post("http://localhost:8080/upload")
    ///     .body(upload)
    ///     .build();
    /// ```
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Mapping` if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(RequestBody::json(value)?);
        Ok(self)
    }

    /// Send ordered pairs as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if there are no pairs.
    pub fn form_data<I, K, V>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(RequestBody::form(pairs)?);
        Ok(self)
    }

    /// Send the fields of a struct or map as a form body.
    ///
    /// # Errors
    ///
    /// Returns `Mapping` if the value does not flatten to key/value pairs and
    /// `InvalidState` if it has no fields.
    pub fn form_object<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(RequestBody::form_from(value)?);
        Ok(self)
    }
}
