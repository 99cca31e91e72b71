//! Executable request
//!
//! A `Request` is a frozen descriptor bound to a client. Each call performs
//! exactly one exchange; calling twice sends the request twice.
//!
//! The text and bytes methods collapse timeouts and transport failures into
//! `None`. The typed methods report them as `RequestExecution` errors.

use bytes::Bytes;
use curlew_client::dispatch::{self, Exchange, ResponseFuture};
use curlew_client::http::{RequestDescriptor, Response};
use curlew_client::{HttpClient, Result};
use serde::de::DeserializeOwned;

/// Built request, ready to send.
#[derive(Debug, Clone)]
pub struct Request {
    client: HttpClient,
    descriptor: RequestDescriptor,
}

impl Request {
    pub(crate) fn new(client: HttpClient, descriptor: RequestDescriptor) -> Self {
        Self { client, descriptor }
    }

    /// The immutable description this request sends.
    #[must_use]
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    fn send_blocking(&self) -> Exchange {
        self.client.execute_blocking(self.descriptor.clone())
    }

    fn send(&self) -> ResponseFuture<Exchange> {
        self.client.execute(self.descriptor.clone())
    }

    /// Send and decode the body as text.
    #[must_use]
    pub fn as_string(&self) -> Option<Response<String>> {
        dispatch::into_absent(self.send_blocking()).map(Response::into_text)
    }

    /// Send and keep the body as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> Option<Response<Bytes>> {
        dispatch::into_absent(self.send_blocking())
    }

    /// Send and deserialize the body when the status is `expected_status`.
    ///
    /// # Errors
    ///
    /// - `RequestExecution` on timeout or transport failure
    /// - `UnexpectedResponse` on a different status
    /// - `Mapping` if the body does not deserialize into `T`
    pub fn as_object<T: DeserializeOwned>(&self, expected_status: u16) -> Result<T> {
        let url = self.descriptor.url().to_string();
        dispatch::into_execution_error(self.send_blocking(), &url)?
            .into_text()
            .as_object(expected_status)
    }

    /// Send and transform the text body.
    pub fn map<U, F>(&self, f: F) -> Option<Response<U>>
    where
        F: FnOnce(String) -> U,
    {
        self.as_string().map(|response| response.map(f))
    }

    /// Non-blocking [`as_string`](Self::as_string).
    pub fn async_as_string(&self) -> ResponseFuture<Option<Response<String>>> {
        self.send()
            .map(|outcome| dispatch::into_absent(outcome).map(Response::into_text))
    }

    /// Non-blocking [`as_bytes`](Self::as_bytes).
    pub fn async_as_bytes(&self) -> ResponseFuture<Option<Response<Bytes>>> {
        self.send().map(dispatch::into_absent)
    }

    /// Non-blocking [`as_object`](Self::as_object).
    pub fn async_as_object<T>(&self, expected_status: u16) -> ResponseFuture<Result<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.descriptor.url().to_string();
        self.send().map(move |outcome| {
            dispatch::into_execution_error(outcome, &url)?
                .into_text()
                .as_object(expected_status)
        })
    }

    /// Non-blocking [`map`](Self::map).
    pub fn async_map<U, F>(&self, f: F) -> ResponseFuture<Option<Response<U>>>
    where
        U: Send + 'static,
        F: FnOnce(String) -> U + Send + 'static,
    {
        self.async_as_string()
            .map(move |response| response.map(|response| response.map(f)))
    }
}
