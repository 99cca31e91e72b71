//! # Curlew
//!
//! Fluent HTTP client. Build a request per call, then read it as text,
//! bytes or a typed value, blocking or as a future.
//!
//! ```no_run
//! use curlew::Curlew;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! let curlew = Curlew::new();
//!
//! let text = curlew
//!     .get("http://localhost:8080/users")
//!     .query_param("page", "1")
//!     .build()?
//!     .as_string();
//!
//! let user: User = curlew.get("http://localhost:8080/users/1").build()?.as_object(200)?;
//! # Ok::<(), curlew::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::Arc;

pub mod builder;
pub mod request;

pub use builder::RequestBuilder;
pub use request::Request;

pub use curlew_client::config::{ClientConfig, ClientConfigBuilder, ConfigurationError};
pub use curlew_client::dispatch::ResponseFuture;
pub use curlew_client::error::{Error, Kind, Result};
pub use curlew_client::http::{IntoUrl, RequestBody, RequestDescriptor, Response, Url};
pub use curlew_client::mapper::{self, JsonMapper, Mapper, MappingError};
pub use curlew_client::multipart::{MultipartBody, MultipartType, Part};
pub use curlew_client::transport::{
    HttpsConnector, HyperTransport, Transport, TransportError, TransportRequest, TransportResponse,
};
pub use curlew_client::HttpClient;

use http::Method;

/// Client entry point. Each method factory starts a new [`RequestBuilder`].
///
/// Clones share configuration and connection pool.
#[derive(Debug, Clone)]
pub struct Curlew {
    client: HttpClient,
}

impl Curlew {
    /// Client with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client with a custom configuration over the built-in transport.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            client: HttpClient::new(config),
        }
    }

    /// Client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: HttpClient::with_transport(config, transport),
        }
    }

    /// Handle on the process-wide default client.
    #[must_use]
    pub fn global() -> Self {
        Self {
            client: curlew_client::global_client().as_ref().clone(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// Start a request with any method.
    pub fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        RequestBuilder::new(self.client.clone(), method, url)
    }

    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub fn put<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    pub fn patch<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    pub fn delete<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    pub fn head<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::HEAD, url)
    }

    pub fn options<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::OPTIONS, url)
    }
}

impl Default for Curlew {
    fn default() -> Self {
        Self::new()
    }
}
