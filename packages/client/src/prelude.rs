//! Curlew client prelude
//!
//! The types most callers need when working with the client crate directly.

pub use crate::client::HttpClient;
pub use crate::config::{ClientConfig, ClientConfigBuilder, ConfigurationError};
pub use crate::dispatch::{DispatchError, ResponseFuture};
pub use crate::error::{Error, Kind, Result};
pub use crate::http::{EncodedBody, IntoUrl, RequestBody, RequestDescriptor, Response, Url};
pub use crate::mapper::{JsonMapper, Mapper, MappingError};
pub use crate::multipart::{MultipartBody, MultipartType, Part};
pub use crate::transport::{HttpsConnector, HyperTransport, Transport, TransportError, TransportRequest, TransportResponse};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
