//! HTTP model types
//!
//! URL model, request bodies, the request descriptor and the response
//! wrapper.

pub mod body;
pub mod into_url;
pub mod request;
pub mod response;
pub mod url;

pub use body::{APPLICATION_FORM_URLENCODED, APPLICATION_JSON, EncodedBody, RequestBody};
pub use into_url::IntoUrl;
pub use request::RequestDescriptor;
pub use response::Response;
pub use url::Url;
