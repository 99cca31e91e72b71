//! # Curlew client
//!
//! Building blocks of the curlew HTTP client: the URL model, body and
//! multipart encoders, the mapper seam, the hyper transport and the
//! dispatcher that runs exchanges on a shared tokio runtime.
//!
//! Most applications use the `curlew` crate, which layers the fluent
//! request builder on top of these types.

#![deny(unsafe_code)]
#![warn(clippy::all)]

use std::sync::{Arc, OnceLock};

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod mapper;
pub mod multipart;
pub mod transport;

pub mod prelude;

pub use crate::prelude::*;

/// Process-wide client with default configuration.
static GLOBAL_CLIENT: OnceLock<Arc<HttpClient>> = OnceLock::new();

/// Get the global client, creating it with [`ClientConfig::default`] on
/// first use.
pub fn global_client() -> Arc<HttpClient> {
    GLOBAL_CLIENT
        .get_or_init(|| Arc::new(HttpClient::default()))
        .clone()
}

/// Install a custom global client configuration.
///
/// # Errors
///
/// Returns `InvalidState` if the global client was already created.
pub fn init_global_client(config: ClientConfig) -> Result<()> {
    GLOBAL_CLIENT
        .set(Arc::new(HttpClient::new(config)))
        .map_err(|_| error::invalid_state("global client already initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_client_is_shared_and_fixed_after_first_use() {
        let first = global_client();
        let second = global_client();
        assert!(Arc::ptr_eq(&first, &second));

        let err = init_global_client(ClientConfig::default()).unwrap_err();
        assert!(err.is_invalid_state());
    }
}
