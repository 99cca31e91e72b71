//! Core HTTP client implementation

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::dispatch::{self, Exchange, ResponseFuture};
use crate::http::RequestDescriptor;
use crate::transport::{HyperTransport, Transport};

/// Cheaply clonable client. Clones share the configuration and transport.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Client over the built-in hyper transport.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let transport = Arc::new(HyperTransport::new(config.connect_timeout));
        Self::with_transport(config, transport)
    }

    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Run `descriptor` and wait for the outcome.
    pub fn execute_blocking(&self, descriptor: RequestDescriptor) -> Exchange {
        let timeout = self.config.effective_timeout(descriptor.timeout());
        dispatch::send_blocking(
            Arc::clone(&self.transport),
            descriptor,
            timeout,
            Arc::clone(&self.config.mapper),
        )
    }

    /// Start `descriptor` on the shared runtime.
    pub fn execute(&self, descriptor: RequestDescriptor) -> ResponseFuture<Exchange> {
        let timeout = self.config.effective_timeout(descriptor.timeout());
        dispatch::send(
            Arc::clone(&self.transport),
            descriptor,
            timeout,
            Arc::clone(&self.config.mapper),
        )
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
