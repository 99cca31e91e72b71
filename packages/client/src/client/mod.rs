//! HTTP client handle
//!
//! `HttpClient` pairs a validated [`ClientConfig`](crate::config::ClientConfig)
//! with a transport and runs descriptors through the dispatcher.

pub mod core;

pub use core::HttpClient;
