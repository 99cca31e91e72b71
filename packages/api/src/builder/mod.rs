//! Fluent request builder
//!
//! Split by concern: the core structure and `build`, headers and query
//! parameters, and body setters.

pub mod body;
pub mod core;
pub mod headers;

pub use core::RequestBuilder;
