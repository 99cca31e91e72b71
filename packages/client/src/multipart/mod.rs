//! multipart bodies
//!
//! Provides `MultipartBody` and `Part` for building multipart requests of
//! any subtype, with file parts read lazily and content types detected from
//! file extensions.

mod boundary;
mod form;
pub mod mime;
mod part;
mod types;

pub use boundary::generate_boundary;
pub use types::{MultipartBody, MultipartType, Part};
