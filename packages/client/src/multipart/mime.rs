//! Extension to MIME type lookup for file-backed parts

use std::path::Path;

pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Preferred MIME type for `extension`, ignoring case.
///
/// Among the candidates `mime_guess` knows, an `application/*` type wins
/// over a `text/*` alias, so `.xml` maps to `application/xml`.
#[must_use]
pub fn for_extension(extension: &str) -> Option<mime_guess::Mime> {
    let guess = mime_guess::from_ext(extension);
    guess
        .iter()
        .find(|mime| mime.type_() == mime_guess::mime::APPLICATION)
        .or_else(|| guess.first())
}

/// MIME type for a file path, `application/octet-stream` when unknown.
#[must_use]
pub fn for_path(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(for_extension)
        .map_or_else(|| APPLICATION_OCTET_STREAM.to_string(), |mime| mime.essence_str().to_string())
}
