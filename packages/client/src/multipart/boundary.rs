/// Generate boundary string for multipart bodies.
///
/// Best effort only: part payloads are not scanned for the token.
#[must_use]
pub fn generate_boundary() -> String {
    format!(
        "----curlew-boundary-{:016x}{:016x}",
        fastrand::u64(..),
        fastrand::u64(..)
    )
}
