use super::url::Url;
use crate::error::Result;

/// A trait to try to convert some type into a [`Url`].
///
/// This trait is "sealed", such that only types within curlew can
/// implement it.
pub trait IntoUrl: IntoUrlSealed {}

impl IntoUrl for Url {}
impl IntoUrl for ::url::Url {}
impl IntoUrl for String {}
impl IntoUrl for &str {}
impl IntoUrl for &String {}

pub trait IntoUrlSealed {
    /// # Errors
    ///
    /// Returns a `MalformedUrl` error if the value has no recognizable
    /// http(s) scheme and host.
    fn into_url(self) -> Result<Url>;
}

impl IntoUrlSealed for Url {
    fn into_url(self) -> Result<Url> {
        Ok(self)
    }
}

impl IntoUrlSealed for ::url::Url {
    fn into_url(self) -> Result<Url> {
        Url::parse(self.as_str())
    }
}

impl IntoUrlSealed for &str {
    fn into_url(self) -> Result<Url> {
        Url::parse(self)
    }
}

impl IntoUrlSealed for &String {
    fn into_url(self) -> Result<Url> {
        Url::parse(self)
    }
}

impl IntoUrlSealed for String {
    fn into_url(self) -> Result<Url> {
        Url::parse(&self)
    }
}
