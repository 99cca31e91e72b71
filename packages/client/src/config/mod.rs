//! Client configuration
//!
//! `ClientConfig` holds the defaults shared by every request a client
//! builds: timeouts, the mapper, request logging and the User-Agent.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::mapper::{self, Mapper};

pub mod validation;

pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// Default connect timeout for the built-in transport.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("curlew/", env!("CARGO_PKG_VERSION"));

/// Shared, immutable client settings.
#[derive(Clone)]
pub struct ClientConfig {
    /// Timeout applied to requests that do not set their own
    pub request_timeout: Option<Duration>,
    /// TCP connect timeout of the built-in transport
    pub connect_timeout: Option<Duration>,
    /// Mapper used for JSON bodies and typed responses
    pub mapper: Arc<dyn Mapper>,
    /// Emit a `log::debug!` line for every request built
    pub logging_enabled: bool,
    pub user_agent: String,
}

impl ClientConfig {
    /// Start from the defaults.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use curlew_client::config::ClientConfig;
    ///
    /// let config = ClientConfig::builder()
    ///     .request_timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    /// ```
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig::default(),
        }
    }

    /// Effective timeout for a request carrying `request_override`.
    #[must_use]
    pub fn effective_timeout(&self, request_override: Option<Duration>) -> Option<Duration> {
        request_override.or(self.request_timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            mapper: mapper::default_mapper(),
            logging_enabled: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Validator for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(timeout) = self.request_timeout {
            ConfigValidator::validate_timeout(timeout, "request timeout")?;
        }
        if let Some(timeout) = self.connect_timeout {
            ConfigValidator::validate_timeout(timeout, "connect timeout")?;
        }
        ConfigValidator::validate_user_agent(&self.user_agent)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("mapper", &self.mapper)
            .field("logging_enabled", &self.logging_enabled)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for [`ClientConfig`]. Values are checked in [`build`](Self::build).
#[derive(Debug, Clone)]
#[must_use]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Disable the connect timeout of the built-in transport.
    pub fn no_connect_timeout(mut self) -> Self {
        self.config.connect_timeout = None;
        self
    }

    pub fn mapper(mut self, mapper: Arc<dyn Mapper>) -> Self {
        self.config.mapper = mapper;
        self
    }

    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.logging_enabled = enabled;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Validate and finish.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for a zero timeout, a timeout above one
    /// hour, or an unusable User-Agent.
    pub fn build(self) -> ConfigResult<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(30)));
        assert!(!config.logging_enabled);
        assert!(config.user_agent.starts_with("curlew/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn request_override_wins() {
        let config = ClientConfig::builder()
            .request_timeout(Duration::from_secs(4))
            .build()
            .unwrap();
        assert_eq!(config.effective_timeout(None), Some(Duration::from_secs(4)));
        assert_eq!(
            config.effective_timeout(Some(Duration::from_secs(10))),
            Some(Duration::from_secs(10))
        );
        assert_eq!(ClientConfig::default().effective_timeout(None), None);
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::builder().request_timeout(Duration::ZERO).build(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::builder().connect_timeout(Duration::from_secs(7200)).build(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::builder().user_agent("").build(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn builder_sets_everything() {
        let config = ClientConfig::builder()
            .no_connect_timeout()
            .mapper(mapper::json_mapper(true))
            .logging(true)
            .user_agent("tests/1.0")
            .build()
            .unwrap();
        assert_eq!(config.connect_timeout, None);
        assert!(config.logging_enabled);
        assert_eq!(config.user_agent, "tests/1.0");
    }
}
