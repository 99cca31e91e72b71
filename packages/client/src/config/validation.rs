//! Configuration validation

use std::time::Duration;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidTimeout` - if timeout values are zero or exceed limits
    /// - `InvalidParameter` - if parameters are outside valid ranges
    fn validate(&self) -> ConfigResult<()>;
}

const MAX_TIMEOUT: Duration = Duration::from_secs(3600);
const MAX_USER_AGENT_LEN: usize = 1000;

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if:
    /// - The timeout duration is zero
    /// - The timeout duration exceeds 1 hour
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout > MAX_TIMEOUT {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed 1 hour"
            )));
        }

        Ok(())
    }

    /// Validate the User-Agent value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is empty,
    /// longer than 1000 characters, or not a legal header value.
    pub fn validate_user_agent(user_agent: &str) -> ConfigResult<()> {
        if user_agent.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "user agent cannot be empty".to_string(),
            ));
        }

        if user_agent.chars().count() > MAX_USER_AGENT_LEN {
            return Err(ConfigurationError::InvalidParameter(format!(
                "user agent must not exceed {MAX_USER_AGENT_LEN} characters"
            )));
        }

        if http::HeaderValue::from_str(user_agent).is_err() {
            return Err(ConfigurationError::InvalidParameter(
                "user agent is not a valid header value".to_string(),
            ));
        }

        Ok(())
    }
}
