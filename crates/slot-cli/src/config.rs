//! Environment-driven settings for the `slotkit` binary.

use chrono_tz::Tz;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Freelancer wall-clock zone used for "now" and for converting booking offsets.
    pub timezone: Tz,
}

impl Config {
    /// Reads `SLOTKIT_TIMEZONE` (default `UTC`). Logging is configured from
    /// `RUST_LOG` directly by the subscriber.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timezone_str = std::env::var("SLOTKIT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let timezone = timezone_str.parse::<Tz>().map_err(|_| {
            ConfigError::InvalidValue(
                "SLOTKIT_TIMEZONE".to_string(),
                format!("'{}' is not an IANA timezone", timezone_str),
            )
        })?;

        Ok(Self { timezone })
    }
}
