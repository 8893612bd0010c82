use chrono::{FixedOffset, Offset, Utc};
use rental_client::config::{ClientConfig, ConfigError};

/// Admin panel configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Car API transport settings.
    pub client: ClientConfig,
    /// Offset card timestamps are rendered in.
    pub display_offset: FixedOffset,
}

impl AdminConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `DISPLAY_UTC_OFFSET` | `0`     |
    ///
    /// plus the variables read by [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = ClientConfig::from_lookup(&lookup)?;

        let display_offset = match lookup("DISPLAY_UTC_OFFSET") {
            Some(raw) => {
                let parsed = raw
                    .trim()
                    .parse::<i32>()
                    .ok()
                    .filter(|hours| (-12..=14).contains(hours))
                    .and_then(|hours| FixedOffset::east_opt(hours * 3600));
                parsed.ok_or(ConfigError {
                    var: "DISPLAY_UTC_OFFSET",
                    value: raw,
                    expected: "a whole hour offset between -12 and 14",
                })?
            }
            None => utc(),
        };

        Ok(Self {
            client,
            display_offset,
        })
    }
}

/// The zero offset.
pub fn utc() -> FixedOffset {
    Utc.fix()
}
