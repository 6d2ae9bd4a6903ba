use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_PATH: &str = "/etc/mailsend/mailsend.toml";
const ENV_PREFIX: &str = "MAILSEND";

pub const DEFAULT_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_PORT: u16 = 587;

/// SMTP submission endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// I/O timeout in seconds. Unset leaves the transport's default.
    pub timeout_secs: Option<u64>,
    /// Name to announce in EHLO. Unset uses the local hostname.
    pub hello_name: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: None,
            hello_name: None,
        }
    }
}

impl SmtpSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub smtp: SmtpSettings,
}

/// Loads settings from the filesystem and merges them with any
/// environment variables prefixed with MAILSEND_.
///
/// The file is optional. Nested keys are separated with a double
/// underscore in the environment, e.g. `MAILSEND_SMTP__PORT=2525`.
pub fn load_config(path: Option<&str>) -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name(path.unwrap_or(DEFAULT_PATH)).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
