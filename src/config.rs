use core::str::FromStr;

use spin::Once;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding the log level (`off`, `error`, `warn`,
/// `info`, `debug` or `trace`).
pub const LOG_ENV_VAR: &str = "ALLOC_HOOKS_LOG";

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::OFF;

/// Accounting domain name, used in log lines.
pub const DOMAIN_NAME: &str = "hunspell";

pub const REPORT_PATH: &str = "explicit/spell-check";

pub const REPORT_DESCRIPTION: &str = "Memory used by the spell-checking engine.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    /// A log level that was set but could not be parsed.
    pub rejected_log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            rejected_log_level: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        match std::env::var(LOG_ENV_VAR) {
            Ok(value) => Self::from_log_level(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn from_log_level(value: &str) -> Self {
        match LevelFilter::from_str(value.trim()) {
            Ok(log_level) => Self {
                log_level,
                rejected_log_level: None,
            },
            Err(_) => Self {
                rejected_log_level: Some(value.to_owned()),
                ..Self::default()
            },
        }
    }
}

static CONFIG: Once<Config> = Once::new();

/// Process configuration, read from the environment on first use.
pub fn config() -> &'static Config {
    CONFIG.call_once(Config::from_env)
}
