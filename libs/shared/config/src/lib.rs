use std::env;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::warn;

/// Hours scanned ahead when running with production defaults.
pub const PRODUCTION_HOURS_TO_CHECK: u32 = 1;

/// Simulated "now" used when test mode is on and no override is given.
pub const DEFAULT_TEST_TIME: &str = "2025-04-24T10:00:00-07:00";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub healthie_api_url: String,
    pub healthie_api_key: String,
    pub time_window: TimeWindowConfig,
}

/// Controls which appointments are admitted and how messages are framed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindowConfig {
    /// Use `test_time` instead of the wall clock as the window start.
    pub use_test_mode: bool,
    pub hours_to_check: u32,
    pub test_time: DateTime<Utc>,
    /// Offset used when rendering appointment times for humans. `None`
    /// follows the host time zone for each date.
    pub display_offset: Option<FixedOffset>,
}

impl Default for TimeWindowConfig {
    fn default() -> Self {
        Self {
            use_test_mode: false,
            hours_to_check: PRODUCTION_HOURS_TO_CHECK,
            test_time: default_test_time(),
            display_offset: None,
        }
    }
}

impl TimeWindowConfig {
    /// Production defaults are real time with the one hour window. Anything
    /// else produces messages labelled as test output.
    pub fn is_production_defaults(&self) -> bool {
        !self.use_test_mode && self.hours_to_check == PRODUCTION_HOURS_TO_CHECK
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            use_test_mode: parse_env_or("INTAKE_USE_TEST_MODE", defaults.use_test_mode, parse_bool),
            hours_to_check: parse_env_or("INTAKE_HOURS_TO_CHECK", defaults.hours_to_check, |raw| {
                raw.trim().parse::<u32>().ok()
            }),
            test_time: parse_env_or("INTAKE_TEST_TIME", defaults.test_time, |raw| {
                DateTime::parse_from_rfc3339(raw.trim())
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
            display_offset: parse_env_or("INTAKE_DISPLAY_UTC_OFFSET", defaults.display_offset, |raw| {
                FixedOffset::from_str(raw.trim()).ok().map(Some)
            }),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            healthie_api_url: env::var("HEALTHIE_API_URL")
                .unwrap_or_else(|_| {
                    warn!("HEALTHIE_API_URL not set, using empty value");
                    String::new()
                }),
            healthie_api_key: env::var("HEALTHIE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("HEALTHIE_API_KEY not set, using empty value");
                    String::new()
                }),
            time_window: TimeWindowConfig::from_env(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.healthie_api_url.is_empty() && !self.healthie_api_key.is_empty()
    }
}

fn default_test_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(DEFAULT_TEST_TIME)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_env_or<T, F>(key: &str, default: T, parse: F) -> T
where
    T: std::fmt::Debug,
    F: Fn(&str) -> Option<T>,
{
    match env::var(key) {
        Ok(raw) => parse(&raw).unwrap_or_else(|| {
            warn!("{} has invalid value {:?}, using default {:?}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
