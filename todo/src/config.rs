//! Configuration for the todo application.
//!
//! Values come from environment variables (a `.env` file is honored by the
//! binary through `dotenvy`):
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TODO_TIMESTAMP_FORMAT` | `%Y-%m-%d %H:%M:%S` | strftime pattern for the `created` field |
//! | `TODO_UTC_OFFSET` | machine local zone | offset used to display timestamps (`+02:00`, `-05:30`, `Z`) |
//!
//! # Example
//!
//! ```no_run
//! use todoflow::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! println!("{}", config.timestamps.pattern());
//! # Ok(())
//! # }
//! ```

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use thiserror::Error;

/// Environment variable holding the timestamp pattern
pub const TIMESTAMP_FORMAT_VAR: &str = "TODO_TIMESTAMP_FORMAT";

/// Environment variable holding the display offset
pub const UTC_OFFSET_VAR: &str = "TODO_UTC_OFFSET";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The timestamp pattern is not a valid strftime pattern
    #[error("invalid timestamp format {0:?}")]
    InvalidTimestampFormat(String),

    /// The offset is not `Z` or `±HH:MM`
    #[error("invalid UTC offset {0:?}, expected Z or ±HH:MM")]
    InvalidUtcOffset(String),
}

/// How the `created` timestamp of a todo is rendered
///
/// The default pattern matches the Swedish locale display form
/// (`2025-01-01 13:45:00`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestampFormat {
    pattern: String,
    /// `None` follows the local zone, including daylight saving changes
    offset: Option<FixedOffset>,
}

impl TimestampFormat {
    /// Swedish locale date and time
    pub const SWEDISH: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Creates a format after checking the pattern
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimestampFormat`] if chrono cannot parse
    /// the pattern.
    pub fn new(pattern: impl Into<String>, offset: FixedOffset) -> Result<Self, ConfigError> {
        Self::checked(pattern.into(), Some(offset))
    }

    /// Creates a format rendered in the machine's local zone
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimestampFormat`] if chrono cannot parse
    /// the pattern.
    pub fn new_local(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        Self::checked(pattern.into(), None)
    }

    fn checked(pattern: String, offset: Option<FixedOffset>) -> Result<Self, ConfigError> {
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimestampFormat(pattern));
        }
        Ok(Self { pattern, offset })
    }

    /// Swedish pattern rendered in UTC
    #[must_use]
    pub fn utc() -> Self {
        Self {
            pattern: Self::SWEDISH.to_string(),
            offset: Some(Utc.fix()),
        }
    }

    /// Swedish pattern rendered in the machine's local zone
    ///
    /// The offset is looked up for each formatted instant.
    #[must_use]
    pub fn local() -> Self {
        Self {
            pattern: Self::SWEDISH.to_string(),
            offset: None,
        }
    }

    /// The strftime pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The fixed display offset, `None` when following the local zone
    #[must_use]
    pub const fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Renders an instant for display
    #[must_use]
    pub fn format(&self, at: DateTime<Utc>) -> String {
        match self.offset {
            Some(offset) => at.with_timezone(&offset).format(&self.pattern).to_string(),
            None => at.with_timezone(&Local).format(&self.pattern).to_string(),
        }
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self::local()
    }
}

/// Application configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// How `created` timestamps are rendered
    pub timestamps: TimestampFormat,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pattern =
            lookup(TIMESTAMP_FORMAT_VAR).unwrap_or_else(|| TimestampFormat::SWEDISH.to_string());
        let timestamps = match lookup(UTC_OFFSET_VAR) {
            Some(raw) => TimestampFormat::new(pattern, parse_utc_offset(&raw)?)?,
            None => TimestampFormat::new_local(pattern)?,
        };

        Ok(Self { timestamps })
    }
}

/// Parses `Z`, `UTC` or `±HH:MM` into a fixed offset
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUtcOffset`] for anything else.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidUtcOffset(raw.to_string());
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match trimmed.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn swedish_format_in_utc() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 7, 5, 3).unwrap();
        assert_eq!(TimestampFormat::utc().format(at), "2025-03-09 07:05:03");
    }

    #[test]
    fn offset_shifts_display_time() {
        let format = TimestampFormat::new(
            TimestampFormat::SWEDISH,
            parse_utc_offset("+02:00").unwrap(),
        )
        .unwrap();
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 30, 0).unwrap();

        assert_eq!(format.format(at), "2026-01-01 01:30:00");
    }

    #[test]
    fn parse_offsets() {
        assert_eq!(parse_utc_offset("Z").unwrap(), Utc.fix());
        assert_eq!(parse_utc_offset("utc").unwrap(), Utc.fix());
        assert_eq!(
            parse_utc_offset("-05:30").unwrap().local_minus_utc(),
            -(5 * 3600 + 30 * 60)
        );
        assert!(matches!(
            parse_utc_offset("0200"),
            Err(ConfigError::InvalidUtcOffset(_))
        ));
        assert!(parse_utc_offset("+24:00").is_err());
        assert!(parse_utc_offset("+2:00").is_err());
        assert!(parse_utc_offset("").is_err());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let result = TimestampFormat::new("%Y-%Q", Utc.fix());
        assert_eq!(
            result,
            Err(ConfigError::InvalidTimestampFormat("%Y-%Q".to_string()))
        );
    }

    #[test]
    fn from_lookup_reads_both_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (TIMESTAMP_FORMAT_VAR, "%d/%m/%Y %H:%M"),
            (UTC_OFFSET_VAR, "Z"),
        ]))
        .unwrap();

        assert_eq!(config.timestamps.pattern(), "%d/%m/%Y %H:%M");
        assert_eq!(config.timestamps.offset(), Some(Utc.fix()));
    }

    #[test]
    fn from_lookup_defaults_to_swedish_pattern() {
        let config = AppConfig::from_lookup(lookup(&[(UTC_OFFSET_VAR, "+01:00")])).unwrap();

        assert_eq!(config.timestamps.pattern(), TimestampFormat::SWEDISH);
        assert_eq!(
            config.timestamps.offset().map(|offset| offset.local_minus_utc()),
            Some(3600)
        );
    }

    #[test]
    fn unset_offset_follows_local_zone_per_instant() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.timestamps.offset(), None);

        // Winter and summer instants each use the offset in force at that time
        for at in [
            Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap(),
        ] {
            let expected = at
                .with_timezone(&Local)
                .format(TimestampFormat::SWEDISH)
                .to_string();
            assert_eq!(config.timestamps.format(at), expected);
        }
    }

    #[test]
    fn local_format_still_validates_pattern() {
        assert_eq!(
            TimestampFormat::new_local("%Y-%Q"),
            Err(ConfigError::InvalidTimestampFormat("%Y-%Q".to_string()))
        );
    }

    #[test]
    fn from_lookup_rejects_bad_offset() {
        let result = AppConfig::from_lookup(lookup(&[(UTC_OFFSET_VAR, "later")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidUtcOffset("later".to_string()))
        );
    }
}
