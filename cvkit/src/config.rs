//! Configuration.
//!
//! Fixed limits live here as constants. Run-time settings come from the
//! environment (`main` loads a `.env` file first via `dotenvy`):
//!
//! | Variable              | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `CVKIT_NOW`           | Pin "current month" (`YYYY-MM`)           |
//! | `CVKIT_GAP_THRESHOLD` | Gap threshold in months (default 3)       |
//! | `CVKIT_QUIET`         | `1`/`true` mutes progress logs            |

use crate::error::{ConfigError, ConfigResult};
use crate::models::YearMonth;
use crate::timeline::gaps::{Clock, FixedClock, SystemClock};

/// Gaps must be strictly longer than this many months to be reported.
pub const GAP_THRESHOLD_MONTHS: u32 = 3;

/// Default number of job-description keywords considered for matching.
pub const MAX_KEYWORDS: usize = 25;

/// Section files larger than this are refused (10 MiB).
pub const MAX_IMPORT_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const ENV_NOW: &str = "CVKIT_NOW";
pub const ENV_GAP_THRESHOLD: &str = "CVKIT_GAP_THRESHOLD";
pub const ENV_QUIET: &str = "CVKIT_QUIET";

/// Run-time settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Pinned current month; `None` reads the system clock.
    pub now: Option<YearMonth>,
    /// Gap threshold in months.
    pub gap_threshold: u32,
    /// Mute progress logs on stderr.
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            now: None,
            gap_threshold: GAP_THRESHOLD_MONTHS,
            quiet: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = non_empty(lookup(ENV_NOW)) {
            let month = raw.parse::<YearMonth>().map_err(|message| ConfigError::InvalidValue {
                key: ENV_NOW.to_string(),
                message,
            })?;
            settings.now = Some(month);
        }

        if let Some(raw) = non_empty(lookup(ENV_GAP_THRESHOLD)) {
            settings.gap_threshold =
                raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        key: ENV_GAP_THRESHOLD.to_string(),
                        message: e.to_string(),
                    }
                })?;
        }

        if let Some(raw) = non_empty(lookup(ENV_QUIET)) {
            settings.quiet = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(settings)
    }

    /// Clock honoring a pinned month.
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.now {
            Some(month) => Box::new(FixedClock(month)),
            None => Box::new(SystemClock),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.gap_threshold, 3);
    }

    #[test]
    fn test_pinned_now() {
        let settings = Settings::from_lookup(lookup(&[(ENV_NOW, "2025-03")])).unwrap();
        assert_eq!(settings.now, YearMonth::new(2025, 3));
        assert_eq!(settings.clock().current_month(), YearMonth::new(2025, 3).unwrap());
    }

    #[test]
    fn test_invalid_now() {
        let err = Settings::from_lookup(lookup(&[(ENV_NOW, "March 2025")])).unwrap_err();
        assert!(err.to_string().contains(ENV_NOW));
    }

    #[test]
    fn test_threshold_and_quiet() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_GAP_THRESHOLD, "6"),
            (ENV_QUIET, "true"),
        ]))
        .unwrap();
        assert_eq!(settings.gap_threshold, 6);
        assert!(settings.quiet);
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(Settings::from_lookup(lookup(&[(ENV_GAP_THRESHOLD, "-1")])).is_err());
    }
}
