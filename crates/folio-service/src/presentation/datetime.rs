//! Timestamp formatting in a configured timezone.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use folio_core::config::PresentationConfig;
use folio_core::error::AppError;
use folio_core::result::AppResult;

/// Renders UTC timestamps in the configured timezone and format.
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    tz: Tz,
    format: String,
}

impl TimestampFormatter {
    /// Build a formatter, rejecting unknown timezones and malformed formats.
    pub fn new(config: &PresentationConfig) -> AppResult<Self> {
        let tz: Tz = config.timezone.parse().map_err(|e| {
            AppError::configuration(format!("Unknown timezone '{}': {e}", config.timezone))
        })?;

        if StrftimeItems::new(&config.datetime_format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::configuration(format!(
                "Invalid datetime format '{}'",
                config.datetime_format
            )));
        }

        Ok(Self {
            tz,
            format: config.datetime_format.clone(),
        })
    }

    /// Format a timestamp.
    pub fn format(&self, dt: &DateTime<Utc>) -> String {
        dt.with_timezone(&self.tz).format(&self.format).to_string()
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self {
            tz: Tz::UTC,
            format: PresentationConfig::default().datetime_format,
        }
    }
}
