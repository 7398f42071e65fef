//! Slug and response formatting configuration.
//!
//! Locale and timezone are passed explicitly to the slug and presentation
//! layers instead of being read from process-wide state.

use serde::{Deserialize, Serialize};

/// Slug generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugConfig {
    /// Language used for transliteration (`"en"`, `"de"`, `"da"`, ...).
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

/// Formatting of computed response fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// IANA timezone timestamps are rendered in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// `chrono` format string for timestamps.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            datetime_format: default_datetime_format(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_datetime_format() -> String {
    "%A, %b %-d, %Y %-I:%M %p".to_string()
}
