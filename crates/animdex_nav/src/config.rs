//! Navigation configuration
//!
//! Defaults match the showcase shell. Hosts may override them from a TOML
//! table:
//!
//! ```toml
//! scroll_extra_offset = 24.0
//! scroll_retry_delay_ms = 500
//! default_code_mode = "CSS"
//! ```

use animdex_catalog::CodeMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML text could not be parsed into a config
    #[error("Invalid navigation config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Navigation controller settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Gap kept between the app bar and a scrolled-to section, in pixels
    pub scroll_extra_offset: f64,
    /// Delay before the single scroll retry when the section is not rendered yet
    pub scroll_retry_delay_ms: u64,
    /// Scroll distances at or below this are skipped
    pub scroll_tolerance: f64,
    /// Selector of the fixed app bar whose height is subtracted
    pub app_bar_selector: String,
    /// Prefix of a group section's element id
    pub group_element_prefix: String,
    /// Mode used before the viewer picks one
    pub default_code_mode: CodeMode,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_extra_offset: 16.0,
            scroll_retry_delay_ms: 360,
            scroll_tolerance: 1.0,
            app_bar_selector: r#"[data-app-shell="bar"]"#.to_string(),
            group_element_prefix: "group-".to_string(),
            default_code_mode: CodeMode::Framer,
        }
    }
}

impl NavConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the extra scroll offset
    pub fn scroll_extra_offset(mut self, offset: f64) -> Self {
        self.scroll_extra_offset = offset;
        self
    }

    /// Set the scroll retry delay
    pub fn scroll_retry_delay(mut self, delay: Duration) -> Self {
        self.scroll_retry_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the scroll tolerance
    pub fn scroll_tolerance(mut self, tolerance: f64) -> Self {
        self.scroll_tolerance = tolerance;
        self
    }

    /// Set the app bar selector
    pub fn app_bar_selector(mut self, selector: impl Into<String>) -> Self {
        self.app_bar_selector = selector.into();
        self
    }

    /// Set the group section id prefix
    pub fn group_element_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.group_element_prefix = prefix.into();
        self
    }

    /// Set the initial code mode
    pub fn default_code_mode(mut self, mode: CodeMode) -> Self {
        self.default_code_mode = mode;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_retry_delay_ms)
    }

    /// Element id of a group's section
    pub fn group_element_id(&self, group_id: &str) -> String {
        format!("{}{}", self.group_element_prefix, group_id)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scroll_extra_offset.is_finite() || self.scroll_extra_offset < 0.0 {
            return Err(ConfigError::Invalid {
                field: "scroll_extra_offset",
                reason: format!("expected a non-negative number, got {}", self.scroll_extra_offset),
            });
        }
        if !self.scroll_tolerance.is_finite() || self.scroll_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "scroll_tolerance",
                reason: format!("expected a non-negative number, got {}", self.scroll_tolerance),
            });
        }
        if self.app_bar_selector.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "app_bar_selector",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
