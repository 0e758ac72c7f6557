use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::PositionOptions;
use crate::navigation::SwipeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    /// Android asks for fine location at runtime; iOS prompts from inside
    /// the location API itself.
    pub fn requires_runtime_permission(&self) -> bool {
        matches!(self, Platform::Android)
    }
}

/// Text shown by the shell in the runtime permission prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRationale {
    pub title: String,
    pub message: String,
    pub button_neutral: String,
    pub button_negative: String,
    pub button_positive: String,
}

impl Default for PermissionRationale {
    fn default() -> Self {
        Self {
            title: "Location Permission".into(),
            message: "This app needs access to your location to provide accurate weather information."
                .into(),
            button_neutral: "Ask Me Later".into(),
            button_negative: "Cancel".into(),
            button_positive: "OK".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shell-provided settings. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub platform: Platform,
    pub position: PositionOptions,
    pub swipe: SwipeConfig,
    pub locate_on_start: bool,
    pub rationale: PermissionRationale,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_locate_on_start(mut self, enabled: bool) -> Self {
        self.locate_on_start = enabled;
        self
    }

    pub fn validated(mut self) -> Self {
        self.position = self.position.validated();
        self.swipe = self.swipe.validated();
        self
    }
}
