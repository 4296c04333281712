//! Feedback settings, persisted as TOML.
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FeedbackError, Result};
use crate::toast::{Gravity, Position};

/// File name inside the config directory.
pub const SETTINGS_FILE: &str = "feedback.toml";

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// All coordinator settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    /// Progress indicator behaviour.
    pub progress: ProgressSettings,

    /// Appearance of the toasts the coordinator shows.
    pub toast: ToastSettings,

    /// When responses are swapped into the page.
    pub swap: SwapSettings,
}

impl FeedbackSettings {
    /// Load settings from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found, using defaults");
                return Ok(Self::default());
            }
            Err(error) => return Err(error.into()),
        };
        let settings: Self = toml::from_str(&content).map_err(|e| FeedbackError::Settings {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a specific path, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Pretty TOML rendering.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ActionsGateway", "actions-gateway")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Reject values the coordinator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.progress.minimum) {
            return Err(FeedbackError::InvalidSetting {
                field: "progress.minimum",
                reason: format!("{} is outside [0, 1)", self.progress.minimum),
            });
        }
        if self.swap.redirect_header.trim().is_empty() {
            return Err(FeedbackError::InvalidSetting {
                field: "swap.redirect_header",
                reason: "header name is empty".to_string(),
            });
        }
        if self.toast.network_error_text.trim().is_empty() {
            return Err(FeedbackError::InvalidSetting {
                field: "toast.network_error_text",
                reason: "message is empty".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    /// Fill value the bar starts at.
    pub minimum: f64,
    /// Whether the bar creeps forward while a request is in flight.
    pub trickle: bool,
    pub show_spinner: bool,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            minimum: 0.08,
            trickle: true,
            show_spinner: false,
        }
    }
}

// =============================================================================
// TOAST
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    /// Text shown when a request fails before any response arrives.
    pub network_error_text: String,
    /// Background colour of warning toasts.
    pub background: String,
    pub gravity: Gravity,
    pub position: Position,
    /// Show a close button.
    pub close: bool,
    /// Pause the dismiss timer while the toast has focus.
    pub stop_on_focus: bool,
    pub new_window: bool,
    /// 0 keeps the toast until the user dismisses it.
    pub duration_ms: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            network_error_text: "A network error occurred".to_string(),
            background: "#f97316".to_string(),
            gravity: Gravity::Top,
            position: Position::Right,
            close: true,
            stop_on_focus: true,
            new_window: true,
            duration_ms: 0,
        }
    }
}

// =============================================================================
// SWAP
// =============================================================================

/// Which response statuses count as failures that must not be swapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapPolicy {
    /// Anything but exactly 200.
    #[default]
    OkOnly,
    /// Only statuses above 200. 1xx responses are swapped.
    AboveOk,
    /// Anything outside 200-299.
    NonSuccess,
}

impl SwapPolicy {
    /// True when a response with `status` must not replace page content.
    pub const fn suppresses(&self, status: u16) -> bool {
        match self {
            Self::OkOnly => status != 200,
            Self::AboveOk => status > 200,
            Self::NonSuccess => status < 200 || status > 299,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::OkOnly => "ok_only",
            Self::AboveOk => "above_ok",
            Self::NonSuccess => "non_success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapSettings {
    pub policy: SwapPolicy,
    /// Response header announcing a follow-up navigation.
    pub redirect_header: String,
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self {
            policy: SwapPolicy::default(),
            redirect_header: "HX-Location".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let settings: FeedbackSettings = toml::from_str(
            r#"
[swap]
policy = "above_ok"
"#,
        )
        .unwrap();
        assert_eq!(settings.swap.policy, SwapPolicy::AboveOk);
        assert_eq!(settings.swap.redirect_header, "HX-Location");
        assert_eq!(settings.toast, ToastSettings::default());
    }

    #[test]
    fn policies_disagree_only_where_expected() {
        for policy in [SwapPolicy::OkOnly, SwapPolicy::AboveOk, SwapPolicy::NonSuccess] {
            assert!(!policy.suppresses(200));
            assert!(policy.suppresses(404));
            assert!(policy.suppresses(500));
        }
        assert!(SwapPolicy::OkOnly.suppresses(101));
        assert!(!SwapPolicy::AboveOk.suppresses(101));
        assert!(SwapPolicy::NonSuccess.suppresses(101));

        assert!(SwapPolicy::OkOnly.suppresses(204));
        assert!(SwapPolicy::AboveOk.suppresses(204));
        assert!(!SwapPolicy::NonSuccess.suppresses(204));
    }

    #[test]
    fn validate_rejects_bad_minimum() {
        let mut settings = FeedbackSettings::default();
        settings.progress.minimum = 1.0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            FeedbackError::InvalidSetting {
                field: "progress.minimum",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_empty_header() {
        let mut settings = FeedbackSettings::default();
        settings.swap.redirect_header = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
