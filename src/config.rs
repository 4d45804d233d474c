//! Configuration management for the gesture detectors and action layer

use crate::constants::{
    DEFAULT_ACTION_COOLDOWN_MS, DEFAULT_RETURN_RATIO, DEFAULT_TURN_COOLDOWN_MS, DEFAULT_WINK_MARGIN,
    MAX_WINDOW_FRAMES,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Eye aspect ratio (blink/wink) configuration
    pub eye: EyeConfig,

    /// Eyebrow raise configuration
    pub brow: BrowConfig,

    /// Head turn configuration
    pub head: HeadConfig,

    /// Smile configuration
    pub mouth: MouthConfig,

    /// Action executor configuration
    pub actions: ActionConfig,
}

/// Eye aspect ratio thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EyeConfig {
    /// EAR below which the left eye counts as closed
    pub left_threshold: f64,

    /// EAR below which the right eye counts as closed
    pub right_threshold: f64,

    /// Frames an eye must stay below threshold to be confirmed closed
    pub consec_frames: usize,

    /// Factor on the closed eye's threshold the other eye must exceed for a wink
    pub wink_margin: f64,
}

/// Eyebrow raise thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowConfig {
    /// Normalized eye-to-brow distance above which brows count as raised
    pub raise_threshold: f64,

    /// Frames the raise must be held before it triggers (~1s at 30 fps)
    pub hold_frames: usize,
}

/// Head turn thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadConfig {
    /// Yaw proxy magnitude that counts as a turn
    pub yaw_threshold: f64,

    /// Fraction of `yaw_threshold` the yaw must fall below to re-arm
    pub return_ratio: f64,

    /// Minimum time between two turn events in milliseconds
    pub cooldown_ms: u64,
}

/// Smile thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MouthConfig {
    /// Width/height ratio above which the mouth may be smiling
    pub smile_threshold: f64,

    /// Consecutive smiling frames required to confirm a smile
    pub hold_frames: usize,

    /// Ratio below which the smile lock is released
    pub reset_threshold: f64,

    /// Minimum corner elevation above the lip center
    pub corner_raise_threshold: f64,
}

/// Action executor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionConfig {
    /// Global cooldown between two executed actions in milliseconds
    pub cooldown_ms: u64,

    /// Gesture to action bindings
    pub bindings: ActionBindings,
}

/// Named action bound to each gesture event. `None` leaves the gesture unbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionBindings {
    pub left_wink: Option<String>,
    pub right_wink: Option<String>,
    pub eyebrow_hold: Option<String>,
    pub smile: Option<String>,
    pub turn_left: Option<String>,
    pub turn_right: Option<String>,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            left_threshold: 0.22,
            right_threshold: 0.22,
            consec_frames: 4,
            wink_margin: DEFAULT_WINK_MARGIN,
        }
    }
}

impl Default for BrowConfig {
    fn default() -> Self {
        Self {
            raise_threshold: 0.070,
            hold_frames: 30,
        }
    }
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            yaw_threshold: 0.45,
            return_ratio: DEFAULT_RETURN_RATIO,
            cooldown_ms: DEFAULT_TURN_COOLDOWN_MS,
        }
    }
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            smile_threshold: 2.8,
            hold_frames: 4,
            reset_threshold: 2.4,
            corner_raise_threshold: 0.005,
        }
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_ACTION_COOLDOWN_MS,
            bindings: ActionBindings::default(),
        }
    }
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            left_wink: None,
            right_wink: None,
            eyebrow_hold: Some("lock".to_string()),
            smile: Some("copy".to_string()),
            turn_left: None,
            turn_right: None,
        }
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("{name} must be a finite number, got {value}")))
    }
}

fn check_frames(name: &str, frames: usize) -> Result<()> {
    if frames == 0 || frames > MAX_WINDOW_FRAMES {
        Err(Error::ConfigError(format!(
            "{name} must be between 1 and {MAX_WINDOW_FRAMES}, got {frames}"
        )))
    } else {
        Ok(())
    }
}

impl EyeConfig {
    /// Validate eye thresholds
    pub fn validate(&self) -> Result<()> {
        check_finite("Left eye threshold", self.left_threshold)?;
        check_finite("Right eye threshold", self.right_threshold)?;
        check_finite("Wink margin", self.wink_margin)?;
        if self.left_threshold <= 0.0 || self.right_threshold <= 0.0 {
            return Err(Error::ConfigError("Eye thresholds must be greater than 0".to_string()));
        }
        check_frames("Eye consecutive frame count", self.consec_frames)?;
        if self.wink_margin <= 0.0 {
            return Err(Error::ConfigError("Wink margin must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl BrowConfig {
    /// Validate eyebrow thresholds
    pub fn validate(&self) -> Result<()> {
        check_finite("Brow raise threshold", self.raise_threshold)?;
        check_frames("Brow hold frame count", self.hold_frames)?;
        Ok(())
    }
}

impl HeadConfig {
    /// Validate head turn thresholds
    pub fn validate(&self) -> Result<()> {
        check_finite("Yaw threshold", self.yaw_threshold)?;
        check_finite("Return ratio", self.return_ratio)?;
        if self.yaw_threshold <= 0.0 {
            return Err(Error::ConfigError("Yaw threshold must be greater than 0".to_string()));
        }
        if !(self.return_ratio > 0.0 && self.return_ratio <= 1.0) {
            return Err(Error::ConfigError(
                "Return ratio must be in (0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }

    /// Yaw magnitude below which the turn machine returns to center
    #[must_use]
    pub fn return_threshold(&self) -> f64 {
        self.yaw_threshold * self.return_ratio
    }

    /// Cooldown between turn events
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl MouthConfig {
    /// Validate smile thresholds
    pub fn validate(&self) -> Result<()> {
        check_finite("Smile threshold", self.smile_threshold)?;
        check_finite("Smile reset threshold", self.reset_threshold)?;
        check_finite("Corner raise threshold", self.corner_raise_threshold)?;
        check_frames("Smile hold frame count", self.hold_frames)?;
        if self.reset_threshold > self.smile_threshold {
            return Err(Error::ConfigError(format!(
                "Smile reset threshold ({}) must not exceed smile threshold ({})",
                self.reset_threshold, self.smile_threshold
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.eye.validate()?;
        self.brow.validate()?;
        self.head.validate()?;
        self.mouth.validate()?;
        Ok(())
    }

    /// Set one of the named gesture thresholds.
    ///
    /// Recognized names are `EYE_LEFT_THRESHOLD`, `EYE_RIGHT_THRESHOLD`, `EYE_CONSEC_FRAMES`,
    /// `BROW_RAISE_THRESHOLD`, `BROW_HOLD_FRAMES`, `YAW_THRESHOLD`, `SMILE_THRESHOLD`,
    /// `SMILE_HOLD_FRAMES`, `SMILE_RESET` and `CORNER_RAISE_THRESHOLD`. Frame counts must be
    /// whole numbers no larger than [`MAX_WINDOW_FRAMES`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown names or a frame count that is fractional, negative or too large.
    pub fn set_threshold(&mut self, name: &str, value: f64) -> Result<()> {
        match name.to_ascii_uppercase().as_str() {
            "EYE_LEFT_THRESHOLD" => self.eye.left_threshold = value,
            "EYE_RIGHT_THRESHOLD" => self.eye.right_threshold = value,
            "EYE_CONSEC_FRAMES" => self.eye.consec_frames = frame_count(name, value)?,
            "BROW_RAISE_THRESHOLD" => self.brow.raise_threshold = value,
            "BROW_HOLD_FRAMES" => self.brow.hold_frames = frame_count(name, value)?,
            "YAW_THRESHOLD" => self.head.yaw_threshold = value,
            "SMILE_THRESHOLD" => self.mouth.smile_threshold = value,
            "SMILE_HOLD_FRAMES" => self.mouth.hold_frames = frame_count(name, value)?,
            "SMILE_RESET" => self.mouth.reset_threshold = value,
            "CORNER_RAISE_THRESHOLD" => self.mouth.corner_raise_threshold = value,
            _ => return Err(Error::ConfigError(format!("Unknown threshold: {name}"))),
        }
        Ok(())
    }

    /// Apply a `NAME=VALUE` override as given on the command line
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| Error::InvalidInput(format!("Expected NAME=VALUE, got '{assignment}'")))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("Invalid number for {}: '{}'", name.trim(), value.trim())))?;
        self.set_threshold(name.trim(), value)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn frame_count(name: &str, value: f64) -> Result<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_WINDOW_FRAMES as f64 {
        Ok(value as usize)
    } else {
        Err(Error::ConfigError(format!("{name} must be a whole number of frames, got {value}")))
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Facial Gesture Configuration

# Eye aspect ratio (open eye ~0.25-0.35, closed < 0.20)
eye:
  left_threshold: 0.22
  right_threshold: 0.22
  consec_frames: 4
  wink_margin: 1.3

# Eyebrow raise (normalized eye-to-brow distance)
brow:
  raise_threshold: 0.070
  hold_frames: 30

# Head turn (yaw proxy, not degrees)
head:
  yaw_threshold: 0.45
  return_ratio: 0.7
  cooldown_ms: 500

# Smile (mouth width/height ratio and corner elevation)
mouth:
  smile_threshold: 2.8
  hold_frames: 4
  reset_threshold: 2.4
  corner_raise_threshold: 0.005

# Action executor
actions:
  cooldown_ms: 600
  bindings:
    left_wink: null
    right_wink: null
    eyebrow_hold: "lock"
    smile: "copy"
    turn_left: "alt+tab"
    turn_right: null
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.eye.consec_frames, 4);
        assert_eq!(config.brow.hold_frames, 30);
        assert_eq!(config.actions.bindings.turn_left.as_deref(), Some("alt+tab"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_yaml("head:\n  yaw_threshold: 0.6\n").unwrap();
        assert_eq!(config.head.yaw_threshold, 0.6);
        assert_eq!(config.head.return_ratio, DEFAULT_RETURN_RATIO);
        assert_eq!(config.eye, EyeConfig::default());
    }

    #[test]
    fn test_set_threshold_by_name() {
        let mut config = Config::default();
        config.set_threshold("YAW_THRESHOLD", 0.5).unwrap();
        config.set_threshold("smile_hold_frames", 6.0).unwrap();
        assert_eq!(config.head.yaw_threshold, 0.5);
        assert_eq!(config.mouth.hold_frames, 6);

        assert!(config.set_threshold("EYE_CONSEC_FRAMES", 2.5).is_err());
        assert!(config.set_threshold("EYE_CONSEC_FRAMES", 1e20).is_err());
        assert!(config.set_threshold("NOT_A_THRESHOLD", 1.0).is_err());
    }

    #[test]
    fn test_apply_override() {
        let mut config = Config::default();
        config.apply_override("BROW_HOLD_FRAMES = 15").unwrap();
        assert_eq!(config.brow.hold_frames, 15);

        assert!(matches!(config.apply_override("BROW_HOLD_FRAMES"), Err(Error::InvalidInput(_))));
        assert!(matches!(config.apply_override("SMILE_RESET=abc"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.eye.consec_frames = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mouth.reset_threshold = config.mouth.smile_threshold + 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.head.return_ratio = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.brow.raise_threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mouth.hold_frames = MAX_WINDOW_FRAMES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::from_yaml("eye:\n  consec_frame: 8\n").is_err());
        assert!(Config::from_yaml("gaze:\n  threshold: 0.1\n").is_err());
    }
}
