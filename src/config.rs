//! Configuration management for the gesture automation application

use crate::constants::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_PRESENCE_THRESHOLD, DEFAULT_RESULT_CSV, DEFAULT_SUBJECT_ID,
    PINCH_FAR_PX, PINCH_NEAR_PX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera configuration
    pub camera: CameraConfig,

    /// Hand detection configuration
    pub detection: DetectionConfig,

    /// Gesture and cooldown configuration
    pub gesture: GestureConfig,

    /// Pinch-to-servo configuration
    pub pinch: PinchConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// Result logging configuration
    pub logging: LoggingConfig,
}

/// Camera parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera device index
    pub index: i32,

    /// Mirror the frame horizontally before processing
    pub flip_horizontal: bool,
}

/// Hand landmark detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Hand-presence score threshold (0.0-1.0)
    pub presence_threshold: f32,
}

/// Gesture mapping and cooldown parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum idle interval between triggered actions, in seconds
    pub cooldown_secs: f64,

    /// Subject identifier written to the result log
    pub subject_id: u32,

    /// Thumb orientation rule ("mirrored" or "unmirrored")
    pub thumb_rule: String,
}

/// Pinch distance interpolation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Distance (pixels) mapping to 0 degrees; also the pinch threshold
    pub near: f64,

    /// Distance (pixels) mapping to 180 degrees
    pub far: f64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw landmark points on the frame
    pub show_landmarks: bool,

    /// Draw the simulated servo bar
    pub show_servo_bar: bool,

    /// Window title
    pub window_name: String,
}

/// Result logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Path of the result CSV
    pub results_csv: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            detection: DetectionConfig::default(),
            gesture: GestureConfig::default(),
            pinch: PinchConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            flip_horizontal: true,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/hand_landmarks.onnx"),
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            subject_id: DEFAULT_SUBJECT_ID,
            thumb_rule: "mirrored".to_string(),
        }
    }
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            near: PINCH_NEAR_PX,
            far: PINCH_FAR_PX,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_landmarks: true,
            show_servo_bar: true,
            window_name: "Gesture Automation".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            results_csv: PathBuf::from(DEFAULT_RESULT_CSV),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.detection.presence_threshold) {
            return Err(Error::ConfigError(
                "Presence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.gesture.cooldown_secs <= 0.0 || !self.gesture.cooldown_secs.is_finite() {
            return Err(Error::ConfigError(
                "Cooldown must be a positive number of seconds".to_string(),
            ));
        }

        crate::finger_classifier::create_thumb_rule(&self.gesture.thumb_rule)
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        if self.pinch.near <= 0.0 || self.pinch.near >= self.pinch.far {
            return Err(Error::ConfigError(
                "Pinch range must satisfy 0 < near < far".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Automation Configuration

# Camera settings
camera:
  index: 0
  flip_horizontal: true

# Hand landmark detection
detection:
  model: "assets/hand_landmarks.onnx"
  presence_threshold: 0.5

# Gesture mapping and cooldown
gesture:
  cooldown_secs: 15.0
  subject_id: 1
  thumb_rule: "mirrored"

# Pinch-to-servo interpolation (pixels)
pinch:
  near: 50.0
  far: 320.0

# Display settings
display:
  show_landmarks: true
  show_servo_bar: true
  window_name: "Gesture Automation"

# Result logging
logging:
  results_csv: "gesture_results.csv"
"#;
