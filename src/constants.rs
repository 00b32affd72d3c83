//! Constants used throughout the application

/// Number of hand landmarks produced by the detector
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Number of fingers in a finger state
pub const NUM_FINGERS: usize = 5;

/// Pinch distance (pixels) at which the actuator angle is 0 degrees.
/// Raw distances below this also set the pinch-detected flag.
pub const PINCH_NEAR_PX: f64 = 50.0;

/// Pinch distance (pixels) at which the actuator angle is 180 degrees
pub const PINCH_FAR_PX: f64 = 320.0;

/// Simulated servo angle range in degrees
pub const SERVO_MIN_DEG: f64 = 0.0;
pub const SERVO_MAX_DEG: f64 = 180.0;

/// Default minimum idle interval between triggered actions, in seconds
pub const DEFAULT_COOLDOWN_SECS: f64 = 15.0;

/// Default subject identifier written to the result log
pub const DEFAULT_SUBJECT_ID: u32 = 1;

/// Default hand-presence score threshold for the landmark model
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.5;

/// Default landmark model input size (square)
pub const DEFAULT_HAND_INPUT_SIZE: i32 = 224;

/// Header row of the result CSV
pub const RESULT_CSV_HEADER: &str = "subject_id,gesture_expected,gesture_observed,elapsed_time";

/// Default result CSV path
pub const DEFAULT_RESULT_CSV: &str = "gesture_results.csv";

/// Default analysis report path
pub const DEFAULT_REPORT_PATH: &str = "analysis_report.txt";
