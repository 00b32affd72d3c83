//! Hand-gesture controlled home automation library.
//!
//! This library turns a stream of hand-landmark observations into discrete
//! home-automation actions (light/fan on/off) gated by a cooldown debounce,
//! plus a continuous pinch-distance signal driving a simulated servo:
//! - ONNX Runtime for hand landmark inference
//! - `OpenCV` for camera capture and display
//! - A pure per-frame pipeline for classification, mapping and gating
//!
//! The per-frame pipeline consists of:
//! 1. Landmark adaptation from normalized to pixel coordinates
//! 2. Geometric finger-state classification (5 raised/lowered flags)
//! 3. Count-to-action mapping and cooldown gating
//! 4. Pinch-distance to servo-angle interpolation
//!
//! # Examples
//!
//! ## Stepping the pipeline
//!
//! ```
//! use gesture_automation::{
//!     cooldown::CooldownState,
//!     finger_classifier::FingerClassifier,
//!     pinch::PinchTransform,
//!     pipeline::GesturePipeline,
//! };
//! use std::time::{Duration, Instant};
//!
//! let pipeline = GesturePipeline::new(
//!     FingerClassifier::default(),
//!     PinchTransform::default(),
//!     1,
//! );
//! let mut cooldown = CooldownState::new(Duration::from_secs(15));
//!
//! // No hand in this frame: distinct from a closed fist, nothing fires
//! let step = pipeline.step(&mut cooldown, None, Instant::now(), Duration::ZERO);
//! assert!(step.record.is_none());
//! assert!(step.display.count.is_none());
//! ```
//!
//! ## Detecting hands from camera frames
//!
//! ```no_run
//! use gesture_automation::{hand_detection::HandDetector, landmarks::HandObservation};
//! use opencv::{imgcodecs, prelude::*};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = HandDetector::new("assets/hand_landmarks.onnx", 0.5)?;
//! let frame = imgcodecs::imread("test.jpg", imgcodecs::IMREAD_COLOR)?;
//!
//! if let Some(landmarks) = detector.detect(&frame)? {
//!     let hand = HandObservation::from_normalized(&landmarks, frame.cols(), frame.rows());
//!     println!("Hand detected: {}", hand.is_some());
//! }
//! # Ok(())
//! # }
//! ```

/// Hand landmark types and the normalized-to-pixel adapter
pub mod landmarks;

/// Hand landmark detection using ONNX Runtime
pub mod hand_detection;

/// Geometric finger-state classification
pub mod finger_classifier;

/// Pinch-distance to actuator-angle transform
pub mod pinch;

/// Count-to-action mapping
pub mod actions;

/// Cooldown state machine gating action emission
pub mod cooldown;

/// Per-frame decision pipeline
pub mod pipeline;

/// Append-only CSV result sink
pub mod result_log;

/// Offline accuracy analysis of the result log
pub mod analysis;

/// Utility functions for interpolation and numeric conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
