//! Pinch-distance to actuator-angle transform for the simulated servo.
//!
//! The Euclidean distance between thumb tip and index tip is mapped onto a
//! 0..=180 degree angle by clamped linear interpolation. This signal is
//! computed every frame a hand is present and is not gated by the cooldown.

use crate::constants::{PINCH_FAR_PX, PINCH_NEAR_PX, SERVO_MAX_DEG, SERVO_MIN_DEG};
use crate::landmarks::{index, HandObservation};
use crate::utils::interp;

/// Continuous control signal derived from the pinch gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorSignal {
    /// Raw thumb-tip to index-tip distance in pixels
    pub distance: f64,
    /// Servo angle in degrees, 0..=180
    pub angle: i32,
    /// True when the raw distance is below the near threshold
    pub pinch_detected: bool,
}

/// Distance-to-angle transform with a configurable interpolation domain
#[derive(Debug, Clone, Copy)]
pub struct PinchTransform {
    near: f64,
    far: f64,
}

impl Default for PinchTransform {
    fn default() -> Self {
        Self::new(PINCH_NEAR_PX, PINCH_FAR_PX)
    }
}

impl PinchTransform {
    /// Create a transform interpolating distances in `[near, far]` onto
    /// `[0, 180]` degrees
    #[must_use]
    pub fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    /// Measure the pinch distance of `hand` and derive the actuator signal
    #[allow(clippy::cast_possible_truncation)] // Angle is within 0..=180 after rounding
    #[must_use]
    pub fn measure(&self, hand: &HandObservation) -> ActuatorSignal {
        let thumb = hand.point(index::THUMB_TIP);
        let index_tip = hand.point(index::INDEX_FINGER_TIP);

        let dx = f64::from(index_tip.x - thumb.x);
        let dy = f64::from(index_tip.y - thumb.y);
        let distance = dx.hypot(dy);

        let angle = interp(distance, (self.near, self.far), (SERVO_MIN_DEG, SERVO_MAX_DEG)).round() as i32;

        ActuatorSignal {
            distance,
            angle,
            pinch_detected: distance < self.near,
        }
    }

    /// Midpoint between the two pinch tips, for overlay drawing
    #[must_use]
    pub fn midpoint(hand: &HandObservation) -> (i32, i32) {
        let thumb = hand.point(index::THUMB_TIP);
        let index_tip = hand.point(index::INDEX_FINGER_TIP);
        ((thumb.x + index_tip.x) / 2, (thumb.y + index_tip.y) / 2)
    }

    /// Lower end of the interpolation domain
    #[must_use]
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Upper end of the interpolation domain
    #[must_use]
    pub fn far(&self) -> f64 {
        self.far
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_HAND_LANDMARKS;

    fn hand_with_pinch_distance(distance: i32) -> HandObservation {
        let mut pixels = [(0, 0); NUM_HAND_LANDMARKS];
        pixels[index::THUMB_TIP] = (100, 100);
        pixels[index::INDEX_FINGER_TIP] = (100 + distance, 100);
        HandObservation::from_pixels(pixels)
    }

    #[test]
    fn test_close_pinch_clamps_to_zero() {
        let signal = PinchTransform::default().measure(&hand_with_pinch_distance(30));
        assert_eq!(signal.angle, 0);
        assert!(signal.pinch_detected);
    }

    #[test]
    fn test_far_pinch_clamps_to_max() {
        let signal = PinchTransform::default().measure(&hand_with_pinch_distance(400));
        assert_eq!(signal.angle, 180);
        assert!(!signal.pinch_detected);
    }

    #[test]
    fn test_midpoint_distance_interpolates_linearly() {
        let signal = PinchTransform::default().measure(&hand_with_pinch_distance(185));
        assert_eq!(signal.angle, 90);
        assert!((signal.distance - 185.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly at the near threshold: angle 0 but no pinch flag
        let signal = PinchTransform::default().measure(&hand_with_pinch_distance(50));
        assert_eq!(signal.angle, 0);
        assert!(!signal.pinch_detected);
    }

    #[test]
    fn test_diagonal_distance() {
        let mut pixels = [(0, 0); NUM_HAND_LANDMARKS];
        pixels[index::THUMB_TIP] = (100, 100);
        pixels[index::INDEX_FINGER_TIP] = (103, 104);
        let hand = HandObservation::from_pixels(pixels);

        let signal = PinchTransform::default().measure(&hand);
        assert!((signal.distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint() {
        let hand = hand_with_pinch_distance(100);
        assert_eq!(PinchTransform::midpoint(&hand), (150, 100));
    }
}
