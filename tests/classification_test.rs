//! Integration tests for landmark adaptation and finger classification

mod test_helpers;

use gesture_automation::actions::GestureAction;
use gesture_automation::constants::NUM_HAND_LANDMARKS;
use gesture_automation::finger_classifier::{create_thumb_rule, FingerClassifier};
use gesture_automation::landmarks::{HandObservation, NormalizedLandmark};
use gesture_automation::pinch::PinchTransform;
use test_helpers::{hand_with_count, hand_with_pinch_distance};

#[test]
fn test_counts_map_to_expected_actions() {
    let classifier = FingerClassifier::default();

    let cases = [
        (0u8, GestureAction::LightOff),
        (1, GestureAction::FanOn),
        (2, GestureAction::Unspecified),
        (3, GestureAction::Unspecified),
        (4, GestureAction::FanOff),
        (5, GestureAction::LightOn),
    ];

    for (count, expected) in cases {
        let state = classifier.classify(&hand_with_count(count));
        assert_eq!(state.count(), count);
        assert_eq!(GestureAction::from_count(state.count()), expected);
    }
}

#[test]
fn test_count_stays_in_range_for_arbitrary_geometry() {
    let classifier = FingerClassifier::default();

    // A grid of synthetic geometries; counts must always land in 0..=5
    for dx in [-200, -100, 0, 100, 200] {
        for dy in [-200, -100, 0, 100, 200] {
            let mut pixels = [(300, 300); NUM_HAND_LANDMARKS];
            for tip in [4usize, 8, 12, 16, 20] {
                pixels[tip] = (300 + dx, 300 + dy);
            }
            let hand = HandObservation::from_pixels(pixels);
            let count = classifier.classify(&hand).count();
            assert!(count <= 5, "count {count} out of range for dx={dx} dy={dy}");
        }
    }
}

#[test]
fn test_swapping_thumb_rule_flips_thumb_only() {
    let hand = hand_with_count(1); // thumb raised under the mirrored rule

    let mirrored = FingerClassifier::new(create_thumb_rule("mirrored").unwrap());
    let unmirrored = FingerClassifier::new(create_thumb_rule("unmirrored").unwrap());

    assert_eq!(mirrored.classify(&hand).count(), 1);
    assert_eq!(unmirrored.classify(&hand).count(), 0);
}

#[test]
fn test_normalized_adapter_feeds_classifier() {
    // Open hand in normalized coordinates: thumb tip left of IP joint,
    // finger tips above their mid joints
    let mut landmarks = vec![NormalizedLandmark { x: 0.5, y: 0.5 }; NUM_HAND_LANDMARKS];
    landmarks[4] = NormalizedLandmark { x: 0.2, y: 0.5 };
    for tip in [8usize, 12, 16, 20] {
        landmarks[tip] = NormalizedLandmark { x: 0.5, y: 0.25 };
    }

    let hand = HandObservation::from_normalized(&landmarks, 640, 480).unwrap();
    let state = FingerClassifier::default().classify(&hand);
    assert_eq!(state.count(), 5);
}

#[test]
fn test_pinch_law_endpoints_and_midpoint() {
    let transform = PinchTransform::default();

    assert_eq!(transform.measure(&hand_with_pinch_distance(10)).angle, 0);
    assert_eq!(transform.measure(&hand_with_pinch_distance(50)).angle, 0);
    assert_eq!(transform.measure(&hand_with_pinch_distance(185)).angle, 90);
    assert_eq!(transform.measure(&hand_with_pinch_distance(320)).angle, 180);
    assert_eq!(transform.measure(&hand_with_pinch_distance(500)).angle, 180);
}

#[test]
fn test_pinch_flag_uses_raw_distance() {
    let transform = PinchTransform::default();

    assert!(transform.measure(&hand_with_pinch_distance(49)).pinch_detected);
    assert!(!transform.measure(&hand_with_pinch_distance(50)).pinch_detected);
    assert!(!transform.measure(&hand_with_pinch_distance(51)).pinch_detected);
}
