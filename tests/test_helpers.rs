//! Helper functions and utilities for tests
#![allow(dead_code)] // Not every test file uses every helper

use gesture_automation::constants::NUM_HAND_LANDMARKS;
use gesture_automation::landmarks::{index, HandObservation};

/// Baseline pixel layout with every landmark at (100, 200): no finger
/// clears its reference joint under the default rules, so the count is 0.
pub fn fist_pixels() -> [(i32, i32); NUM_HAND_LANDMARKS] {
    [(100, 200); NUM_HAND_LANDMARKS]
}

/// Build a synthetic observation whose raised-finger count equals `count`
/// under the default (mirrored-thumb) classifier. Fingers are raised in
/// thumb-to-pinky order.
///
/// # Panics
///
/// Panics if `count > 5`.
pub fn hand_with_count(count: u8) -> HandObservation {
    assert!(count <= 5, "count must be 0..=5");
    let mut pixels = fist_pixels();

    if count >= 1 {
        // Thumb tip left of the IP joint (mirrored rule)
        pixels[index::THUMB_TIP] = (50, 200);
    }

    let finger_tips = [
        index::INDEX_FINGER_TIP,
        index::MIDDLE_FINGER_TIP,
        index::RING_FINGER_TIP,
        index::PINKY_TIP,
    ];
    for &tip in finger_tips.iter().take(usize::from(count).saturating_sub(1)) {
        // Tip above the joint two positions down the chain
        pixels[tip] = (100, 100);
    }

    HandObservation::from_pixels(pixels)
}

/// Build an observation with thumb tip and index tip the given distance
/// apart along the x axis
pub fn hand_with_pinch_distance(distance: i32) -> HandObservation {
    let mut pixels = fist_pixels();
    pixels[index::THUMB_TIP] = (100, 100);
    pixels[index::INDEX_FINGER_TIP] = (100 + distance, 100);
    HandObservation::from_pixels(pixels)
}

/// A unique temporary file path for tests that write to disk
pub fn temp_path(name: &str) -> std::path::PathBuf {
    let unique = format!(
        "gesture_automation_test_{}_{}_{name}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    );
    std::env::temp_dir().join(unique)
}
