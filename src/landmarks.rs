//! Hand landmark types and the normalized-to-pixel adapter.
//!
//! The landmark detector reports zero or more hands, each as 21 points in
//! image-normalized coordinates (MediaPipe hand landmark convention). This
//! module adapts the first detected hand into a fixed-size, pixel-space
//! [`HandObservation`] consumed by the classifier and the pinch transform.

use crate::constants::NUM_HAND_LANDMARKS;

/// Hand landmark indices (MediaPipe hand landmark model convention)
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single landmark in image-normalized coordinates, as produced by the
/// detector (x and y in `[0, 1]` relative to frame width and height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
}

/// A single landmark in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkPoint {
    /// Landmark id, 0..=20
    pub id: u8,
    /// Pixel x coordinate
    pub x: i32,
    /// Pixel y coordinate
    pub y: i32,
}

/// One detected hand: exactly 21 landmark points with ids 0..20 in order.
///
/// Produced fresh each frame; owned by that frame's processing pass and
/// never persisted. Absence of a hand is represented by the callers as
/// `Option<HandObservation>`, not by a sentinel observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandObservation {
    points: [LandmarkPoint; NUM_HAND_LANDMARKS],
}

impl HandObservation {
    /// Adapt the detector's normalized landmarks into pixel space.
    ///
    /// Coordinates are truncated to integers, matching the original pixel
    /// conversion. Returns `None` if the detector did not produce exactly
    /// 21 landmarks; a missing hand is expected and is not an error.
    #[allow(clippy::cast_possible_truncation)] // Pixel coordinates fit in i32
    #[allow(clippy::cast_precision_loss)]
    pub fn from_normalized(
        landmarks: &[NormalizedLandmark],
        frame_width: i32,
        frame_height: i32,
    ) -> Option<Self> {
        if landmarks.len() != NUM_HAND_LANDMARKS {
            return None;
        }

        let mut points = [LandmarkPoint { id: 0, x: 0, y: 0 }; NUM_HAND_LANDMARKS];
        for (id, lm) in landmarks.iter().enumerate() {
            points[id] = LandmarkPoint {
                id: id as u8,
                x: (lm.x * frame_width as f32) as i32,
                y: (lm.y * frame_height as f32) as i32,
            };
        }

        Some(Self { points })
    }

    /// Build an observation directly from pixel coordinates, one `(x, y)`
    /// pair per landmark id in order. Used by tests and synthetic inputs.
    pub fn from_pixels(pixels: [(i32, i32); NUM_HAND_LANDMARKS]) -> Self {
        let mut points = [LandmarkPoint { id: 0, x: 0, y: 0 }; NUM_HAND_LANDMARKS];
        for (id, (x, y)) in pixels.into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // id < 21
            let point = LandmarkPoint { id: id as u8, x, y };
            points[id] = point;
        }
        Self { points }
    }

    /// Landmark with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id >= 21`; ids are validated at construction.
    #[must_use]
    pub fn point(&self, id: usize) -> LandmarkPoint {
        self.points[id]
    }

    /// All 21 landmarks, ordered by id
    #[must_use]
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_normalized_pixel_conversion() {
        let mut landmarks = vec![NormalizedLandmark { x: 0.0, y: 0.0 }; NUM_HAND_LANDMARKS];
        landmarks[4] = NormalizedLandmark { x: 0.5, y: 0.25 };

        let hand = HandObservation::from_normalized(&landmarks, 640, 480).unwrap();
        let tip = hand.point(index::THUMB_TIP);
        assert_eq!(tip.id, 4);
        assert_eq!(tip.x, 320);
        assert_eq!(tip.y, 120);
    }

    #[test]
    fn test_from_normalized_truncates() {
        let mut landmarks = vec![NormalizedLandmark { x: 0.0, y: 0.0 }; NUM_HAND_LANDMARKS];
        landmarks[0] = NormalizedLandmark { x: 0.999, y: 0.999 };

        let hand = HandObservation::from_normalized(&landmarks, 100, 100).unwrap();
        assert_eq!(hand.point(index::WRIST).x, 99);
        assert_eq!(hand.point(index::WRIST).y, 99);
    }

    #[test]
    fn test_from_normalized_rejects_wrong_length() {
        let landmarks = vec![NormalizedLandmark { x: 0.5, y: 0.5 }; 20];
        assert!(HandObservation::from_normalized(&landmarks, 640, 480).is_none());
    }

    #[test]
    fn test_ids_are_ordered() {
        let hand = HandObservation::from_pixels([(0, 0); NUM_HAND_LANDMARKS]);
        for (i, point) in hand.points().iter().enumerate() {
            assert_eq!(usize::from(point.id), i);
        }
    }
}
