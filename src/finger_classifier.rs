//! Geometric finger-state classification from hand landmarks.
//!
//! Each of the four non-thumb fingers is raised when its tip sits above the
//! joint two positions below it in the same chain (smaller y in image
//! space). The thumb uses a horizontal comparison that encodes a specific
//! hand orientation, so it is expressed as a swappable [`ThumbRule`] rather
//! than a hard-coded comparison.

use crate::constants::NUM_FINGERS;
use crate::landmarks::{index, HandObservation};
use crate::Result;

/// Tip landmark ids of index, middle, ring and pinky fingers
const FINGER_TIP_IDS: [usize; 4] = [
    index::INDEX_FINGER_TIP,
    index::MIDDLE_FINGER_TIP,
    index::RING_FINGER_TIP,
    index::PINKY_TIP,
];

/// Raised/lowered state of the five fingers, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerState {
    raised: [bool; NUM_FINGERS],
}

impl FingerState {
    /// Number of raised fingers, always in 0..=5
    #[must_use]
    pub fn count(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation)] // At most 5
        let count = self.raised.iter().filter(|&&r| r).count() as u8;
        count
    }

    /// Per-finger flags in fixed order: thumb, index, middle, ring, pinky
    #[must_use]
    pub fn raised(&self) -> [bool; NUM_FINGERS] {
        self.raised
    }

    #[must_use]
    pub fn thumb(&self) -> bool {
        self.raised[0]
    }
}

/// Policy deciding whether the thumb is raised.
///
/// The thumb comparison couples the classifier to one physical hand
/// orientation (which way the tip points when extended), so it is a named
/// strategy that can be replaced without touching the rest of the
/// classifier.
pub trait ThumbRule: Send + Sync {
    /// True if the thumb is extended under this rule
    fn is_raised(&self, hand: &HandObservation) -> bool;

    /// Rule name for logs and configuration
    fn name(&self) -> &str;
}

/// Thumb rule for a right hand in a horizontally mirrored frame: the thumb
/// is raised when its tip is left of the adjacent IP joint.
pub struct MirroredThumbRule;

impl ThumbRule for MirroredThumbRule {
    fn is_raised(&self, hand: &HandObservation) -> bool {
        hand.point(index::THUMB_TIP).x < hand.point(index::THUMB_IP).x
    }

    fn name(&self) -> &str {
        "mirrored"
    }
}

/// Opposite orientation: thumb raised when its tip is right of the IP joint
/// (unmirrored right hand, or mirrored left hand).
pub struct UnmirroredThumbRule;

impl ThumbRule for UnmirroredThumbRule {
    fn is_raised(&self, hand: &HandObservation) -> bool {
        hand.point(index::THUMB_TIP).x > hand.point(index::THUMB_IP).x
    }

    fn name(&self) -> &str {
        "unmirrored"
    }
}

/// Create a thumb rule by name
///
/// # Errors
///
/// Returns an error for an unknown rule name
pub fn create_thumb_rule(name: &str) -> Result<Box<dyn ThumbRule>> {
    match name.to_lowercase().as_str() {
        "mirrored" => Ok(Box::new(MirroredThumbRule)),
        "unmirrored" => Ok(Box::new(UnmirroredThumbRule)),
        _ => Err(crate::Error::ClassifierError(format!(
            "Unknown thumb rule: {name}"
        ))),
    }
}

/// Tip landmark ids of all five fingers, thumb first. Doubles as the
/// LED identifiers in the simulated output.
const LED_TIP_IDS: [usize; NUM_FINGERS] = [
    index::THUMB_TIP,
    index::INDEX_FINGER_TIP,
    index::MIDDLE_FINGER_TIP,
    index::RING_FINGER_TIP,
    index::PINKY_TIP,
];

/// Simulated per-finger LED bank.
///
/// Stands in for the GPIO outputs of the hardware build. Each finger drives
/// one LED; transitions are written to the debug log instead of pins.
#[derive(Debug, Default)]
pub struct LedSimulator {
    last: Option<[bool; NUM_FINGERS]>,
}

impl LedSimulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame's finger state and report the LEDs that changed as
    /// `(tip landmark id, on)` pairs.
    ///
    /// The first frame after a hand appears reports every LED, so the log
    /// always starts from a known state. A `None` frame clears the bank;
    /// the next hand re-reports in full.
    pub fn update(&mut self, state: Option<&FingerState>) -> Vec<(usize, bool)> {
        let Some(state) = state else {
            self.last = None;
            return Vec::new();
        };

        let raised = state.raised();
        let changes: Vec<(usize, bool)> = LED_TIP_IDS
            .iter()
            .enumerate()
            .filter(|&(slot, _)| self.last.map_or(true, |prev| prev[slot] != raised[slot]))
            .map(|(slot, &id)| (id, raised[slot]))
            .collect();

        for &(id, on) in &changes {
            log::debug!(
                "[Simulated LED] Finger {id}: {}",
                if on { "ON" } else { "OFF" }
            );
        }

        self.last = Some(raised);
        changes
    }
}

/// Finger classifier over a single hand observation
pub struct FingerClassifier {
    thumb_rule: Box<dyn ThumbRule>,
}

impl Default for FingerClassifier {
    fn default() -> Self {
        Self::new(Box::new(MirroredThumbRule))
    }
}

impl FingerClassifier {
    /// Create a classifier with the given thumb rule
    #[must_use]
    pub fn new(thumb_rule: Box<dyn ThumbRule>) -> Self {
        Self { thumb_rule }
    }

    /// Name of the active thumb rule
    #[must_use]
    pub fn thumb_rule_name(&self) -> &str {
        self.thumb_rule.name()
    }

    /// Classify the raised/lowered state of all five fingers.
    ///
    /// Absence of a hand is handled upstream as `Option<HandObservation>`;
    /// a count of 0 from this function always means a real closed fist.
    #[must_use]
    pub fn classify(&self, hand: &HandObservation) -> FingerState {
        let mut raised = [false; NUM_FINGERS];

        raised[0] = self.thumb_rule.is_raised(hand);

        // A finger is raised when its tip is above the mid joint two
        // positions down the chain (tip id - 2).
        for (slot, &tip) in FINGER_TIP_IDS.iter().enumerate() {
            raised[slot + 1] = hand.point(tip).y < hand.point(tip - 2).y;
        }

        FingerState { raised }
    }
}
