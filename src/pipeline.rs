//! Per-frame decision pipeline: classification, action mapping, cooldown
//! gating and display output.
//!
//! [`GesturePipeline::step`] is a pure step function: `now` and the
//! [`CooldownState`] are the only carried-forward state, both injected by
//! the host loop. The pipeline performs no I/O; the optional
//! [`ResultRecord`] in its output is the host's cue to append to the log.

use crate::actions::GestureAction;
use crate::cooldown::CooldownState;
use crate::finger_classifier::{FingerClassifier, FingerState};
use crate::landmarks::HandObservation;
use crate::pinch::{ActuatorSignal, PinchTransform};
use crate::result_log::ResultRecord;
use std::time::{Duration, Instant};

/// What the display should say about the current frame's action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// An action fired on this frame
    Triggered(GestureAction),
    /// The cooldown window is open; actionable gestures are suppressed
    Waiting,
    /// Hand visible, no actionable gesture, machine idle
    Idle,
    /// No hand detected. Kept distinct from a closed fist (count 0), which
    /// is a real gesture mapping to an action.
    NoHand,
}

impl ActionStatus {
    /// Text shown on the display for this status
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Triggered(action) => action.label(),
            Self::Waiting => "Waiting for next gesture...",
            Self::Idle | Self::NoHand => "",
        }
    }
}

/// Display-facing output of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDisplay {
    /// Raised-finger count, absent when no hand was detected
    pub count: Option<u8>,
    /// Action or waiting status for the frame
    pub status: ActionStatus,
    /// Continuous pinch signal, absent when no hand was detected
    pub actuator: Option<ActuatorSignal>,
    /// Per-finger raised state, absent when no hand was detected. Drives
    /// the host's simulated LED log.
    pub fingers: Option<FingerState>,
}

/// Complete output of one pipeline step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    pub display: FrameDisplay,
    /// Present only on frames that caused an Idle→Active transition
    pub record: Option<ResultRecord>,
}

/// The per-frame decision pipeline
pub struct GesturePipeline {
    classifier: FingerClassifier,
    pinch: PinchTransform,
    subject_id: u32,
}

impl GesturePipeline {
    /// Create a pipeline with the given classifier, pinch transform and
    /// subject id for the result log
    #[must_use]
    pub fn new(classifier: FingerClassifier, pinch: PinchTransform, subject_id: u32) -> Self {
        Self {
            classifier,
            pinch,
            subject_id,
        }
    }

    /// Process one frame's observation.
    ///
    /// `now` is the host's timestamp for the start of this frame's
    /// processing and drives the cooldown arithmetic. `elapsed` is the
    /// host-measured time spent producing this frame's observation; it is
    /// copied into triggered records unchanged. The actuator signal is
    /// computed whenever a hand is present, independent of the cooldown.
    pub fn step(
        &self,
        cooldown: &mut CooldownState,
        observation: Option<&HandObservation>,
        now: Instant,
        elapsed: Duration,
    ) -> FrameStep {
        // Reset check runs every frame, before any trigger decision
        if cooldown.tick(now) {
            log::info!("Cooldown elapsed, ready for next gesture");
        }

        let Some(hand) = observation else {
            return FrameStep {
                display: FrameDisplay {
                    count: None,
                    status: ActionStatus::NoHand,
                    actuator: None,
                    fingers: None,
                },
                record: None,
            };
        };

        let state = self.classifier.classify(hand);
        let count = state.count();
        let actuator = self.pinch.measure(hand);
        let action = GestureAction::from_count(count);

        let (status, record) = if action.is_actionable() {
            if cooldown.try_trigger(now) {
                let elapsed_time = elapsed.as_secs_f64();
                log::info!("Gesture {count} -> {action}");
                (
                    ActionStatus::Triggered(action),
                    Some(ResultRecord {
                        subject_id: self.subject_id,
                        // Self-labeled: no independent ground truth is
                        // entered at capture time
                        gesture_expected: count,
                        gesture_observed: count,
                        elapsed_time,
                    }),
                )
            } else {
                (ActionStatus::Waiting, None)
            }
        } else if cooldown.is_active() {
            (ActionStatus::Waiting, None)
        } else {
            (ActionStatus::Idle, None)
        };

        FrameStep {
            display: FrameDisplay {
                count: Some(count),
                status,
                actuator: Some(actuator),
                fingers: Some(state),
            },
            record,
        }
    }

    /// Subject id carried into emitted records
    #[must_use]
    pub fn subject_id(&self) -> u32 {
        self.subject_id
    }
}
