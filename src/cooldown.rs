//! Cooldown state machine gating action emission.
//!
//! A user holding a gesture produces the same actionable count for many
//! consecutive frames; without gating, every frame would re-trigger the
//! action. The machine arms on the first actionable frame and suppresses
//! further triggers until a fixed idle interval has elapsed.

use std::time::{Duration, Instant};

/// Current phase of the cooldown machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownPhase {
    /// Ready to accept the next actionable gesture
    Idle,
    /// A gesture fired at `activated_at`; triggers are suppressed until the
    /// cooldown interval elapses
    Active {
        /// When the gating trigger fired
        activated_at: Instant,
    },
}

/// Debounce state threaded through the per-frame step function.
///
/// Owned by the host loop, never global. All transitions are pure
/// arithmetic over the injected `now`; the machine cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownState {
    phase: CooldownPhase,
    cooldown: Duration,
}

impl CooldownState {
    /// Create an idle state with the given cooldown interval
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            phase: CooldownPhase::Idle,
            cooldown,
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> CooldownPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, CooldownPhase::Active { .. })
    }

    /// Configured cooldown interval
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Active → Idle reset check. Runs every frame regardless of the
    /// current gesture. Returns true if the machine reset on this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let CooldownPhase::Active { activated_at } = self.phase {
            if now.saturating_duration_since(activated_at) >= self.cooldown {
                self.phase = CooldownPhase::Idle;
                return true;
            }
        }
        false
    }

    /// Idle → Active transition attempt. Returns true when the caller's
    /// actionable gesture is allowed to fire; while active, repeated
    /// attempts neither re-trigger nor reset the timer.
    pub fn try_trigger(&mut self, now: Instant) -> bool {
        match self.phase {
            CooldownPhase::Idle => {
                self.phase = CooldownPhase::Active { activated_at: now };
                true
            }
            CooldownPhase::Active { .. } => false,
        }
    }
}
