//! Idle-based completion detection.
//!
//! There is no stroke recognition: any drawing followed by
//! `COMPLETION_DELAY_MS` of inactivity counts as correct. The timer is armed
//! on pointer-up, superseded by every further draw input, and once the
//! checking phase starts the stage/character can never be checked again.
//!
//! ```text
//! Idle --draw--> Armed --idle 1500ms--> Checking --1500ms--> Resolved
//!                  ^  |
//!                  +--+ draw input cancels the pending check
//! ```

use crate::core::timer::{TimerHandle, TimerQueue};

/// Inactivity after pointer-up before the checking phase starts.
pub const COMPLETION_DELAY_MS: f64 = 1500.0;

/// Length of the "checking" indicator.
pub const CHECKING_DELAY_MS: f64 = 1500.0;

/// Pause after speaking a resolved character, before the celebration.
pub const ANNOUNCE_DELAY_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPhase {
    /// Nothing drawn yet for this stage/character.
    Idle,
    /// Something was drawn; a check may be pending.
    Armed,
    /// Idle timer fired; the checking indicator is up.
    Checking,
    /// One-shot: the instance has been resolved.
    Resolved,
}

/// Completion state for one stage/character instance.
#[derive(Debug, Clone)]
pub struct CompletionTimer {
    phase: CompletionPhase,
    pending: Option<TimerHandle>,
}

impl CompletionTimer {
    pub fn new() -> Self {
        Self {
            phase: CompletionPhase::Idle,
            pending: None,
        }
    }

    pub fn phase(&self) -> CompletionPhase {
        self.phase
    }

    /// The idle check currently scheduled, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Draw input is only accepted before the checking phase.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, CompletionPhase::Idle | CompletionPhase::Armed)
    }

    /// Register draw input: leaves Idle and cancels any pending check.
    /// Returns false once checking has started.
    pub fn note_input<T>(&mut self, timers: &mut TimerQueue<T>) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.cancel(timers);
        self.phase = CompletionPhase::Armed;
        true
    }

    /// Pointer-up after drawing: cancel any pending check and schedule a new one.
    pub fn arm<T>(&mut self, timers: &mut TimerQueue<T>, payload: T) -> Option<TimerHandle> {
        if self.phase != CompletionPhase::Armed {
            return None;
        }
        self.cancel(timers);
        let handle = timers.schedule(COMPLETION_DELAY_MS, payload);
        log::debug!("completion check armed ({handle:?})");
        self.pending = Some(handle);
        Some(handle)
    }

    /// A completion timer fired. Only the live pending check moves the
    /// instance into Checking; anything else is stale and ignored.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) || self.phase != CompletionPhase::Armed {
            log::debug!("ignoring stale completion timer {handle:?}");
            return false;
        }
        self.pending = None;
        self.phase = CompletionPhase::Checking;
        true
    }

    /// Checking finished. Returns false if not checking (already resolved).
    pub fn resolve(&mut self) -> bool {
        if self.phase != CompletionPhase::Checking {
            return false;
        }
        self.phase = CompletionPhase::Resolved;
        true
    }

    /// Cancel the pending check, if any, without changing phase.
    pub fn cancel<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(handle) = self.pending.take() {
            if timers.cancel(handle) {
                log::debug!("completion check {handle:?} superseded");
            }
        }
    }

    /// Back to Idle for a new stage/character.
    pub fn reset<T>(&mut self, timers: &mut TimerQueue<T>) {
        self.cancel(timers);
        self.phase = CompletionPhase::Idle;
    }
}

impl Default for CompletionTimer {
    fn default() -> Self {
        Self::new()
    }
}
