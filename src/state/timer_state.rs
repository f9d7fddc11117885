//! Countdown state machine
//!
//! The timer stores the absolute instant at which the countdown reaches zero
//! rather than a remaining-time counter. Every query recomputes the remaining
//! time from the caller's `now`, so an irregular tick cadence never causes
//! the display to drift.

use serde::{Deserialize, Serialize};

/// Where the countdown currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Phase {
    Idle,
    /// Counting down toward `end_millis`
    Running { end_millis: u64 },
}

/// What a single tick observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing changed
    Idle,
    /// Still counting down
    Counting { remaining_millis: u64 },
    /// The countdown reached zero during this tick. `rearmed` tells whether
    /// a repeat interval put the timer back into the running phase.
    Expired { rearmed: bool },
}

/// Timer state for the single countdown owned by the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    phase: Phase,
    /// 0 means the timer stops after expiry
    repeat_interval_millis: u64,
    /// Shown on the dial whenever the timer is not running
    last_duration_millis: u64,
}

impl TimerState {
    /// Create an idle timer with nothing configured
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            repeat_interval_millis: 0,
            last_duration_millis: 0,
        }
    }

    /// Start a countdown of `duration_millis` from `now`.
    ///
    /// A zero duration is ignored and leaves the state untouched. `repeat_millis`
    /// is the re-arm interval used after each expiry; `None` or `Some(0)`
    /// disables re-arming. Returns whether the timer was started.
    pub fn start(&mut self, duration_millis: u64, repeat_millis: Option<u64>, now: u64) -> bool {
        if duration_millis == 0 {
            return false;
        }

        self.last_duration_millis = duration_millis;
        self.phase = Phase::Running {
            end_millis: now.saturating_add(duration_millis),
        };
        self.repeat_interval_millis = repeat_millis.unwrap_or(0);
        true
    }

    /// Stop the countdown. The last configured duration stays on the display.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Stop the countdown and forget the last duration so the display reads 00:00
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.last_duration_millis = 0;
    }

    /// Advance the state machine to `now`.
    ///
    /// Expiry is handled as one transition: the caller gets exactly one
    /// `Expired` per crossing and the state is already re-armed or idle when
    /// this returns.
    pub fn tick(&mut self, now: u64) -> TickOutcome {
        let end_millis = match self.phase {
            Phase::Idle => return TickOutcome::Idle,
            Phase::Running { end_millis } => end_millis,
        };

        if end_millis > now {
            return TickOutcome::Counting {
                remaining_millis: end_millis - now,
            };
        }

        if self.repeat_interval_millis > 0 {
            self.phase = Phase::Running {
                end_millis: now.saturating_add(self.repeat_interval_millis),
            };
            TickOutcome::Expired { rearmed: true }
        } else {
            self.phase = Phase::Idle;
            TickOutcome::Expired { rearmed: false }
        }
    }

    /// Time to show on the dial: the clamped remaining time while running,
    /// the last configured duration otherwise.
    pub fn remaining_or_last_millis(&self, now: u64) -> u64 {
        match self.phase {
            Phase::Running { end_millis } => end_millis.saturating_sub(now),
            Phase::Idle => self.last_duration_millis,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Absolute end instant, only present while running
    pub fn end_millis(&self) -> Option<u64> {
        match self.phase {
            Phase::Running { end_millis } => Some(end_millis),
            Phase::Idle => None,
        }
    }

    pub fn repeat_interval_millis(&self) -> u64 {
        self.repeat_interval_millis
    }

    pub fn last_duration_millis(&self) -> u64 {
        self.last_duration_millis
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
