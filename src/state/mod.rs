//! State management module
//!
//! This module contains the countdown state machine, the clock it is driven
//! by, and the application state that owns both.

pub mod app_state;
pub mod clock;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerSnapshot};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use timer_state::{Phase, TickOutcome, TimerState};
