//! External service module
//!
//! This module contains the side effects the timer triggers outside the
//! process, currently just the expiry alarm.

pub mod alarm;

// Re-export main types
pub use alarm::{alarm_for, Alarm, SilentAlarm, TerminalBell};
