//! Start-form parsing
//!
//! The control surface hands over the raw text of its fields. Everything is
//! parsed and validated here before the timer is touched, so a bad field
//! never leaves the timer half-updated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to the user when a field does not hold a number
pub const INVALID_INPUT_MESSAGE: &str = "Enter valid numbers.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid duration input in `{field}`: {value:?}")]
    InvalidDurationInput { field: &'static str, value: String },
}

/// Raw field values from the start form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartFields {
    #[serde(default)]
    pub minutes: String,
    #[serde(default)]
    pub seconds: String,
    /// Checkbox; browsers omit it when unchecked
    #[serde(default)]
    pub repeat: Option<String>,
    #[serde(default)]
    pub repeat_minutes: String,
    #[serde(default)]
    pub repeat_seconds: String,
}

/// A validated start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRequest {
    /// Total duration was zero or negative; nothing to do
    Ignored,
    Start {
        duration_millis: u64,
        repeat_millis: Option<u64>,
    },
}

fn parse_field(field: &'static str, value: &str) -> Result<i32, InputError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| InputError::InvalidDurationInput {
            field,
            value: value.to_string(),
        })
}

fn total_millis(minutes: i32, seconds: i32) -> i64 {
    (i64::from(minutes) * 60 + i64::from(seconds)) * 1000
}

impl StartFields {
    pub fn new(minutes: &str, seconds: &str) -> Self {
        Self {
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
            ..Self::default()
        }
    }

    pub fn with_repeat(mut self, minutes: &str, seconds: &str) -> Self {
        self.repeat = Some("on".to_string());
        self.repeat_minutes = minutes.to_string();
        self.repeat_seconds = seconds.to_string();
        self
    }

    pub fn repeat_enabled(&self) -> bool {
        self.repeat.as_deref().is_some_and(|v| v != "off" && v != "false")
    }

    /// Parse and validate the form.
    ///
    /// Repeat fields are only read when the repeat box is checked. A
    /// non-positive repeat total disables re-arming.
    pub fn parse(&self) -> Result<StartRequest, InputError> {
        let minutes = parse_field("minutes", &self.minutes)?;
        let seconds = parse_field("seconds", &self.seconds)?;

        let repeat_millis = if self.repeat_enabled() {
            let minutes = parse_field("repeat_minutes", &self.repeat_minutes)?;
            let seconds = parse_field("repeat_seconds", &self.repeat_seconds)?;
            Some(total_millis(minutes, seconds).max(0) as u64)
        } else {
            None
        };

        let duration = total_millis(minutes, seconds);
        if duration <= 0 {
            return Ok(StartRequest::Ignored);
        }

        Ok(StartRequest::Start {
            duration_millis: duration as u64,
            repeat_millis,
        })
    }
}
