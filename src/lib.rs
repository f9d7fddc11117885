//! Rounded Timer - a countdown timer with a round dial and repeating alarm
//!
//! The timer itself is a small state machine driven by an explicit `now`.
//! Around it sit a periodic ticker, a dial renderer, and a local HTTP
//! control surface that plays the part of the window and its widgets.

pub mod api;
pub mod config;
pub mod controls;
pub mod render;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controls::{InputError, StartFields, StartRequest};
pub use state::{AppState, TimerState};
pub use utils::signals::shutdown_signal;
