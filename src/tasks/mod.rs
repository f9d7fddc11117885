//! Background tasks module
//!
//! This module contains the task that drives the timer alongside the HTTP
//! server.

pub mod ticker;

// Re-export main functions
pub use ticker::{pulse, ticker_task};
