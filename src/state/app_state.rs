//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{Clock, TickOutcome, TimerState};
use crate::{
    render::{format_time, render_dial, SvgCanvas},
    services::Alarm,
};

/// Point-in-time view of the timer for clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub running: bool,
    /// Remaining time while running, last configured duration otherwise
    pub remaining_millis: u64,
    pub display: String,
    pub repeat_interval_millis: u64,
    pub last_duration_millis: u64,
    /// Expiry alerts emitted since startup
    pub alerts: u64,
}

/// Application state owning the single timer and everything that drives it
pub struct AppState {
    timer: Mutex<TimerState>,
    clock: Arc<dyn Clock>,
    alarm: Box<dyn Alarm>,
    alerts: AtomicU64,
    /// Surface size painted on every tick
    pub dial_width: u32,
    pub dial_height: u32,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Latest painted dial frame
    frame_tx: watch::Sender<String>,
    /// Keep the receiver alive to prevent channel closure
    _frame_rx: watch::Receiver<String>,
}

impl AppState {
    /// Create an idle timer state; the first frame is painted immediately
    pub fn new(
        port: u16,
        host: String,
        (dial_width, dial_height): (u32, u32),
        clock: Arc<dyn Clock>,
        alarm: Box<dyn Alarm>,
    ) -> Self {
        let mut canvas = SvgCanvas::new(dial_width, dial_height);
        render_dial(&mut canvas, dial_width, dial_height, 0);
        let (frame_tx, frame_rx) = watch::channel(canvas.finish());

        Self {
            timer: Mutex::new(TimerState::new()),
            clock,
            alarm,
            alerts: AtomicU64::new(0),
            dial_width,
            dial_height,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            frame_tx,
            _frame_rx: frame_rx,
        }
    }

    /// Apply an update to the timer under its lock and record the action
    fn update_timer<F, T>(&self, action: &str, updater: F) -> Result<T, String>
    where
        F: FnOnce(&mut TimerState, u64) -> T,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let result = updater(&mut timer, self.clock.now_millis());
        drop(timer); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(result)
    }

    /// Start a countdown. Returns false when the duration was zero and the
    /// request was ignored.
    pub fn start(&self, duration_millis: u64, repeat_millis: Option<u64>) -> Result<bool, String> {
        let started = self.update_timer("start", |timer, now| {
            timer.start(duration_millis, repeat_millis, now)
        })?;

        if started {
            info!(
                "Timer started: {} (repeat every {})",
                format_time(duration_millis),
                repeat_millis.filter(|&r| r > 0).map(format_time).unwrap_or_else(|| "off".to_string())
            );
        } else {
            debug!("Ignoring start with zero duration");
        }
        Ok(started)
    }

    /// Stop the countdown, keeping the last duration on the dial
    pub fn stop(&self) -> Result<(), String> {
        self.update_timer("stop", |timer, _| timer.stop())?;
        info!("Timer stopped");
        Ok(())
    }

    /// Stop the countdown and clear the dial
    pub fn reset(&self) -> Result<(), String> {
        self.update_timer("reset", |timer, _| timer.reset())?;
        info!("Timer reset");
        Ok(())
    }

    /// Advance the timer to the current instant, ringing the alarm on expiry
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let now = self.clock.now_millis();
        let outcome = self.timer.lock()
            .map(|mut timer| timer.tick(now))
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        if let TickOutcome::Expired { rearmed } = outcome {
            self.alarm.ring();
            let total = self.alerts.fetch_add(1, Ordering::SeqCst) + 1;
            if rearmed {
                info!("Timer expired (alert #{}), re-armed for next interval", total);
            } else {
                info!("Timer expired (alert #{}), stopping", total);
            }
        }

        Ok(outcome)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer.lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Snapshot of the timer at the current instant
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        let timer = self.get_timer_state()?;
        let remaining_millis = timer.remaining_or_last_millis(self.clock.now_millis());

        Ok(TimerSnapshot {
            running: timer.is_running(),
            remaining_millis,
            display: format_time(remaining_millis),
            repeat_interval_millis: timer.repeat_interval_millis(),
            last_duration_millis: timer.last_duration_millis(),
            alerts: self.alert_count(),
        })
    }

    pub fn alert_count(&self) -> u64 {
        self.alerts.load(Ordering::SeqCst)
    }

    /// Paint the dial for the current instant onto a `width` x `height` surface
    pub fn render_frame(&self, width: u32, height: u32) -> Result<String, String> {
        let display_millis = self.get_timer_state()?
            .remaining_or_last_millis(self.clock.now_millis());

        let mut canvas = SvgCanvas::new(width, height);
        render_dial(&mut canvas, width, height, display_millis);
        Ok(canvas.finish())
    }

    /// Repaint the dial at the configured size and publish the frame
    pub fn redraw(&self) -> Result<(), String> {
        let frame = self.render_frame(self.dial_width, self.dial_height)?;
        self.frame_tx.send_replace(frame);
        Ok(())
    }

    /// Most recently published frame
    pub fn latest_frame(&self) -> String {
        self.frame_tx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("timer", &self.timer)
            .field("alerts", &self.alerts)
            .field("dial_width", &self.dial_width)
            .field("dial_height", &self.dial_height)
            .field("port", &self.port)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}
