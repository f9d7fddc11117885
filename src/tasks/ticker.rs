//! Periodic tick-and-redraw task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, trace};

use crate::state::{AppState, TickOutcome};

/// Background task that advances the timer and repaints the dial every
/// `period`. Remaining time is always recomputed from the clock, so late or
/// skipped pulses only delay the display, never skew it.
pub async fn ticker_task(state: Arc<AppState>, period: Duration) {
    info!("Starting ticker task ({}ms cadence)", period.as_millis());

    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        pulse(&state);
    }
}

/// One tick: advance the timer, then request a redraw
pub fn pulse(state: &AppState) {
    match state.tick() {
        Ok(TickOutcome::Counting { remaining_millis }) => {
            trace!("Tick: {}ms remaining", remaining_millis);
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to advance timer: {}", e);
            return;
        }
    }

    if let Err(e) = state.redraw() {
        error!("Failed to redraw dial: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::SilentAlarm,
        state::ManualClock,
    };

    fn app(clock: Arc<ManualClock>) -> Arc<AppState> {
        Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            (300, 300),
            clock,
            Box::new(SilentAlarm),
        ))
    }

    #[test]
    fn pulse_advances_and_repaints() {
        let clock = Arc::new(ManualClock::new(0));
        let state = app(clock.clone());
        state.start(3_000, None).unwrap();

        clock.set(1_000);
        pulse(&state);
        assert!(state.latest_frame().contains(">00:02</text>"));

        clock.set(3_000);
        pulse(&state);
        assert_eq!(state.alert_count(), 1);
        assert!(state.latest_frame().contains(">00:03</text>"));
    }

    #[tokio::test(start_paused = true)]
    async fn task_ticks_on_its_own() {
        let clock = Arc::new(ManualClock::new(0));
        let state = app(clock.clone());
        state.start(500, None).unwrap();
        clock.set(600);

        let handle = tokio::spawn(ticker_task(Arc::clone(&state), Duration::from_millis(100)));
        tokio::time::sleep(Duration::from_millis(350)).await;
        handle.abort();

        assert_eq!(state.alert_count(), 1);
        assert!(!state.snapshot().unwrap().running);
    }
}
