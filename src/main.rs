//! Rounded Timer - a countdown timer with a round dial and repeating alarm
//!
//! This is the main entry point for the rounded-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use rounded_timer::{
    api::create_router,
    config::Config,
    services::alarm_for,
    state::{AppState, MonotonicClock},
    tasks::ticker_task,
    utils::shutdown_signal,
};

// One thread owns the timer; ticks and requests are interleaved on it.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("rounded_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting rounded-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, dial={}x{}, mute={}",
          config.host, config.port, config.tick_ms, config.width, config.height, config.mute);

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        (config.width, config.height),
        Arc::new(MonotonicClock::new()),
        alarm_for(config.mute),
    ));

    // Start the tick-and-redraw background task
    let ticker_state = Arc::clone(&state);
    let period = config.tick_period();
    tokio::spawn(async move {
        ticker_task(ticker_state, period).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Timer running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /          - Control page");
    info!("  POST /start     - Start countdown (minutes, seconds, repeat, repeat_minutes, repeat_seconds)");
    info!("  POST /stop      - Stop countdown");
    info!("  POST /reset     - Stop countdown and clear the dial");
    info!("  GET  /status    - Current timer status");
    info!("  GET  /dial.svg  - Current dial frame");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Timer shutdown complete");
    Ok(())
}
