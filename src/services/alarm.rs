//! Audible alert played when a countdown expires

use std::io::{self, Write};
use tracing::{info, warn};

/// Something that can make the expiry noise
pub trait Alarm: Send + Sync {
    fn ring(&self);
}

/// Rings the terminal bell on stdout
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn write_bell(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

impl Alarm for TerminalBell {
    fn ring(&self) {
        info!("Timer expired, ringing bell");
        if let Err(e) = self.write_bell() {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

/// Logs the expiry without making a sound
#[derive(Debug, Default)]
pub struct SilentAlarm;

impl Alarm for SilentAlarm {
    fn ring(&self) {
        info!("Timer expired (alarm muted)");
    }
}

/// Pick the alarm for the `--mute` flag
pub fn alarm_for(muted: bool) -> Box<dyn Alarm> {
    if muted {
        Box::new(SilentAlarm)
    } else {
        Box::new(TerminalBell)
    }
}
