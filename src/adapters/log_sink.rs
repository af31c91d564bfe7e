//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each application event as one line
//! through the `log` facade.  The binary routes those records into its
//! tracing subscriber.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&self, event: &AppEvent) {
        match event {
            AppEvent::SensorIngested(r) => {
                info!(
                    "SENSOR | moisture_raw={} | rain={}",
                    r.moisture_raw,
                    if r.rain_detected { "yes" } else { "no" },
                );
            }
            AppEvent::ControlUpdated(c) => {
                info!(
                    "CONTROL | mode={} | pump_override={} | angle={}\u{00b0}",
                    c.mode,
                    u8::from(c.pump_override),
                    c.angle_deg,
                );
            }
            AppEvent::StatusResolved {
                status,
                reason,
                committed,
            } => {
                info!(
                    "STATUS | moisture={}% (raw {}) | mode={} | pump={} ({}){}",
                    status.moisture_percent,
                    status.moisture_raw,
                    status.mode,
                    if status.pump_active { "ON" } else { "OFF" },
                    reason,
                    if *committed { "" } else { " | intent untouched" },
                );
            }
        }
    }
}
