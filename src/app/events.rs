//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port once each operation has
//! committed.  Adapters decide what to do with them.

use crate::resolver::{PumpReason, ResolvedStatus};
use crate::state::{ControlIntent, SensorReading};

/// Structured events emitted by the coordinator core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The device delivered a reading (already clamped and stamped).
    SensorIngested(SensorReading),

    /// A user control write landed; carries the resulting intent.
    ControlUpdated(ControlIntent),

    /// A status query was answered.
    StatusResolved {
        status: ResolvedStatus,
        reason: PumpReason,
        /// Whether resolution wrote the auto-mode pump flag back.
        committed: bool,
    },
}
