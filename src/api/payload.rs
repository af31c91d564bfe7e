//! JSON payload shapes exchanged with the device and dashboards.
//!
//! Field names and the 0/1 integer encoding of booleans are what the
//! deployed device firmware and dashboards speak; do not rename.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::service::HealthReport;
use crate::resolver::ResolvedStatus;
use crate::state::{ControlIntent, Mode};

/// Body of `POST /data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorIngest {
    pub moisture: i64,
    /// 1 = raining.
    pub rain: i64,
}

/// Body of `GET /control`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlView {
    pub pump: u8,
    pub angle: u8,
    pub mode: Mode,
}

impl From<&ControlIntent> for ControlView {
    fn from(intent: &ControlIntent) -> Self {
        Self {
            pump: u8::from(intent.pump_override),
            angle: intent.angle_deg,
            mode: intent.mode,
        }
    }
}

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub moisture: u16,
    pub moisture_percent: u8,
    pub rain: u8,
    pub pump_status: u8,
    pub mode: Mode,
    pub angle: u8,
}

impl From<&ResolvedStatus> for StatusView {
    fn from(s: &ResolvedStatus) -> Self {
        Self {
            moisture: s.moisture_raw,
            moisture_percent: s.moisture_percent,
            rain: u8::from(s.rain_detected),
            pump_status: u8::from(s.pump_active),
            mode: s.mode,
            angle: s.angle_deg,
        }
    }
}

/// Acknowledgement for write routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

impl Ack {
    pub const SUCCESS: Self = Self { status: "success" };
    pub const UPDATED: Self = Self { status: "updated" };
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthView {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub last_observed_at: Option<DateTime<Utc>>,
    pub sensor_age_seconds: Option<i64>,
}

impl From<&HealthReport> for HealthView {
    fn from(h: &HealthReport) -> Self {
        Self {
            status: "ok".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            uptime_seconds: h.uptime_secs,
            last_observed_at: h.last_observed_at,
            sensor_age_seconds: h.sensor_age_secs,
        }
    }
}
