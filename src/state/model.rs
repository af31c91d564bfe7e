//! Coordinator state model.
//!
//! `SharedState` is the single record the coordinator owns: the last
//! sensor reading and the current control intent.  It is only ever
//! touched through the [`StateStore`](super::store::StateStore), which
//! hands out copies, so every type here is plain `Copy` data.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest raw value the soil-moisture ADC produces (12-bit, fully dry).
pub const MOISTURE_RAW_MAX: u16 = 4095;

/// Highest sprinkler angle the servo accepts.
pub const ANGLE_MAX_DEG: u8 = 180;

/// Sprinkler angle at process start.
pub const DEFAULT_ANGLE_DEG: u8 = 90;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Who decides the pump state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pump follows moisture and rain.
    #[default]
    Auto,
    /// Pump follows the user's override flag.
    Manual,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a mode string is neither `auto` nor `manual`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode {:?}", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for Mode {
    type Err = UnknownMode;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(UnknownMode(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor side
// ---------------------------------------------------------------------------

/// Last-known soil and rain observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorReading {
    /// Raw ADC value, always within `0..=MOISTURE_RAW_MAX`.  Higher = drier.
    pub moisture_raw: u16,
    pub rain_detected: bool,
    /// Time of the last ingest; `None` until the device first reports.
    pub observed_at: Option<DateTime<Utc>>,
}

/// A reading as delivered by the ingest gateway, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorSample {
    pub moisture_raw: i64,
    pub rain_detected: bool,
}

impl SensorSample {
    pub fn new(moisture_raw: i64, rain_detected: bool) -> Self {
        Self {
            moisture_raw,
            rain_detected,
        }
    }

    /// Moisture clamped into the ADC range.
    pub fn clamped_moisture(&self) -> u16 {
        self.moisture_raw.clamp(0, i64::from(MOISTURE_RAW_MAX)) as u16
    }
}

// ---------------------------------------------------------------------------
// Control side
// ---------------------------------------------------------------------------

/// What the user (or auto logic) wants the actuators to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlIntent {
    pub mode: Mode,
    /// "Force the pump on".  Only authoritative in [`Mode::Manual`].
    pub pump_override: bool,
    /// Sprinkler direction, always within `0..=ANGLE_MAX_DEG`.
    pub angle_deg: u8,
}

impl Default for ControlIntent {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            pump_override: false,
            angle_deg: DEFAULT_ANGLE_DEG,
        }
    }
}

impl ControlIntent {
    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: &ControlPatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(pump) = patch.pump_override {
            self.pump_override = pump;
        }
        if let Some(angle) = patch.angle_deg {
            self.angle_deg = clamp_angle(angle);
        }
    }
}

/// Partial update of a [`ControlIntent`].  `None` means "keep".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPatch {
    pub mode: Option<Mode>,
    pub pump_override: Option<bool>,
    /// Unclamped; the store clamps on write.
    pub angle_deg: Option<i64>,
}

impl ControlPatch {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.pump_override.is_none() && self.angle_deg.is_none()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_pump(mut self, on: bool) -> Self {
        self.pump_override = Some(on);
        self
    }

    pub fn with_angle(mut self, angle_deg: i64) -> Self {
        self.angle_deg = Some(angle_deg);
        self
    }
}

pub fn clamp_angle(angle_deg: i64) -> u8 {
    angle_deg.clamp(0, i64::from(ANGLE_MAX_DEG)) as u8
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// The coordinator's whole mutable state, copied out as one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SharedState {
    pub reading: SensorReading,
    pub intent: ControlIntent,
}
