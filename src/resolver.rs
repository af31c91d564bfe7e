//! Control resolver.
//!
//! Turns the last sensor reading and the current control intent into the
//! actuation directive the device should apply.  Pure: no locks, no
//! clock, no logging.  The caller decides what to do with the patch.
//!
//! ## Decision table
//!
//! | mode   | rain | soil            | pump            | patch              |
//! |--------|------|-----------------|-----------------|--------------------|
//! | manual | any  | any             | `pump_override` | none               |
//! | auto   | yes  | any             | off             | `pump_override=0`  |
//! | auto   | no   | `% < threshold` | on              | `pump_override=1`  |
//! | auto   | no   | `% >= threshold`| off             | `pump_override=0`  |
//!
//! Rain dominates everything in auto mode, including a stale override
//! flag left over from manual mode.  Manual mode is never second-guessed.

use core::fmt;

use chrono::{DateTime, Utc};

use crate::state::model::{ControlIntent, ControlPatch, MOISTURE_RAW_MAX, Mode, SensorReading};

/// Default dry threshold: auto mode waters below this moisture percentage.
pub const DEFAULT_DRY_THRESHOLD_PERCENT: u8 = 40;

/// Moisture as a percentage, 100 = saturated (raw 0), 0 = dry (raw 4095).
///
/// `100 - round(raw / 4095 * 100)`, computed in integers.  The quotient
/// never lands exactly on .5 because 4095 is odd, so half-up rounding is
/// unambiguous.
pub fn moisture_percent(moisture_raw: u16) -> u8 {
    let raw = u32::from(moisture_raw.min(MOISTURE_RAW_MAX));
    let max = u32::from(MOISTURE_RAW_MAX);
    let dryness = (raw * 100 + max / 2) / max;
    100u32.saturating_sub(dryness).min(100) as u8
}

/// Derived view answered to a status query.  Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStatus {
    pub moisture_raw: u16,
    pub moisture_percent: u8,
    pub rain_detected: bool,
    pub pump_active: bool,
    pub mode: Mode,
    pub angle_deg: u8,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Which rule decided the pump state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpReason {
    Manual,
    RainLockout,
    SoilDry,
    SoilMoist,
}

impl fmt::Display for PumpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual override"),
            Self::RainLockout => write!(f, "rain detected"),
            Self::SoilDry => write!(f, "soil dry"),
            Self::SoilMoist => write!(f, "soil moist"),
        }
    }
}

/// Output of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub status: ResolvedStatus,
    /// Control mutations implied by the decision.  Empty in manual mode.
    pub patch: ControlPatch,
    pub reason: PumpReason,
}

#[derive(Debug, Clone, Copy)]
pub struct ControlResolver {
    dry_threshold_percent: u8,
}

impl Default for ControlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DRY_THRESHOLD_PERCENT)
    }
}

impl ControlResolver {
    pub fn new(dry_threshold_percent: u8) -> Self {
        Self {
            dry_threshold_percent,
        }
    }

    pub fn dry_threshold_percent(&self) -> u8 {
        self.dry_threshold_percent
    }

    pub fn resolve(&self, reading: &SensorReading, intent: &ControlIntent) -> Resolution {
        let percent = moisture_percent(reading.moisture_raw);

        let (pump_active, reason, patch) = match intent.mode {
            Mode::Manual => (intent.pump_override, PumpReason::Manual, ControlPatch::default()),
            Mode::Auto if reading.rain_detected => (
                false,
                PumpReason::RainLockout,
                ControlPatch::default().with_pump(false),
            ),
            Mode::Auto => {
                let dry = percent < self.dry_threshold_percent;
                let reason = if dry {
                    PumpReason::SoilDry
                } else {
                    PumpReason::SoilMoist
                };
                (dry, reason, ControlPatch::default().with_pump(dry))
            }
        };

        Resolution {
            status: ResolvedStatus {
                moisture_raw: reading.moisture_raw,
                moisture_percent: percent,
                rain_detected: reading.rain_detected,
                pump_active,
                mode: intent.mode,
                angle_deg: intent.angle_deg,
                observed_at: reading.observed_at,
            },
            patch,
            reason,
        }
    }
}
