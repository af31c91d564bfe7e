//! Device-side polling logic.
//!
//! The sensing/actuation device runs a simple loop: sample the soil probe
//! and rain sensor, post them to `/data`, fetch `/status`, and drive the
//! pump relay and sprinkler servo from the answer.  The network join and
//! GPIO wiring are board specifics; what lives here is the part worth
//! testing on the host:
//!
//! - [`DeviceInputs::to_ingest`]: raw pins to the ingest payload;
//! - [`DeviceController`]: a fetched status body to actuator writes,
//!   through the [`ActuatorPort`] and [`DutyCycleMapper`] ports.
//!
//! ## Safety contract
//!
//! If the status fetch fails or the body is unusable the controller
//! applies [`ActuationDirective::FALLBACK`]: pump off, sprinkler centred.

pub mod servo;

use log::{info, warn};

use crate::api::{SensorIngest, StatusView};
use crate::app::ports::{ActuatorPort, DutyCycleMapper};
use crate::state::model::{ANGLE_MAX_DEG, DEFAULT_ANGLE_DEG};

pub use servo::ServoDutyMapper;

/// One raw sample from the device's sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInputs {
    /// 12-bit soil-moisture ADC reading.
    pub moisture_adc: u16,
    /// Rain sensor digital output.  Active low: `false` means rain.
    pub rain_pin_high: bool,
}

impl DeviceInputs {
    pub fn to_ingest(&self) -> SensorIngest {
        SensorIngest {
            moisture: i64::from(self.moisture_adc),
            rain: i64::from(!self.rain_pin_high),
        }
    }
}

/// What the device should do with its actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationDirective {
    pub pump_on: bool,
    pub angle_deg: u8,
}

impl ActuationDirective {
    /// Applied when no usable status could be fetched.
    pub const FALLBACK: Self = Self {
        pump_on: false,
        angle_deg: DEFAULT_ANGLE_DEG,
    };
}

impl From<&StatusView> for ActuationDirective {
    fn from(s: &StatusView) -> Self {
        Self {
            pump_on: s.pump_status != 0,
            angle_deg: s.angle.min(ANGLE_MAX_DEG),
        }
    }
}

/// Applies directives to the device's actuators.
pub struct DeviceController<M> {
    mapper: M,
    applied: Option<ActuationDirective>,
}

impl<M: DutyCycleMapper> DeviceController<M> {
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            applied: None,
        }
    }

    /// Drive both actuators.  Returns `true` if the directive differs from
    /// the previous one.
    pub fn apply(&mut self, directive: ActuationDirective, hw: &mut impl ActuatorPort) -> bool {
        hw.set_pump(directive.pump_on);
        hw.set_servo_duty(self.mapper.duty_for(directive.angle_deg));

        let changed = self.applied != Some(directive);
        if changed {
            info!(
                "DEVICE | pump={} angle={}\u{00b0}",
                if directive.pump_on { "ON" } else { "OFF" },
                directive.angle_deg
            );
        }
        self.applied = Some(directive);
        changed
    }

    /// Apply the result of a `/status` fetch.  `None` means the fetch
    /// itself failed.
    pub fn apply_status_body(
        &mut self,
        body: Option<&[u8]>,
        hw: &mut impl ActuatorPort,
    ) -> ActuationDirective {
        let directive = match body.map(serde_json::from_slice::<StatusView>) {
            Some(Ok(status)) => ActuationDirective::from(&status),
            Some(Err(e)) => {
                warn!("DEVICE | unusable status body ({e}), applying fallback");
                ActuationDirective::FALLBACK
            }
            None => {
                warn!("DEVICE | status fetch failed, applying fallback");
                ActuationDirective::FALLBACK
            }
        };
        self.apply(directive, hw);
        directive
    }

    /// Last directive written to the actuators.
    pub fn applied(&self) -> Option<ActuationDirective> {
        self.applied
    }
}
