//! Mock adapters for integration tests.
//!
//! Records every event and actuator write so tests can assert on the full
//! history without a network, a real clock or GPIO.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use irrigation_hub::app::events::AppEvent;
use irrigation_hub::app::ports::{ActuatorPort, Clock, EventSink};

// ── Event recording ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AppEvent>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &AppEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ── Controllable clock ────────────────────────────────────────

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

#[allow(dead_code)]
impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 7, 14, 6, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, secs: i64) {
        *self.now.lock().unwrap() += Duration::seconds(secs);
    }

    pub fn at(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at()
    }

    fn uptime_secs(&self) -> u64 {
        0
    }
}

// ── Actuator recording ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Pump(bool),
    ServoDuty(u16),
}

#[derive(Default)]
pub struct MockActuators {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Pump(on) => Some(*on),
                ActuatorCall::ServoDuty(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn servo_duty(&self) -> Option<u16> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::ServoDuty(d) => Some(*d),
            ActuatorCall::Pump(_) => None,
        })
    }
}

impl ActuatorPort for MockActuators {
    fn set_pump(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Pump(on));
    }

    fn set_servo_duty(&mut self, duty: u16) {
        self.calls.push(ActuatorCall::ServoDuty(duty));
    }
}
