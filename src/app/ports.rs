//! Port traits — the boundary between coordinator logic and the outside world.
//!
//! ```text
//!   HTTP adapter ──▶ AppService ──▶ EventSink
//!                        │
//!                        └──▶ Clock
//!
//!   DeviceController ──▶ ActuatorPort / DutyCycleMapper
//! ```
//!
//! The [`AppService`](super::service::AppService) is generic over the
//! coordinator-side ports; the device-side ports are consumed by
//! [`DeviceController`](crate::device::DeviceController).

use chrono::{DateTime, Utc};

use crate::config::CoordinatorConfig;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Time source for sensor timestamps and uptime.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Seconds since the coordinator started (monotonic).
    fn uptime_secs(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port
// ───────────────────────────────────────────────────────────────

/// Receives structured [`AppEvent`](super::events::AppEvent)s.
///
/// Called after the state lock is released, so implementations may block
/// briefly (log I/O) without stalling other requests.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads coordinator configuration.
///
/// Implementations return [`ConfigError::NotFound`] when no stored
/// configuration exists (the caller decides whether to fall back to
/// [`CoordinatorConfig::default()`]), and must run
/// [`CoordinatorConfig::validate`] before handing a config back.
pub trait ConfigPort {
    fn load(&self) -> Result<CoordinatorConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Device-side ports
// ───────────────────────────────────────────────────────────────

/// Write-side port of the sensing/actuation device.
pub trait ActuatorPort {
    /// Energise or release the pump relay.
    fn set_pump(&mut self, on: bool);

    /// Write a raw PWM duty value to the sprinkler servo.
    fn set_servo_duty(&mut self, duty: u16);
}

/// Converts a sprinkler angle into the actuator's PWM duty value.
pub trait DutyCycleMapper {
    fn duty_for(&self, angle_deg: u8) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured file does not exist.
    NotFound,
    /// The stored config could not be parsed.
    Corrupted(String),
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// The backing storage could not be read.
    IoError(std::io::ErrorKind),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl std::error::Error for ConfigError {}
