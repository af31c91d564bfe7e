//! Application service — the coordinator core.
//!
//! [`AppService`] owns the [`StateStore`], the [`StatusPublisher`] and the
//! injected [`Clock`] / [`EventSink`] ports.  Every inbound operation of
//! the coordinator goes through it.  All methods take `&self` and are safe
//! to call from any number of request tasks at once.
//!
//! ```text
//!  ingest_sensor ──┐                         ┌──▶ EventSink
//!  write_control ──┼──▶ ┌──────────────────┐ │
//!  read_control  ──┤    │    AppService     │─┘
//!  query_status  ──┘    │ Store · Publisher │──▶ Clock
//!                       └──────────────────┘
//! ```

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::CoordinatorConfig;
use crate::resolver::{ControlResolver, ResolvedStatus};
use crate::state::{ControlIntent, ControlPatch, SensorReading, SensorSample, SharedState, StateStore};

use super::events::AppEvent;
use super::ports::{Clock, EventSink};
use super::publisher::StatusPublisher;

/// Liveness figures for the coordinator and the sensing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub uptime_secs: u64,
    pub last_observed_at: Option<DateTime<Utc>>,
    /// Seconds since the last ingest; `None` before the first one.
    pub sensor_age_secs: Option<i64>,
}

pub struct AppService<C, S> {
    store: StateStore,
    publisher: StatusPublisher,
    clock: C,
    sink: S,
}

impl<C: Clock, S: EventSink> AppService<C, S> {
    /// Build the service with power-on default state.
    pub fn new(config: &CoordinatorConfig, clock: C, sink: S) -> Self {
        let resolver = ControlResolver::new(config.dry_threshold_percent);
        debug!(
            "AppService: dry threshold {}%",
            resolver.dry_threshold_percent()
        );
        Self {
            store: StateStore::new(),
            publisher: StatusPublisher::new(resolver),
            clock,
            sink,
        }
    }

    // ── Inbound operations ────────────────────────────────────

    /// Record a device reading, clamped and stamped with the current time.
    pub fn ingest_sensor(&self, sample: SensorSample) -> SensorReading {
        let reading = self.store.merge_sensor(sample, || self.clock.now());
        self.sink.emit(&AppEvent::SensorIngested(reading));
        reading
    }

    /// Current control intent.
    pub fn read_control(&self) -> ControlIntent {
        self.store.read().intent
    }

    /// Partial control update.  Returns the resulting intent.
    pub fn write_control(&self, patch: &ControlPatch) -> ControlIntent {
        let intent = self.store.merge_control(patch);
        self.sink.emit(&AppEvent::ControlUpdated(intent));
        intent
    }

    /// Resolve the actuation directive, committing any auto-mode pump flag.
    pub fn query_status(&self) -> ResolvedStatus {
        let resolution = self.publisher.query(&self.store);
        self.sink.emit(&AppEvent::StatusResolved {
            status: resolution.status,
            reason: resolution.reason,
            committed: !resolution.patch.is_empty(),
        });
        resolution.status
    }

    // ── Queries ───────────────────────────────────────────────

    /// Consistent copy of the whole state.  No side effects.
    pub fn snapshot(&self) -> SharedState {
        self.store.read()
    }

    pub fn health(&self) -> HealthReport {
        let observed = self.store.read().reading.observed_at;
        let age = observed.map(|at| (self.clock.now() - at).num_seconds().max(0));
        HealthReport {
            uptime_secs: self.clock.uptime_secs(),
            last_observed_at: observed,
            sensor_age_secs: age,
        }
    }

    /// Auto-mode threshold in effect.
    pub fn dry_threshold_percent(&self) -> u8 {
        self.publisher.resolver().dry_threshold_percent()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
