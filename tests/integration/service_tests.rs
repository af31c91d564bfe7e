//! Integration tests for the ingest → control → status pipeline.
//!
//! Drives [`AppService`] the way the HTTP adapter does (raw JSON bodies
//! through the codec) and checks the wire views that come back.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;

use chrono::{DateTime, TimeZone, Utc};

use irrigation_hub::api::{ControlView, StatusView, codec};
use irrigation_hub::app::events::AppEvent;
use irrigation_hub::app::ports::Clock;
use irrigation_hub::app::service::AppService;
use irrigation_hub::config::CoordinatorConfig;
use irrigation_hub::resolver::PumpReason;
use irrigation_hub::state::{ControlPatch, Mode};

use crate::mock_hw::{FixedClock, RecordingSink};

type TestService = AppService<FixedClock, RecordingSink>;

fn make_app() -> TestService {
    AppService::new(
        &CoordinatorConfig::default(),
        FixedClock::new(),
        RecordingSink::new(),
    )
}

fn ingest(app: &TestService, body: &str) {
    app.ingest_sensor(codec::decode_sensor(body.as_bytes()));
}

fn control(app: &TestService, body: &str) {
    app.write_control(&codec::decode_control(body.as_bytes()));
}

fn status(app: &TestService) -> StatusView {
    StatusView::from(&app.query_status())
}

// ── Documented scenarios ──────────────────────────────────────

#[test]
fn dry_soil_in_auto_runs_pump() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 3000, "rain": 0}"#);

    let s = status(&app);
    assert_eq!(s.moisture_percent, 27);
    assert_eq!(s.pump_status, 1);
    assert_eq!(s.mode, Mode::Auto);
}

#[test]
fn rain_dominates_in_auto() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 500, "rain": 1}"#);

    let s = status(&app);
    assert_eq!(s.moisture_percent, 88);
    assert_eq!(s.pump_status, 0);
    assert_eq!(s.rain, 1);
}

#[test]
fn manual_overrides_rain_safety() {
    let app = make_app();
    control(&app, r#"{"mode": "manual", "pump": 1}"#);
    ingest(&app, r#"{"moisture": 4095, "rain": 1}"#);

    let s = status(&app);
    assert_eq!(s.pump_status, 1);
    assert_eq!(s.mode, Mode::Manual);
}

#[test]
fn angle_only_write_keeps_mode_and_pump() {
    let app = make_app();
    control(&app, r#"{"mode": "manual", "pump": 1}"#);
    control(&app, r#"{"angle": 45}"#);

    assert_eq!(
        ControlView::from(&app.read_control()),
        ControlView {
            pump: 1,
            angle: 45,
            mode: Mode::Manual
        }
    );
}

#[test]
fn repeated_control_write_is_idempotent() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 2000, "rain": 0}"#);
    control(&app, r#"{"mode": "manual", "pump": 0, "angle": 120}"#);
    let first = status(&app);
    control(&app, r#"{"mode": "manual", "pump": 0, "angle": 120}"#);
    let second = status(&app);
    assert_eq!(first, second);
}

#[test]
fn out_of_range_values_are_clamped() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 99999, "rain": 0}"#);
    control(&app, r#"{"angle": -30}"#);

    let s = status(&app);
    assert_eq!(s.moisture, 4095);
    assert_eq!(s.moisture_percent, 0);
    assert_eq!(s.angle, 0);
}

#[test]
fn initial_status_before_any_ingest() {
    let app = make_app();
    // Raw 0 reads as saturated soil: no watering.
    let s = status(&app);
    assert_eq!(s.moisture, 0);
    assert_eq!(s.moisture_percent, 100);
    assert_eq!(s.pump_status, 0);
    assert_eq!(s.angle, 90);
}

// ── Read-resolve-commit side effect ───────────────────────────

#[test]
fn auto_status_mirrors_decision_into_control_view() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 3500, "rain": 0}"#);
    assert_eq!(ControlView::from(&app.read_control()).pump, 0);

    status(&app);
    assert_eq!(ControlView::from(&app.read_control()).pump, 1);

    ingest(&app, r#"{"moisture": 3500, "rain": 1}"#);
    status(&app);
    assert_eq!(ControlView::from(&app.read_control()).pump, 0);
}

#[test]
fn switching_back_to_auto_discards_manual_override() {
    let app = make_app();
    control(&app, r#"{"mode": "manual", "pump": 1}"#);
    ingest(&app, r#"{"moisture": 100, "rain": 0}"#);
    assert_eq!(status(&app).pump_status, 1);

    control(&app, r#"{"mode": "auto"}"#);
    assert_eq!(status(&app).pump_status, 0, "wet soil in auto");
    assert!(!app.read_control().pump_override);
}

#[test]
fn status_event_carries_reason() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 100, "rain": 1}"#);
    status(&app);

    let events = app.sink().events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events.last(),
        Some(AppEvent::StatusResolved {
            reason: PumpReason::RainLockout,
            committed: true,
            ..
        })
    ));
}

// ── Timestamps and liveness ───────────────────────────────────

#[test]
fn ingest_stamps_clock_time_and_health_ages() {
    let app = make_app();
    ingest(&app, r#"{"moisture": 1000}"#);
    let stamped = app.snapshot().reading.observed_at.unwrap();
    assert_eq!(Some(stamped), app.query_status().observed_at);

    app.clock().advance(90);
    let health = app.health();
    assert_eq!(health.last_observed_at, Some(stamped));
    assert_eq!(health.sensor_age_secs, Some(90));
}

// ── Concurrency ───────────────────────────────────────────────

#[test]
fn concurrent_partial_writes_union() {
    for _ in 0..200 {
        let app = Arc::new(make_app());
        let a = {
            let app = app.clone();
            thread::spawn(move || app.write_control(&ControlPatch::default().with_angle(10)))
        };
        let b = {
            let app = app.clone();
            thread::spawn(move || app.write_control(&ControlPatch::default().with_pump(true)))
        };
        a.join().unwrap();
        b.join().unwrap();

        let c = ControlView::from(&app.read_control());
        assert_eq!((c.angle, c.pump), (10, 1));
    }
}

#[test]
fn manual_write_is_never_clobbered_by_concurrent_status() {
    // A status query in auto mode on dry soil wants pump=1.  A racing
    // manual "pump off" write must survive regardless of ordering.
    for _ in 0..200 {
        let app = Arc::new(make_app());
        ingest(&app, r#"{"moisture": 4000, "rain": 0}"#);

        let poller = {
            let app = app.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    app.query_status();
                }
            })
        };
        let user = {
            let app = app.clone();
            thread::spawn(move || {
                app.write_control(&ControlPatch::default().with_mode(Mode::Manual).with_pump(false));
            })
        };
        poller.join().unwrap();
        user.join().unwrap();

        let intent = app.read_control();
        assert_eq!(intent.mode, Mode::Manual);
        assert!(!intent.pump_override, "manual pump-off was overwritten");
        assert_eq!(status(&app).pump_status, 0);
    }
}

/// Clock that moves one second forward on every read.
struct TickingClock(AtomicI64);

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.0.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(1_750_000_000 + secs, 0)
            .single()
            .unwrap_or_default()
    }

    fn uptime_secs(&self) -> u64 {
        0
    }
}

#[test]
fn last_ingest_carries_latest_timestamp() {
    for _ in 0..100 {
        let app = Arc::new(AppService::new(
            &CoordinatorConfig::default(),
            TickingClock(AtomicI64::new(0)),
            RecordingSink::new(),
        ));
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let app = app.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        app.ingest_sensor(codec::decode_sensor(
                            format!(r#"{{"moisture": {i}}}"#).as_bytes(),
                        ));
                    }
                })
            })
            .collect();
        for w in writers {
            w.join().unwrap();
        }

        // 100 ingests took ticks 0..=99; the surviving reading must hold
        // the newest one.
        let latest = Utc.timestamp_opt(1_750_000_000 + 99, 0).unwrap();
        assert_eq!(app.snapshot().reading.observed_at, Some(latest));
    }
}

#[test]
fn snapshots_are_never_torn() {
    // Writers flip mode and pump together; readers must never see
    // manual+off or auto+on.
    let app = Arc::new(make_app());
    let writer = {
        let app = app.clone();
        thread::spawn(move || {
            for i in 0..2_000 {
                let patch = if i % 2 == 0 {
                    ControlPatch::default().with_mode(Mode::Manual).with_pump(true)
                } else {
                    ControlPatch::default().with_mode(Mode::Auto).with_pump(false)
                };
                app.write_control(&patch);
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let app = app.clone();
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let intent = app.snapshot().intent;
                    assert_eq!(intent.mode == Mode::Manual, intent.pump_override);
                }
            })
        })
        .collect();
    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}
