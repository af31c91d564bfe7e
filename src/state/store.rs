//! Mutex-guarded owner of the coordinator's [`SharedState`].
//!
//! Every operation takes the one lock covering the (reading, intent)
//! pair, so a reader never sees half of a concurrent update.  Critical
//! sections are field copies only; callers log and emit events after
//! the guard is dropped.
//!
//! A poisoned mutex is recovered rather than propagated: the state is
//! `Copy` data assigned field by field, so a panicking holder cannot
//! leave it half-written.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::model::{ControlIntent, ControlPatch, SensorReading, SensorSample, SharedState};

#[derive(Debug, Default)]
pub struct StateStore {
    inner: Mutex<SharedState>,
}

impl StateStore {
    /// Store holding the power-on defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consistent copy of reading and intent.
    pub fn read(&self) -> SharedState {
        *self.lock()
    }

    /// Overwrite the sensor reading.
    ///
    /// `now` is called with the lock held, so the reading that lands last
    /// also carries the latest timestamp.
    pub fn merge_sensor(&self, sample: SensorSample, now: impl FnOnce() -> DateTime<Utc>) -> SensorReading {
        let mut state = self.lock();
        state.reading = SensorReading {
            moisture_raw: sample.clamped_moisture(),
            rain_detected: sample.rain_detected,
            observed_at: Some(now()),
        };
        state.reading
    }

    /// Apply the fields present in `patch`.  Returns the resulting intent.
    pub fn merge_control(&self, patch: &ControlPatch) -> ControlIntent {
        let mut state = self.lock();
        state.intent.merge(patch);
        state.intent
    }

    /// Read, decide and commit as one critical section.
    ///
    /// `decide` sees the current snapshot and returns its result plus the
    /// control patch to apply.  The patch lands before the lock is
    /// released, so no concurrent `merge_control` can slip in between
    /// the read and the write.
    pub fn transact<T>(&self, decide: impl FnOnce(&SharedState) -> (T, ControlPatch)) -> T {
        let mut state = self.lock();
        let (out, patch) = decide(&state);
        if !patch.is_empty() {
            state.intent.merge(&patch);
        }
        out
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
