//! Shared coordinator state and its guard.

pub mod model;
pub mod store;

pub use model::{
    ControlIntent, ControlPatch, Mode, SensorReading, SensorSample, SharedState, UnknownMode,
};
pub use store::StateStore;
