//! Wire layer: JSON payload shapes and lenient request decoding.
//!
//! Transport-neutral.  The HTTP adapter feeds raw bodies into [`codec`]
//! and serialises the [`payload`] views it gets back from the service.

pub mod codec;
pub mod payload;

pub use payload::{Ack, ControlView, HealthView, SensorIngest, StatusView};
