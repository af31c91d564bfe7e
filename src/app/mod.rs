//! Application core — coordinator logic, zero transport.
//!
//! The coordinator rules live here: sensor ingest, control writes and the
//! read-resolve-commit status query.  Time and event output go through
//! **port traits** defined in [`ports`], so this layer is fully testable
//! without a network or a real clock.

pub mod events;
pub mod ports;
pub mod publisher;
pub mod service;
