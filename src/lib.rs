//! Irrigation coordinator library.
//!
//! Holds the authoritative control state for one garden plot and
//! reconciles the latest sensor reading, the user's control intent and
//! the rain-safety rule into the actuation directive the device polls.
//! The HTTP transport is behind the `server` feature; everything else
//! builds and tests without it.

#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod device;
pub mod error;
pub mod resolver;
pub mod state;
