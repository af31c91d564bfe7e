//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter       | Implements  | Connects to                 |
//! |---------------|-------------|-----------------------------|
//! | `config_file` | ConfigPort  | TOML file on disk           |
//! | `http`        | —           | axum HTTP server (`server`) |
//! | `log_sink`    | EventSink   | `log` facade                |
//! | `time`        | Clock       | OS wall clock + `Instant`   |

pub mod config_file;
#[cfg(feature = "server")]
pub mod http;
pub mod log_sink;
pub mod time;
