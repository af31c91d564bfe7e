//! Lenient request decoding.
//!
//! Inbound bodies never fail a request.  Whatever the device or dashboard
//! sends is reduced to the fields we understand:
//!
//! - a body that is not a JSON object is treated as `{}`;
//! - numeric fields accept integers, floats (truncated toward zero),
//!   booleans (`true` = 1) and numeric strings;
//! - any other value counts as absent;
//! - `rain` is true for any nonzero value, not only `1`, so a confused
//!   sensor errs toward stopping the pump;
//! - an unrecognised `mode` string counts as absent.
//!
//! Range clamping is left to the [`StateStore`](crate::state::StateStore).

use log::warn;
use serde_json::{Map, Value};

use crate::state::{ControlPatch, Mode, SensorSample};

/// Decode a `POST /data` body.  Missing fields default to 0.
pub fn decode_sensor(body: &[u8]) -> SensorSample {
    let fields = object_or_empty(body, "/data");
    let moisture = int_field(&fields, "moisture").unwrap_or(0);
    let rain = int_field(&fields, "rain").unwrap_or(0);
    SensorSample::new(moisture, rain != 0)
}

/// Decode a `POST /control` body into a partial update.
pub fn decode_control(body: &[u8]) -> ControlPatch {
    let fields = object_or_empty(body, "/control");
    ControlPatch {
        mode: mode_field(&fields),
        pump_override: int_field(&fields, "pump").map(|v| v != 0),
        angle_deg: int_field(&fields, "angle"),
    }
}

fn object_or_empty(body: &[u8], route: &str) -> Map<String, Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Map::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!("{route}: body is not an object ({}), using defaults", kind(&other));
            Map::new()
        }
        Err(e) => {
            warn!("{route}: unparsable body ({e}), using defaults");
            Map::new()
        }
    }
}

fn int_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    match fields.get(key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

fn mode_field(fields: &Map<String, Value>) -> Option<Mode> {
    match fields.get("mode")? {
        Value::String(s) => match s.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                warn!("/control: {e}, keeping current mode");
                None
            }
        },
        Value::Null => None,
        other => {
            warn!("/control: mode is {}, keeping current mode", kind(other));
            None
        }
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
