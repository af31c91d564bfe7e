//! Fuzz target: lenient request decoding
//!
//! Drives arbitrary byte sequences through both body decoders and the
//! store, asserting nothing panics and the stored values stay in range.
//!
//! cargo fuzz run fuzz_request_decoder

#![no_main]

use chrono::Utc;
use irrigation_hub::api::codec;
use irrigation_hub::state::StateStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let store = StateStore::new();

    let reading = store.merge_sensor(codec::decode_sensor(data), Utc::now);
    assert!(reading.moisture_raw <= 4095, "moisture escaped clamp");

    let intent = store.merge_control(&codec::decode_control(data));
    assert!(intent.angle_deg <= 180, "angle escaped clamp");
});
