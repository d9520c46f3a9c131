//! Fuzz target: coordinate parsing from raw query-string values.
//!
//! The input is split at the first `&` into `lat` and `lon`. Parsing must
//! never panic, and every accepted pair must be finite and in range.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::WeatherQuery;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (lat, lon) = match text.split_once('&') {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (Some(text), None),
    };
    if let Ok(query) = WeatherQuery::parse(lat, lon) {
        assert!((-90.0..=90.0).contains(&query.latitude.value()));
        assert!((-180.0..=180.0).contains(&query.longitude.value()));
    }
});
