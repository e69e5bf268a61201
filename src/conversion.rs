//! Raw sensor samples to physical units.
//!
//! All formulas take the full-scale 16-bit reading (0..=65535).

const FULL_SCALE: f32 = 65535.0;

/// Raw temperature sample to degrees Celsius
pub fn temperature_to_celsius(raw: u16) -> f32 {
    175.0 * (raw as f32) / FULL_SCALE - 45.0
}

/// Raw temperature sample to degrees Fahrenheit
pub fn temperature_to_fahrenheit(raw: u16) -> f32 {
    315.0 * (raw as f32) / FULL_SCALE - 49.0
}

/// Raw humidity sample to percent relative humidity
pub fn humidity_to_percent(raw: u16) -> f32 {
    100.0 * (raw as f32) / FULL_SCALE
}
