//! Energy and power unit conversions.
//!
//! Internally the framework works in SI base units: energy in **joules**,
//! power in **watts**, time in **simulated seconds** (`f64` throughout).
//! Scenario files and human-facing output use kWh / kW; these helpers are the
//! single place where the conversion factors live.

/// Joules per kilowatt-hour.
pub const J_PER_KWH: f64 = 3_600_000.0;

/// Watts per kilowatt.
pub const W_PER_KW: f64 = 1_000.0;

#[inline]
pub fn kwh_to_j(kwh: f64) -> f64 {
    kwh * J_PER_KWH
}

#[inline]
pub fn j_to_kwh(joules: f64) -> f64 {
    joules / J_PER_KWH
}

#[inline]
pub fn kw_to_w(kw: f64) -> f64 {
    kw * W_PER_KW
}

#[inline]
pub fn w_to_kw(watts: f64) -> f64 {
    watts / W_PER_KW
}
