//! `ev-core` — foundational types for the `rust_ev` charging framework.
//!
//! This crate is a dependency of every other `ev-*` crate.  It intentionally
//! has no `ev-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                    |
//! |-----------|---------------------------------------------|
//! | [`ids`]   | `VehicleId`, `ChargerId`                    |
//! | [`geo`]   | `GeoPoint`, haversine distance              |
//! | [`units`] | joule/kWh and watt/kW conversions           |
//!
//! # Time
//!
//! Simulated time is a plain `f64` of seconds supplied by the outer
//! simulation on every call — schedulers never read a clock of their own.
//! There is deliberately no clock type here.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;
pub mod units;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{ChargerId, VehicleId};
