//! `ev-charging` — per-station charging scheduling for the rust_ev framework.
//!
//! # The tick contract
//!
//! ```text
//! outer simulation                      scheduler
//! ────────────────                      ─────────
//! agent arrives      ──add_vehicle────▶ plug (or queue, FIFO)
//! agent departs      ──remove_vehicle─▶ end session / dequeue; promote
//! every tick         ──charge_vehicles▶ strategy → energy → battery;
//!                                       completions free plugs; promote
//! ```
//!
//! The scheduler never reads a clock and never calls back into the outer
//! simulation beyond pushing typed events into its bound sink; `now` is
//! always supplied by the caller and must be non-decreasing per instance.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`scheduler`] | `ChargingScheduler` — admission, queueing, charge tick    |
//! | [`strategy`]  | `ChargingStrategy` trait + constant-power / fast-then-slow|
//! | [`listener`]  | `ChargingListener` per-vehicle observer capability        |
//! | [`factory`]   | `StationFactory` — one scheduler per charger              |
//! | [`depot`]     | `Depot` — routes operations over many stations            |
//! | [`error`]     | `ChargingError`, `ChargingResult<T>`                      |

pub mod depot;
pub mod error;
pub mod factory;
pub mod listener;
pub mod scheduler;
pub mod strategy;


pub use depot::Depot;
pub use error::{ChargingError, ChargingResult};
pub use factory::{SinkFactory, StationFactory, StrategyFactory};
pub use listener::ChargingListener;
pub use scheduler::ChargingScheduler;
pub use strategy::{
    ChargeOutcome, ChargingStrategy, ConstantPowerStrategy, FastThenSlowStrategy,
};
