//! `ev-infra` — charging-station infrastructure for the rust_ev framework.
//!
//! | Module      | Contents                                           |
//! |-------------|----------------------------------------------------|
//! | [`charger`] | `ChargerSpec` — static per-station description     |
//! | [`loader`]  | CSV infrastructure loading                         |
//! | [`error`]   | `InfraError`, `InfraResult<T>`                     |

pub mod charger;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use charger::ChargerSpec;
pub use error::{InfraError, InfraResult};
pub use loader::{load_chargers_csv, load_chargers_reader};
