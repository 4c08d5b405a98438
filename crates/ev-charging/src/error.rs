use ev_core::{ChargerId, VehicleId};
use thiserror::Error;

/// Scheduler failures.  All are synchronous and caller-recoverable; a failed
/// operation leaves the scheduler's state exactly as it was before the call.
#[derive(Debug, Error)]
pub enum ChargingError {
    #[error("vehicle {0} is already tracked by this charger")]
    DuplicateVehicle(VehicleId),

    #[error("vehicle {0} is not tracked by this charger")]
    UnknownVehicle(VehicleId),

    #[error("time regression: now {now} is earlier than previously observed {last}")]
    TimeRegression { now: f64, last: f64 },

    #[error("charge period must be positive, got {0}")]
    InvalidPeriod(f64),

    #[error("queue at charger {charger} is full ({capacity} waiting)")]
    QueueFull { charger: ChargerId, capacity: usize },

    #[error("charger {0} not found in this depot")]
    UnknownCharger(ChargerId),
}

pub type ChargingResult<T> = Result<T, ChargingError>;
