//! The typed event vocabulary emitted by charging schedulers.

use ev_core::{ChargerId, VehicleId};

/// Why a charging session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargingEndReason {
    /// The strategy signalled completion during a charge tick.
    Completed,
    /// The outer simulation removed the vehicle mid-session.
    Removed,
}

impl ChargingEndReason {
    /// Stable lowercase label used by the file-backed event logs.
    pub fn label(self) -> &'static str {
        match self {
            ChargingEndReason::Completed => "completed",
            ChargingEndReason::Removed   => "removed",
        }
    }
}

/// What happened.  One variant per observable transition in a vehicle's
/// lifecycle at a charger.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargingEventKind {
    /// The vehicle occupied a plug and its session began.
    ChargingStarted,

    /// All plugs were busy; the vehicle joined the waiting queue.
    Queued,

    /// The vehicle left the waiting queue without ever being plugged.
    Dequeued,

    /// A charge tick delivered energy to a plugged vehicle.
    EnergyCharged {
        /// Energy delivered this tick, joules.
        energy_j: f64,
        /// State of charge after the delivery, joules.
        soc_j: f64,
    },

    /// The vehicle's session ended and its plug was freed.
    ChargingEnded { reason: ChargingEndReason },
}

impl ChargingEventKind {
    /// Stable lowercase label used by the file-backed event logs.
    pub fn label(&self) -> &'static str {
        match self {
            ChargingEventKind::ChargingStarted    => "charging_started",
            ChargingEventKind::Queued             => "queued",
            ChargingEventKind::Dequeued           => "dequeued",
            ChargingEventKind::EnergyCharged { .. } => "energy_charged",
            ChargingEventKind::ChargingEnded { .. } => "charging_ended",
        }
    }
}

/// One emitted event: who, where, when, what.
///
/// Events are produced in call order per scheduler; sinks receive them
/// synchronously within the emitting operation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingEvent {
    /// Simulated time of the emitting operation, seconds.
    pub time: f64,
    pub charger: ChargerId,
    pub vehicle: VehicleId,
    pub kind: ChargingEventKind,
}

impl ChargingEvent {
    /// `(energy_j, soc_j)` when this event carries an energy payload.
    pub fn energy(&self) -> Option<(f64, f64)> {
        match self.kind {
            ChargingEventKind::EnergyCharged { energy_j, soc_j } => Some((energy_j, soc_j)),
            _ => None,
        }
    }

    /// The end reason when this event closes a session.
    pub fn end_reason(&self) -> Option<ChargingEndReason> {
        match self.kind {
            ChargingEventKind::ChargingEnded { reason } => Some(reason),
            _ => None,
        }
    }
}
