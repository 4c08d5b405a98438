//! Per-vehicle charging observer capability.

use ev_events::ChargingEndReason;

/// Callbacks for one vehicle's progress at one charger.
///
/// A listener is handed over (optionally) with
/// [`add_vehicle`][crate::ChargingScheduler::add_vehicle], held for at most
/// one vehicle at a time, and released when the vehicle leaves the scheduler
/// — whether removed, dequeued, or auto-completed.  Absence of a listener is
/// a no-op path, never an error.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait ChargingListener: Send {
    /// The vehicle occupied a plug and its session began.
    fn on_start(&mut self, _now: f64) {}

    /// A charge tick delivered `energy_j` joules; the battery now holds
    /// `soc_j` joules.
    fn on_energy(&mut self, _energy_j: f64, _soc_j: f64, _now: f64) {}

    /// The session ended; the listener is released after this call.
    fn on_end(&mut self, _reason: ChargingEndReason, _now: f64) {}

    /// All plugs were busy; the vehicle joined the waiting queue.
    fn on_queued(&mut self, _now: f64) {}

    /// The vehicle left the waiting queue without being plugged; the
    /// listener is released after this call.  `charged` is `false` on this
    /// path — a vehicle that reached a plug gets `on_end` instead.
    fn on_dequeued(&mut self, _charged: bool, _now: f64) {}
}
