//! Multi-charger driver: routes operations by charger ID and ticks every
//! station deterministically.

use std::collections::BTreeMap;

use ev_core::{ChargerId, VehicleId};
use ev_fleet::VehicleFleet;

use crate::{ChargingError, ChargingListener, ChargingResult, ChargingScheduler};

/// Owns one [`ChargingScheduler`] per charger and drives them all from one
/// tick loop.
///
/// Stations are keyed (and ticked) in ascending `ChargerId` order so a run
/// is deterministic regardless of insertion order.  Execution is sequential:
/// every station borrows the same fleet during
/// [`charge_all`][Self::charge_all].  Callers that shard vehicle storage per
/// charger can instead drive schedulers on worker threads — schedulers and
/// everything boxed inside them are `Send`.
#[derive(Default)]
pub struct Depot {
    stations: BTreeMap<ChargerId, ChargingScheduler>,
}

impl Depot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station, keyed by its charger's ID.  An existing station with
    /// the same ID is replaced.
    pub fn insert(&mut self, scheduler: ChargingScheduler) {
        self.stations.insert(scheduler.charger().id, scheduler);
    }

    pub fn station(&self, id: ChargerId) -> Option<&ChargingScheduler> {
        self.stations.get(&id)
    }

    pub fn station_mut(&mut self, id: ChargerId) -> Option<&mut ChargingScheduler> {
        self.stations.get_mut(&id)
    }

    /// Charger IDs in ascending order.
    pub fn charger_ids(&self) -> impl Iterator<Item = ChargerId> + '_ {
        self.stations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The charger currently tracking `vehicle`, if any.
    pub fn find_vehicle(&self, vehicle: VehicleId) -> Option<ChargerId> {
        self.stations
            .iter()
            .find(|(_, s)| s.is_tracking(vehicle))
            .map(|(&id, _)| id)
    }

    // ── Routed operations ─────────────────────────────────────────────────

    /// Admit `vehicle` at `charger`.
    ///
    /// # Errors
    ///
    /// [`UnknownCharger`][ChargingError::UnknownCharger] if no such station
    /// exists, otherwise whatever the station's
    /// [`add_vehicle`][ChargingScheduler::add_vehicle] returns.
    pub fn add_vehicle(
        &mut self,
        charger:  ChargerId,
        vehicle:  VehicleId,
        listener: Option<Box<dyn ChargingListener>>,
        now:      f64,
    ) -> ChargingResult<()> {
        // A vehicle belongs to at most one scheduler at a time — the outer
        // simulation's call discipline, asserted here in debug builds.
        debug_assert!(
            self.find_vehicle(vehicle).is_none(),
            "{vehicle} is already tracked by another charger in this depot"
        );
        let Some(station) = self.stations.get_mut(&charger) else {
            return Err(ChargingError::UnknownCharger(charger));
        };
        station.add_vehicle(vehicle, listener, now)
    }

    /// Remove `vehicle` from `charger`.
    pub fn remove_vehicle(
        &mut self,
        charger: ChargerId,
        vehicle: VehicleId,
        now:     f64,
    ) -> ChargingResult<()> {
        let Some(station) = self.stations.get_mut(&charger) else {
            return Err(ChargingError::UnknownCharger(charger));
        };
        station.remove_vehicle(vehicle, now)
    }

    /// Tick every station once, in ascending charger-ID order.
    ///
    /// Each station's tick is atomic on its own state, but `charge_all` is
    /// not atomic across stations: an error from one station leaves earlier
    /// stations already ticked.
    pub fn charge_all(
        &mut self,
        fleet:  &mut VehicleFleet,
        period: f64,
        now:    f64,
    ) -> ChargingResult<()> {
        for station in self.stations.values_mut() {
            station.charge_vehicles(fleet, period, now)?;
        }
        Ok(())
    }
}
