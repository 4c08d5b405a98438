//! The `ElectricVehicle` record stored in the fleet arena.

use ev_core::VehicleId;

use crate::Battery;

/// One electric vehicle: identity, battery, and its charging-power limit.
///
/// Vehicles are owned by the outer simulation through the
/// [`VehicleFleet`][crate::VehicleFleet] arena.  A charging scheduler holds
/// only the `VehicleId` while the vehicle is plugged or queued; the battery
/// is written exclusively by the scheduler during a charging session.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct ElectricVehicle {
    /// Arena index of this vehicle.  Assigned by [`VehicleFleet::register`][crate::VehicleFleet::register].
    pub id: VehicleId,

    /// Battery capacity and state of charge.
    pub battery: Battery,

    /// The highest charging power this vehicle's onboard charger accepts, in
    /// watts.  Charging strategies cap the station's rated power at this.
    pub max_charge_power_w: f64,
}
