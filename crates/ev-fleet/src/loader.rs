//! CSV fleet loader.
//!
//! # CSV format
//!
//! One row per vehicle.  IDs must be unique and dense (`0..n`); row order in
//! the file is irrelevant.
//!
//! ```csv
//! vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw
//! 0,40.0,10.0,11.0
//! 1,40.0,32.5,11.0
//! 2,77.0,5.0,50.0
//! ```
//!
//! Energies are given in kWh and powers in kW for readability; the loader
//! converts to joules/watts via [`ev_core::units`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ev_core::units::{kw_to_w, kwh_to_j};
use ev_core::VehicleId;

use crate::{Battery, ElectricVehicle, FleetError, VehicleFleet};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FleetRecord {
    vehicle_id:      u32,
    capacity_kwh:    f64,
    initial_soc_kwh: f64,
    max_power_kw:    f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`VehicleFleet`] from a CSV file.
pub fn load_fleet_csv(path: &Path) -> Result<VehicleFleet, FleetError> {
    let file = std::fs::File::open(path).map_err(FleetError::Io)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded fixtures.
pub fn load_fleet_reader<R: Read>(reader: R) -> Result<VehicleFleet, FleetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut rows: Vec<FleetRecord> = Vec::new();
    for result in csv_reader.deserialize::<FleetRecord>() {
        let row = result.map_err(|e| FleetError::Parse(e.to_string()))?;
        if row.capacity_kwh <= 0.0 {
            return Err(FleetError::Parse(format!(
                "vehicle {} has non-positive capacity {}",
                row.vehicle_id, row.capacity_kwh
            )));
        }
        if row.max_power_kw <= 0.0 {
            return Err(FleetError::Parse(format!(
                "vehicle {} has non-positive max power {}",
                row.vehicle_id, row.max_power_kw
            )));
        }
        rows.push(row);
    }

    // IDs must form exactly 0..n so the arena stays dense.
    rows.sort_by_key(|r| r.vehicle_id);
    for (i, row) in rows.iter().enumerate() {
        if row.vehicle_id as usize != i {
            return Err(FleetError::Parse(format!(
                "vehicle IDs must be unique and dense 0..{}: found {} at position {}",
                rows.len(),
                row.vehicle_id,
                i
            )));
        }
    }

    let mut fleet = VehicleFleet::new();
    for row in rows {
        fleet.vehicles.push(ElectricVehicle {
            id:                 VehicleId(row.vehicle_id),
            battery:            Battery::new(
                kwh_to_j(row.capacity_kwh),
                kwh_to_j(row.initial_soc_kwh),
            ),
            max_charge_power_w: kw_to_w(row.max_power_kw),
        });
    }

    Ok(fleet)
}
