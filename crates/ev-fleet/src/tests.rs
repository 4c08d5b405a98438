//! Unit tests for ev-fleet.

use std::io::Cursor;

use ev_core::units::kwh_to_j;
use ev_core::VehicleId;

use crate::{load_fleet_reader, Battery, VehicleFleet};

// ── Battery ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod battery {
    use super::*;

    #[test]
    fn new_clamps_initial_charge() {
        let b = Battery::new(100.0, 150.0);
        assert_eq!(b.charge_j(), 100.0);

        let b = Battery::new(100.0, -5.0);
        assert_eq!(b.charge_j(), 0.0);
    }

    #[test]
    fn store_clamps_at_capacity() {
        let mut b = Battery::new(100.0, 90.0);
        let stored = b.store(25.0);
        assert_eq!(stored, 10.0);
        assert_eq!(b.charge_j(), 100.0);
        assert!(b.free_j() < 1e-12);
    }

    #[test]
    fn store_ignores_negative_input() {
        let mut b = Battery::new(100.0, 50.0);
        assert_eq!(b.store(-10.0), 0.0);
        assert_eq!(b.charge_j(), 50.0);
    }

    #[test]
    fn draw_clamps_at_empty() {
        let mut b = Battery::new(100.0, 30.0);
        let drawn = b.draw(50.0);
        assert_eq!(drawn, 30.0);
        assert_eq!(b.charge_j(), 0.0);
    }

    #[test]
    fn soc_fraction() {
        let b = Battery::new(200.0, 50.0);
        assert!((b.soc() - 0.25).abs() < 1e-12);
        // Degenerate zero-capacity battery reports empty rather than NaN.
        assert_eq!(Battery::new(0.0, 0.0).soc(), 0.0);
    }
}

// ── VehicleFleet ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet {
    use super::*;

    #[test]
    fn register_assigns_dense_ids() {
        let mut fleet = VehicleFleet::new();
        let a = fleet.register(Battery::new(100.0, 0.0), 11_000.0);
        let b = fleet.register(Battery::new(100.0, 0.0), 11_000.0);
        assert_eq!(a, VehicleId(0));
        assert_eq!(b, VehicleId(1));
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.get(a).unwrap().id, a);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let fleet = VehicleFleet::new();
        assert!(fleet.get(VehicleId(0)).is_none());
    }

    #[test]
    fn vehicle_ids_ascending() {
        let mut fleet = VehicleFleet::new();
        for _ in 0..3 {
            fleet.register(Battery::new(1.0, 0.0), 1.0);
        }
        let ids: Vec<_> = fleet.vehicle_ids().collect();
        assert_eq!(ids, vec![VehicleId(0), VehicleId(1), VehicleId(2)]);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const GOOD_CSV: &str = "\
vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw\n\
1,40.0,32.5,11.0\n\
0,40.0,10.0,11.0\n\
2,77.0,5.0,50.0\n\
";

    #[test]
    fn loads_and_converts_units() {
        let fleet = load_fleet_reader(Cursor::new(GOOD_CSV)).unwrap();
        assert_eq!(fleet.len(), 3);

        let v0 = fleet.get(VehicleId(0)).unwrap();
        assert!((v0.battery.capacity_j() - kwh_to_j(40.0)).abs() < 1e-6);
        assert!((v0.battery.charge_j() - kwh_to_j(10.0)).abs() < 1e-6);
        assert!((v0.max_charge_power_w - 11_000.0).abs() < 1e-9);

        // Rows are reordered into ID order regardless of file order.
        let v2 = fleet.get(VehicleId(2)).unwrap();
        assert!((v2.max_charge_power_w - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_id_rejected() {
        let csv = "\
vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw\n\
0,40.0,10.0,11.0\n\
0,40.0,10.0,11.0\n\
";
        assert!(load_fleet_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn gap_in_ids_rejected() {
        let csv = "\
vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw\n\
0,40.0,10.0,11.0\n\
2,40.0,10.0,11.0\n\
";
        assert!(load_fleet_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn non_positive_capacity_rejected() {
        let csv = "\
vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw\n\
0,0.0,0.0,11.0\n\
";
        assert!(load_fleet_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn malformed_row_rejected() {
        let csv = "\
vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw\n\
0,forty,10.0,11.0\n\
";
        assert!(load_fleet_reader(Cursor::new(csv)).is_err());
    }
}
