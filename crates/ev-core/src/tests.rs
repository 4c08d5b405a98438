//! Unit tests for ev-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ChargerId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(ChargerId(100) > ChargerId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
        assert_eq!(ChargerId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
        assert_eq!(ChargerId(3).to_string(), "ChargerId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(52.520, 13.405);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(52.0, 13.0);
        let b = GeoPoint::new(53.0, 13.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }
}

#[cfg(test)]
mod units {
    use crate::units::{j_to_kwh, kw_to_w, kwh_to_j, w_to_kw};

    #[test]
    fn kwh_roundtrip() {
        assert_eq!(kwh_to_j(1.0), 3_600_000.0);
        assert!((j_to_kwh(kwh_to_j(40.0)) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn kw_roundtrip() {
        assert_eq!(kw_to_w(11.0), 11_000.0);
        assert!((w_to_kw(kw_to_w(50.0)) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn power_over_time() {
        // 11 kW for one hour is 11 kWh.
        let e = kw_to_w(11.0) * 3_600.0;
        assert!((j_to_kwh(e) - 11.0).abs() < 1e-9);
    }
}
