//! Unit tests for ev-infra.

use std::io::Cursor;

use ev_core::{ChargerId, GeoPoint};

use crate::{load_chargers_reader, ChargerSpec, InfraError};

#[cfg(test)]
mod spec {
    use super::*;

    #[test]
    fn new_defaults_to_unbounded_queue() {
        let spec = ChargerSpec::new(ChargerId(0), GeoPoint::new(0.0, 0.0), 2, 22_000.0);
        assert_eq!(spec.queue_capacity, None);
        assert_eq!(spec.plug_count, 2);
    }

    #[test]
    fn with_queue_capacity() {
        let spec = ChargerSpec::new(ChargerId(0), GeoPoint::new(0.0, 0.0), 1, 50_000.0)
            .with_queue_capacity(4);
        assert_eq!(spec.queue_capacity, Some(4));
    }
}

#[cfg(test)]
mod loader {
    use super::*;

    const GOOD_CSV: &str = "\
charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw\n\
0,52.520,13.405,2,,22.0\n\
1,52.530,13.410,1,4,50.0\n\
";

    #[test]
    fn loads_in_file_order() {
        let specs = load_chargers_reader(Cursor::new(GOOD_CSV)).unwrap();
        assert_eq!(specs.len(), 2);

        assert_eq!(specs[0].id, ChargerId(0));
        assert_eq!(specs[0].plug_count, 2);
        assert_eq!(specs[0].queue_capacity, None);
        assert!((specs[0].rated_power_w - 22_000.0).abs() < 1e-9);

        assert_eq!(specs[1].queue_capacity, Some(4));
        assert!((specs[1].rated_power_w - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_charger_rejected() {
        let csv = "\
charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw\n\
3,0.0,0.0,1,,22.0\n\
3,0.0,0.0,1,,22.0\n\
";
        let err = load_chargers_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, InfraError::DuplicateCharger(ChargerId(3))));
    }

    #[test]
    fn zero_plugs_rejected() {
        let csv = "\
charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw\n\
0,0.0,0.0,0,,22.0\n\
";
        let err = load_chargers_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, InfraError::InvalidPlugCount { plugs: 0, .. }));
    }

    #[test]
    fn non_positive_power_rejected() {
        let csv = "\
charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw\n\
0,0.0,0.0,1,,0.0\n\
";
        assert!(load_chargers_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn malformed_row_rejected() {
        let csv = "\
charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw\n\
0,x,0.0,1,,22.0\n\
";
        assert!(matches!(
            load_chargers_reader(Cursor::new(csv)),
            Err(InfraError::Parse(_))
        ));
    }
}
