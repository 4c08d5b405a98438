//! CSV charger-infrastructure loader.
//!
//! # CSV format
//!
//! One row per charger.  IDs must be unique; they need not be dense because
//! depots key chargers by ID rather than arena index.
//!
//! ```csv
//! charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw
//! 0,52.520,13.405,2,,22.0
//! 1,52.530,13.410,1,4,50.0
//! ```
//!
//! An empty `queue_capacity` means the queue is unbounded.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ev_core::units::kw_to_w;
use ev_core::{ChargerId, GeoPoint};

use crate::{ChargerSpec, InfraError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChargerRecord {
    charger_id:     u32,
    lat:            f32,
    lon:            f32,
    plug_count:     usize,
    queue_capacity: Option<usize>,
    rated_power_kw: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load charger specifications from a CSV file, in file order.
pub fn load_chargers_csv(path: &Path) -> Result<Vec<ChargerSpec>, InfraError> {
    let file = std::fs::File::open(path).map_err(InfraError::Io)?;
    load_chargers_reader(file)
}

/// Like [`load_chargers_csv`] but accepts any `Read` source.
pub fn load_chargers_reader<R: Read>(reader: R) -> Result<Vec<ChargerSpec>, InfraError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut specs: Vec<ChargerSpec> = Vec::new();
    let mut seen: BTreeSet<ChargerId> = BTreeSet::new();

    for result in csv_reader.deserialize::<ChargerRecord>() {
        let row = result.map_err(|e| InfraError::Parse(e.to_string()))?;
        let id = ChargerId(row.charger_id);

        if !seen.insert(id) {
            return Err(InfraError::DuplicateCharger(id));
        }
        if row.plug_count == 0 {
            return Err(InfraError::InvalidPlugCount {
                charger: id,
                plugs:   row.plug_count,
            });
        }
        if row.rated_power_kw <= 0.0 {
            return Err(InfraError::Parse(format!(
                "charger {id} has non-positive rated power {}",
                row.rated_power_kw
            )));
        }

        specs.push(ChargerSpec {
            id,
            location:       GeoPoint::new(row.lat, row.lon),
            plug_count:     row.plug_count,
            queue_capacity: row.queue_capacity,
            rated_power_w:  kw_to_w(row.rated_power_kw),
        });
    }

    Ok(specs)
}
