//! CSV event-log backend.
//!
//! Writes one file with one row per event:
//!
//! ```csv
//! time,charger_id,vehicle_id,event,energy_j,soc_j,reason
//! 0,0,3,charging_started,,,
//! 300,0,3,energy_charged,3300000,10000000,
//! ```
//!
//! The `energy_j`/`soc_j` columns are empty for non-energy events; `reason`
//! is empty except for `charging_ended` rows.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::sink::EventSink;
use crate::{ChargingEvent, EventLogError, EventLogResult};

/// Writes charging events to a CSV file.
///
/// [`EventSink::process`] is infallible; the first write error is stored
/// internally and retrieved with [`take_error`][Self::take_error] after the
/// run.
pub struct CsvEventLog {
    writer:     Writer<File>,
    last_error: Option<EventLogError>,
    finished:   bool,
}

impl CsvEventLog {
    /// Create (or truncate) the log file at `path` and write the header row.
    pub fn new(path: &Path) -> EventLogResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "time", "charger_id", "vehicle_id", "event", "energy_j", "soc_j", "reason",
        ])?;

        Ok(Self {
            writer,
            last_error: None,
            finished: false,
        })
    }

    /// Write one event row.
    pub fn write(&mut self, event: &ChargingEvent) -> EventLogResult<()> {
        let (energy, soc) = match event.energy() {
            Some((e, s)) => (e.to_string(), s.to_string()),
            None         => (String::new(), String::new()),
        };
        let reason = event.end_reason().map(|r| r.label()).unwrap_or("");

        self.writer.write_record(&[
            event.time.to_string(),
            event.charger.0.to_string(),
            event.vehicle.0.to_string(),
            event.kind.label().to_string(),
            energy,
            soc,
            reason.to_string(),
        ])?;
        Ok(())
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<EventLogError> {
        self.last_error.take()
    }

    /// Flush the underlying file.  Idempotent.
    pub fn finish(&mut self) -> EventLogResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

impl EventSink for CsvEventLog {
    fn process(&mut self, event: &ChargingEvent) {
        if let Err(e) = self.write(event) {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
