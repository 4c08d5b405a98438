//! SQLite event-log backend (feature `sqlite`).
//!
//! Writes a single database file with one `charging_events` table mirroring
//! the CSV column layout.

use std::path::Path;

use rusqlite::Connection;

use crate::sink::EventSink;
use crate::{ChargingEvent, EventLogError, EventLogResult};

/// Writes charging events to an SQLite database.
pub struct SqliteEventLog {
    conn:       Connection,
    last_error: Option<EventLogError>,
    finished:   bool,
}

impl SqliteEventLog {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn new(path: &Path) -> EventLogResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS charging_events (
                 time       REAL    NOT NULL,
                 charger_id INTEGER NOT NULL,
                 vehicle_id INTEGER NOT NULL,
                 event      TEXT    NOT NULL,
                 energy_j   REAL,
                 soc_j      REAL,
                 reason     TEXT
             );",
        )?;

        Ok(Self {
            conn,
            last_error: None,
            finished: false,
        })
    }

    /// Insert one event row.
    pub fn write(&mut self, event: &ChargingEvent) -> EventLogResult<()> {
        let (energy, soc) = match event.energy() {
            Some((e, s)) => (Some(e), Some(s)),
            None         => (None, None),
        };
        let reason = event.end_reason().map(|r| r.label());

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO charging_events \
             (time, charger_id, vehicle_id, event, energy_j, soc_j, reason) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        stmt.execute(rusqlite::params![
            event.time,
            event.charger.0,
            event.vehicle.0,
            event.kind.label(),
            energy,
            soc,
            reason,
        ])?;
        Ok(())
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<EventLogError> {
        self.last_error.take()
    }

    /// Checkpoint the WAL.  Idempotent.
    pub fn finish(&mut self) -> EventLogResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

impl EventSink for SqliteEventLog {
    fn process(&mut self, event: &ChargingEvent) {
        if let Err(e) = self.write(event) {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
