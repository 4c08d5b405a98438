//! Integration tests for ev-events.

use ev_core::{ChargerId, VehicleId};

use crate::{ChargingEndReason, ChargingEvent, ChargingEventKind};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn started(time: f64, vehicle: u32) -> ChargingEvent {
    ChargingEvent {
        time,
        charger: ChargerId(0),
        vehicle: VehicleId(vehicle),
        kind: ChargingEventKind::ChargingStarted,
    }
}

fn energy(time: f64, vehicle: u32, energy_j: f64, soc_j: f64) -> ChargingEvent {
    ChargingEvent {
        time,
        charger: ChargerId(0),
        vehicle: VehicleId(vehicle),
        kind: ChargingEventKind::EnergyCharged { energy_j, soc_j },
    }
}

fn ended(time: f64, vehicle: u32, reason: ChargingEndReason) -> ChargingEvent {
    ChargingEvent {
        time,
        charger: ChargerId(0),
        vehicle: VehicleId(vehicle),
        kind: ChargingEventKind::ChargingEnded { reason },
    }
}

// ── Vocabulary ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vocabulary {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(started(0.0, 0).kind.label(), "charging_started");
        assert_eq!(energy(0.0, 0, 1.0, 2.0).kind.label(), "energy_charged");
        assert_eq!(
            ended(0.0, 0, ChargingEndReason::Completed).kind.label(),
            "charging_ended"
        );
        assert_eq!(ChargingEventKind::Queued.label(), "queued");
        assert_eq!(ChargingEventKind::Dequeued.label(), "dequeued");
        assert_eq!(ChargingEndReason::Completed.label(), "completed");
        assert_eq!(ChargingEndReason::Removed.label(), "removed");
    }

    #[test]
    fn energy_accessor() {
        assert_eq!(energy(0.0, 1, 500.0, 900.0).energy(), Some((500.0, 900.0)));
        assert_eq!(started(0.0, 1).energy(), None);
    }

    #[test]
    fn end_reason_accessor() {
        assert_eq!(
            ended(0.0, 1, ChargingEndReason::Removed).end_reason(),
            Some(ChargingEndReason::Removed)
        );
        assert_eq!(energy(0.0, 1, 1.0, 1.0).end_reason(), None);
    }
}

// ── Sinks ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sinks {
    use super::*;
    use crate::{EventSink, NoopSink, RecordingSink};

    #[test]
    fn recording_sink_preserves_emission_order() {
        let mut sink = RecordingSink::new();
        sink.process(&started(0.0, 0));
        sink.process(&energy(300.0, 0, 100.0, 100.0));
        sink.process(&ended(600.0, 0, ChargingEndReason::Completed));

        assert_eq!(sink.events.len(), 3);
        assert_eq!(sink.events[0].kind.label(), "charging_started");
        assert_eq!(sink.events[2].kind.label(), "charging_ended");
    }

    #[test]
    fn recording_sink_take_drains() {
        let mut sink = RecordingSink::new();
        sink.process(&started(0.0, 0));
        let taken = sink.take();
        assert_eq!(taken.len(), 1);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.process(&started(0.0, 7));
    }
}

// ── CSV log ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_log {
    use super::*;
    use crate::{CsvEventLog, EventSink};
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn header_row_written() {
        let dir = tmp();
        let path = dir.path().join("events.csv");
        let mut log = CsvEventLog::new(&path).unwrap();
        log.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["time", "charger_id", "vehicle_id", "event", "energy_j", "soc_j", "reason"]
        );
    }

    #[test]
    fn rows_round_trip() {
        let dir = tmp();
        let path = dir.path().join("events.csv");
        let mut log = CsvEventLog::new(&path).unwrap();
        log.process(&started(0.0, 3));
        log.process(&energy(300.0, 3, 6_600_000.0, 10_000_000.0));
        log.process(&ended(600.0, 3, ChargingEndReason::Removed));
        assert!(log.take_error().is_none(), "no write errors expected");
        log.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);

        assert_eq!(&rows[0][3], "charging_started");
        assert_eq!(&rows[0][4], ""); // no energy payload
        assert_eq!(&rows[1][3], "energy_charged");
        assert_eq!(&rows[1][4], "6600000");
        assert_eq!(&rows[1][5], "10000000");
        assert_eq!(&rows[2][6], "removed");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut log = CsvEventLog::new(&dir.path().join("events.csv")).unwrap();
        log.finish().unwrap();
        log.finish().unwrap(); // second call should not panic
    }
}

// ── SQLite log ────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_log {
    use super::*;
    use crate::{EventSink, SqliteEventLog};
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn rows_inserted() {
        let dir = tmp();
        let path = dir.path().join("events.db");
        let mut log = SqliteEventLog::new(&path).unwrap();
        log.process(&started(0.0, 1));
        log.process(&energy(300.0, 1, 100.0, 200.0));
        assert!(log.take_error().is_none());
        log.finish().unwrap();
        drop(log);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM charging_events", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn non_energy_rows_store_null_payload() {
        let dir = tmp();
        let path = dir.path().join("events.db");
        let mut log = SqliteEventLog::new(&path).unwrap();
        log.process(&started(5.0, 9));
        log.finish().unwrap();
        drop(log);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let energy: Option<f64> = conn
            .query_row(
                "SELECT energy_j FROM charging_events WHERE vehicle_id = 9",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(energy, None);
    }
}

// ── Parquet log ───────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_log {
    use super::*;
    use crate::{EventSink, ParquetEventLog};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn rows_round_trip() {
        let dir = tmp();
        let path = dir.path().join("events.parquet");
        let mut log = ParquetEventLog::new(&path).unwrap();
        log.process(&started(0.0, 1));
        log.process(&energy(300.0, 1, 100.0, 200.0));
        log.process(&ended(600.0, 1, ChargingEndReason::Completed));
        assert!(log.take_error().is_none());
        log.finish().unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 3);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            field_names,
            ["time", "charger_id", "vehicle_id", "event", "energy_j", "soc_j", "reason"]
        );
    }

    #[test]
    fn finish_required_for_valid_footer() {
        let dir = tmp();
        let path = dir.path().join("events.parquet");
        {
            let mut log = ParquetEventLog::new(&path).unwrap();
            log.process(&started(0.0, 0));
            // Drop without finish() — the footer is never written.
        }

        let file = std::fs::File::open(&path).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
