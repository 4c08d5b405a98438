//! `ev-events` — the charging event vocabulary and event-log backends.
//!
//! Schedulers push typed [`ChargingEvent`]s into an [`EventSink`]; what
//! happens to them afterwards is entirely the sink's business.  Three
//! file-backed sinks are provided behind Cargo features:
//!
//! | Feature   | Backend | File written                |
//! |-----------|---------|-----------------------------|
//! | *(none)*  | CSV     | one `.csv` per log          |
//! | `sqlite`  | SQLite  | one `.db` per log           |
//! | `parquet` | Parquet | one `.parquet` per log      |
//!
//! All file-backed sinks buffer their first write error internally (the sink
//! boundary is infallible from the emitter's view) and surface it through
//! `take_error()` after the run.  Keep a shared handle so the log outlives
//! the scheduler that writes to it:
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use ev_events::CsvEventLog;
//!
//! let log = Arc::new(Mutex::new(CsvEventLog::new(Path::new("output/charger_0.csv"))?));
//! scheduler.init_events_handling(Box::new(Arc::clone(&log)));
//! // ... run the scenario ...
//! let mut log = log.lock().unwrap();
//! log.finish()?;
//! log.take_error().map(|e| eprintln!("event log error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod event;
pub mod sink;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvEventLog;
pub use error::{EventLogError, EventLogResult};
pub use event::{ChargingEndReason, ChargingEvent, ChargingEventKind};
pub use sink::{EventSink, NoopSink, RecordingSink};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteEventLog;

#[cfg(feature = "parquet")]
pub use parquet::ParquetEventLog;
