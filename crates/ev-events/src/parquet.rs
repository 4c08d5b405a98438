//! Parquet event-log backend (feature `parquet`).
//!
//! Events are buffered in memory and flushed as a record batch every
//! [`BATCH_ROWS`] events; `finish()` flushes the tail and writes the file
//! footer.  Files written without calling `finish()` cannot be opened by
//! Parquet readers.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::sink::EventSink;
use crate::{ChargingEvent, EventLogError, EventLogResult};

/// Rows buffered before a record batch is written.
const BATCH_ROWS: usize = 1024;

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("time",       DataType::Float64, false),
        Field::new("charger_id", DataType::UInt32,  false),
        Field::new("vehicle_id", DataType::UInt32,  false),
        Field::new("event",      DataType::Utf8,    false),
        Field::new("energy_j",   DataType::Float64, true),
        Field::new("soc_j",      DataType::Float64, true),
        Field::new("reason",     DataType::Utf8,    true),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes charging events to one Parquet file.
pub struct ParquetEventLog {
    writer:     Option<ArrowWriter<File>>,
    schema:     Arc<Schema>,
    buffer:     Vec<ChargingEvent>,
    last_error: Option<EventLogError>,
}

impl ParquetEventLog {
    /// Create the Parquet file at `path`.
    pub fn new(path: &Path) -> EventLogResult<Self> {
        let schema = event_schema();
        let file = File::create(path)?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;

        Ok(Self {
            writer: Some(writer),
            schema,
            buffer: Vec::with_capacity(BATCH_ROWS),
            last_error: None,
        })
    }

    fn flush_buffer(&mut self) -> EventLogResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let mut times    = Float64Builder::new();
        let mut chargers = UInt32Builder::new();
        let mut vehicles = UInt32Builder::new();
        let mut kinds    = StringBuilder::new();
        let mut energies = Float64Builder::new();
        let mut socs     = Float64Builder::new();
        let mut reasons  = StringBuilder::new();

        for event in self.buffer.drain(..) {
            times.append_value(event.time);
            chargers.append_value(event.charger.0);
            vehicles.append_value(event.vehicle.0);
            kinds.append_value(event.kind.label());

            match event.energy() {
                Some((e, s)) => {
                    energies.append_value(e);
                    socs.append_value(s);
                }
                None => {
                    energies.append_null();
                    socs.append_null();
                }
            }
            reasons.append_option(event.end_reason().map(|r| r.label()));
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(times.finish()),
                Arc::new(chargers.finish()),
                Arc::new(vehicles.finish()),
                Arc::new(kinds.finish()),
                Arc::new(energies.finish()),
                Arc::new(socs.finish()),
                Arc::new(reasons.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<EventLogError> {
        self.last_error.take()
    }

    /// Flush buffered rows and write the Parquet footer.  Idempotent.
    pub fn finish(&mut self) -> EventLogResult<()> {
        self.flush_buffer()?;
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}

impl EventSink for ParquetEventLog {
    fn process(&mut self, event: &ChargingEvent) {
        self.buffer.push(event.clone());
        if self.buffer.len() >= BATCH_ROWS {
            if let Err(e) = self.flush_buffer() {
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
            }
        }
    }
}
