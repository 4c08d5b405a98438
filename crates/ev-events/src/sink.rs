//! The `EventSink` boundary between schedulers and the outside world.

use std::sync::{Arc, Mutex};

use crate::ChargingEvent;

/// An opaque, append-only recipient of charging events.
///
/// Sinks accept events synchronously within the emitting call and make no
/// promise about persistence, filtering, or delivery beyond that.  The
/// boundary is infallible from the emitter's perspective: file-backed sinks
/// buffer their first write error internally and expose it via a
/// `take_error()` inherent method instead of failing the emitting operation.
///
/// `Send` so a scheduler (and the sink it owns) can be moved to a worker
/// thread when chargers are driven in parallel.
pub trait EventSink: Send {
    /// Accept one event.  Called in emission order per scheduler.
    fn process(&mut self, event: &ChargingEvent);
}

/// Shared-sink adapter: several schedulers (possibly on different worker
/// threads) can write to one underlying sink through an `Arc<Mutex<_>>`
/// handle, and the caller keeps a clone of the handle to `finish()` the log
/// after the run.  Per-scheduler emission order is preserved; cross-scheduler
/// interleaving is unspecified, as the sink contract allows.
impl<T: EventSink> EventSink for Arc<Mutex<T>> {
    fn process(&mut self, event: &ChargingEvent) {
        match self.lock() {
            Ok(mut sink) => sink.process(event),
            // A panic while holding the lock poisons it; the event data is
            // still sound, so keep accepting events.
            Err(poisoned) => poisoned.into_inner().process(event),
        }
    }
}

/// An [`EventSink`] that discards everything.  Bound to every scheduler at
/// construction so emission never needs a "no sink yet" path.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn process(&mut self, _event: &ChargingEvent) {}
}

/// An [`EventSink`] that keeps every event in memory, in emission order.
///
/// Intended for tests and small scenario post-processing.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ChargingEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events, leaving the sink empty.
    pub fn take(&mut self) -> Vec<ChargingEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn process(&mut self, event: &ChargingEvent) {
        self.events.push(event.clone());
    }
}
