//! The per-station charging scheduler: admission, queueing, promotion, and
//! the periodic charge tick.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use ev_core::VehicleId;
use ev_events::{
    ChargingEndReason, ChargingEvent, ChargingEventKind, EventSink, NoopSink,
};
use ev_fleet::VehicleFleet;
use ev_infra::ChargerSpec;

use crate::{ChargingError, ChargingListener, ChargingResult, ChargingStrategy};

/// Owns the plugged/queued state of one charger and drives its strategy once
/// per tick.
///
/// # Call discipline
///
/// One scheduler instance is single-writer: `add_vehicle`, `remove_vehicle`,
/// and `charge_vehicles` must be serialized (one thread, or an exclusive
/// lock per charger).  Different schedulers share no state and may be driven
/// in parallel.  `now` must be non-decreasing across all calls to one
/// instance; a regression fails with
/// [`TimeRegression`][ChargingError::TimeRegression].
///
/// # Per-vehicle lifecycle
///
/// `Unseen → Queued → Plugged → Gone`, or `Unseen → Plugged → Gone` when a
/// plug is free at admission.  `Gone` is terminal for this instance; a fully
/// removed vehicle may be re-admitted later and starts a fresh lifecycle.
///
/// # Failure atomicity
///
/// Every operation performs all of its precondition checks before the first
/// state mutation, so a returned error means nothing changed.
pub struct ChargingScheduler {
    charger:  ChargerSpec,
    strategy: Box<dyn ChargingStrategy>,
    sink:     Box<dyn EventSink>,

    /// Plugged vehicles in plug order.  Never longer than
    /// `charger.plug_count`.
    plugged: Vec<VehicleId>,

    /// Waiting vehicles in arrival order.
    queue: VecDeque<VehicleId>,

    /// Per-vehicle observer capabilities, released when the vehicle leaves.
    listeners: FxHashMap<VehicleId, Box<dyn ChargingListener>>,

    /// Session start time for every plugged vehicle.
    session_start: FxHashMap<VehicleId, f64>,

    /// Latest `now` observed by any operation.
    last_now: f64,
}

impl ChargingScheduler {
    /// Create a scheduler for `charger` driving `strategy`.
    ///
    /// Events are discarded until [`init_events_handling`][Self::init_events_handling]
    /// binds a real sink.
    pub fn new(charger: ChargerSpec, strategy: Box<dyn ChargingStrategy>) -> Self {
        debug_assert!(charger.plug_count >= 1, "charger must have at least one plug");
        Self {
            charger,
            strategy,
            sink:          Box::new(NoopSink),
            plugged:       Vec::new(),
            queue:         VecDeque::new(),
            listeners:     FxHashMap::default(),
            session_start: FxHashMap::default(),
            last_now:      f64::NEG_INFINITY,
        }
    }

    /// Bind the event sink.  Callers should do this exactly once, at
    /// construction time; calling again simply replaces the sink for
    /// subsequent events.
    pub fn init_events_handling(&mut self, sink: Box<dyn EventSink>) {
        self.sink = sink;
    }

    // ── Admission and removal ─────────────────────────────────────────────

    /// Admit `vehicle`, plugging it immediately if a plug is free and
    /// queueing it otherwise.
    ///
    /// No energy is transferred by this call; the next
    /// [`charge_vehicles`][Self::charge_vehicles] bills the vehicle from its
    /// own admission time.
    ///
    /// # Errors
    ///
    /// [`DuplicateVehicle`][ChargingError::DuplicateVehicle] if the vehicle
    /// is already tracked here, [`TimeRegression`][ChargingError::TimeRegression]
    /// if `now` runs backwards, [`QueueFull`][ChargingError::QueueFull] if
    /// the charger has a bounded queue with no room left.
    pub fn add_vehicle(
        &mut self,
        vehicle:  VehicleId,
        listener: Option<Box<dyn ChargingListener>>,
        now:      f64,
    ) -> ChargingResult<()> {
        self.check_now(now)?;
        if self.is_tracking(vehicle) {
            return Err(ChargingError::DuplicateVehicle(vehicle));
        }
        let plug_free = self.plugged.len() < self.charger.plug_count;
        if !plug_free {
            if let Some(capacity) = self.charger.queue_capacity {
                if self.queue.len() >= capacity {
                    return Err(ChargingError::QueueFull {
                        charger: self.charger.id,
                        capacity,
                    });
                }
            }
        }

        // All checks passed; the call can no longer fail.
        self.last_now = now;
        if let Some(listener) = listener {
            self.listeners.insert(vehicle, listener);
        }

        if plug_free {
            self.plug(vehicle, now);
        } else {
            self.queue.push_back(vehicle);
            if let Some(l) = self.listeners.get_mut(&vehicle) {
                l.on_queued(now);
            }
            self.emit(now, vehicle, ChargingEventKind::Queued);
        }
        Ok(())
    }

    /// Remove `vehicle`, wherever it is tracked.
    ///
    /// A plugged vehicle's session ends with reason `Removed` and the freed
    /// plug is immediately refilled from the queue; a queued vehicle is
    /// dequeued without ever having charged.
    ///
    /// # Errors
    ///
    /// [`UnknownVehicle`][ChargingError::UnknownVehicle] if the vehicle is
    /// tracked by neither set, [`TimeRegression`][ChargingError::TimeRegression]
    /// if `now` runs backwards.
    pub fn remove_vehicle(&mut self, vehicle: VehicleId, now: f64) -> ChargingResult<()> {
        self.check_now(now)?;

        if let Some(pos) = self.plugged.iter().position(|&v| v == vehicle) {
            self.last_now = now;
            self.plugged.remove(pos);
            self.session_start.remove(&vehicle);
            if let Some(mut listener) = self.listeners.remove(&vehicle) {
                listener.on_end(ChargingEndReason::Removed, now);
            }
            self.emit(
                now,
                vehicle,
                ChargingEventKind::ChargingEnded { reason: ChargingEndReason::Removed },
            );
            self.promote(now);
            Ok(())
        } else if let Some(pos) = self.queue.iter().position(|&v| v == vehicle) {
            self.last_now = now;
            self.queue.remove(pos);
            if let Some(mut listener) = self.listeners.remove(&vehicle) {
                listener.on_dequeued(false, now);
            }
            self.emit(now, vehicle, ChargingEventKind::Dequeued);
            Ok(())
        } else {
            Err(ChargingError::UnknownVehicle(vehicle))
        }
    }

    // ── The charge tick ───────────────────────────────────────────────────

    /// Advance charging by one tick of `period` seconds ending at `now`.
    ///
    /// For every plugged vehicle the bound strategy decides the energy for
    /// the vehicle's plugged share of the tick (`min(period, now − session
    /// start)` — admissions are billed from their own admission time, and a
    /// vehicle removed mid-tick simply never sees the partial period).
    /// Negative strategy output is clamped to zero; the battery clamps at
    /// capacity.
    ///
    /// Vehicles whose strategy signals completion are unplugged afterwards,
    /// exactly like an external removal but with reason `Completed`, and
    /// freed plugs are refilled from the queue at this same `now`.  Freshly
    /// promoted vehicles receive no energy for the tick they were promoted
    /// in.
    ///
    /// # Errors
    ///
    /// [`InvalidPeriod`][ChargingError::InvalidPeriod] unless `period > 0`,
    /// [`TimeRegression`][ChargingError::TimeRegression] if `now` runs
    /// backwards, [`UnknownVehicle`][ChargingError::UnknownVehicle] if a
    /// plugged vehicle is missing from `fleet` (an outer-simulation call
    /// discipline violation, caught before any state changes).
    pub fn charge_vehicles(
        &mut self,
        fleet:  &mut VehicleFleet,
        period: f64,
        now:    f64,
    ) -> ChargingResult<()> {
        if !(period > 0.0) {
            return Err(ChargingError::InvalidPeriod(period));
        }
        self.check_now(now)?;
        for &vehicle in &self.plugged {
            if fleet.get(vehicle).is_none() {
                return Err(ChargingError::UnknownVehicle(vehicle));
            }
        }
        self.last_now = now;

        // Iterate over a snapshot: completions below refill plugs from the
        // queue, and those promotions must not be charged this tick.
        let plugged_now: Vec<VehicleId> = self.plugged.clone();
        let mut completed: Vec<VehicleId> = Vec::new();

        for vehicle in plugged_now {
            let start = self.session_start[&vehicle];
            let elapsed = period.min(now - start);

            let Some(ev) = fleet.get_mut(vehicle) else {
                continue; // unreachable: checked above
            };
            let outcome = self.strategy.energy_for(ev, elapsed, now);
            let delivered = outcome.energy_j.max(0.0);
            ev.battery.store(delivered);
            let soc_j = ev.battery.charge_j();

            self.emit(
                now,
                vehicle,
                ChargingEventKind::EnergyCharged { energy_j: delivered, soc_j },
            );
            if let Some(l) = self.listeners.get_mut(&vehicle) {
                l.on_energy(delivered, soc_j, now);
            }
            if outcome.complete {
                completed.push(vehicle);
            }
        }

        // End completed sessions only after every update above has been
        // computed, then refill plugs in queue FIFO order.
        for vehicle in completed {
            if let Some(pos) = self.plugged.iter().position(|&v| v == vehicle) {
                self.plugged.remove(pos);
            }
            self.session_start.remove(&vehicle);
            self.emit(
                now,
                vehicle,
                ChargingEventKind::ChargingEnded { reason: ChargingEndReason::Completed },
            );
            if let Some(mut listener) = self.listeners.remove(&vehicle) {
                listener.on_end(ChargingEndReason::Completed, now);
            }
        }
        self.promote(now);
        Ok(())
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    /// Point-in-time copy of the plugged set, in plug order.
    pub fn plugged_vehicles(&self) -> Vec<VehicleId> {
        self.plugged.clone()
    }

    /// Point-in-time copy of the waiting queue, head first.
    pub fn queued_vehicles(&self) -> Vec<VehicleId> {
        self.queue.iter().copied().collect()
    }

    /// The policy bound at construction.
    pub fn charging_strategy(&self) -> &dyn ChargingStrategy {
        self.strategy.as_ref()
    }

    /// The static description this scheduler was built from.
    pub fn charger(&self) -> &ChargerSpec {
        &self.charger
    }

    /// `true` if `vehicle` is currently plugged or queued here.
    pub fn is_tracking(&self, vehicle: VehicleId) -> bool {
        self.plugged.contains(&vehicle) || self.queue.contains(&vehicle)
    }

    /// Session start time of a plugged vehicle, if any.
    pub fn session_start(&self, vehicle: VehicleId) -> Option<f64> {
        self.session_start.get(&vehicle).copied()
    }

    pub fn plugged_count(&self) -> usize {
        self.plugged.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_now(&self, now: f64) -> ChargingResult<()> {
        if now < self.last_now {
            return Err(ChargingError::TimeRegression { now, last: self.last_now });
        }
        Ok(())
    }

    /// Occupy a plug with `vehicle` and open its session at `now`.
    fn plug(&mut self, vehicle: VehicleId, now: f64) {
        self.plugged.push(vehicle);
        self.session_start.insert(vehicle, now);
        if let Some(l) = self.listeners.get_mut(&vehicle) {
            l.on_start(now);
        }
        self.emit(now, vehicle, ChargingEventKind::ChargingStarted);
    }

    /// Refill free plugs from the queue head, in FIFO order.
    fn promote(&mut self, now: f64) {
        while self.plugged.len() < self.charger.plug_count {
            let Some(vehicle) = self.queue.pop_front() else {
                break;
            };
            self.plug(vehicle, now);
        }
    }

    fn emit(&mut self, time: f64, vehicle: VehicleId, kind: ChargingEventKind) {
        let event = ChargingEvent {
            time,
            charger: self.charger.id,
            vehicle,
            kind,
        };
        self.sink.process(&event);
    }
}
