//! depot — smallest end-to-end scenario for the rust_ev charging framework.
//!
//! Eight EVs return to a two-charger depot over the morning, charge under a
//! fast-then-slow policy, and auto-complete.  Arrival order and pre-arrival
//! consumption are drawn from a seeded RNG, so every run is identical.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ev_charging::{ChargingListener, StationFactory};
use ev_core::units::{j_to_kwh, kwh_to_j};
use ev_core::{ChargerId, VehicleId};
use ev_events::{ChargingEndReason, CsvEventLog};
use ev_fleet::load_fleet_reader;
use ev_infra::load_chargers_reader;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const CHARGE_PERIOD_S: f64 = 300.0;     // one tick = 5 minutes
const DAY_S:           f64 = 86_400.0;
const ARRIVAL_SPAN_S:  f64 = 7_200.0;   // arrivals spread over the first 2 h

// ── Scenario CSVs ─────────────────────────────────────────────────────────────

// All vehicles leave the depot full; pre-arrival consumption is drawn below.
const FLEET_CSV: &str = "\
vehicle_id,capacity_kwh,initial_soc_kwh,max_power_kw\n\
0,40.0,40.0,11.0\n\
1,40.0,40.0,11.0\n\
2,40.0,40.0,11.0\n\
3,40.0,40.0,11.0\n\
4,77.0,77.0,50.0\n\
5,77.0,77.0,50.0\n\
6,77.0,77.0,50.0\n\
7,77.0,77.0,50.0\n\
";

// Charger 0: two 22 kW AC plugs, unbounded queue.
// Charger 1: one 50 kW DC plug, at most 4 waiting.
const CHARGERS_CSV: &str = "\
charger_id,lat,lon,plug_count,queue_capacity,rated_power_kw\n\
0,52.520,13.405,2,,22.0\n\
1,52.530,13.410,1,4,50.0\n\
";

// ── Completion listener ───────────────────────────────────────────────────────

/// Counts finished sessions so the loop can stop once every EV is done.
struct CompletionCounter {
    done: Arc<AtomicUsize>,
}

impl ChargingListener for CompletionCounter {
    fn on_end(&mut self, reason: ChargingEndReason, _now: f64) {
        if reason == ChargingEndReason::Completed {
            self.done.fetch_add(1, Ordering::Relaxed);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== depot — rust_ev charging framework ===");
    println!("Seed: {SEED}  |  Tick: {CHARGE_PERIOD_S} s");
    println!();

    // 1. Load the fleet and drain each battery by a seeded morning commute.
    let mut fleet = load_fleet_reader(std::io::Cursor::new(FLEET_CSV))?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    for id in fleet.vehicle_ids().collect::<Vec<_>>() {
        let drive_kwh = rng.gen_range(8.0..30.0);
        let vehicle = fleet.get_mut(id).expect("vehicle just loaded");
        vehicle.battery.draw(kwh_to_j(drive_kwh));
    }
    println!("Fleet: {} vehicles", fleet.len());

    // 2. Load the charging infrastructure.
    let chargers = load_chargers_reader(std::io::Cursor::new(CHARGERS_CSV))?;
    println!("Chargers: {}", chargers.len());

    // 3. Build the depot: fast-then-slow policy, one CSV event log per charger.
    std::fs::create_dir_all("output/depot")?;
    let logs: Arc<Mutex<Vec<(ChargerId, Arc<Mutex<CsvEventLog>>)>>> =
        Arc::new(Mutex::new(Vec::new()));
    let logs_handle = Arc::clone(&logs);

    let factory = StationFactory::fast_then_slow().with_sink(Box::new(move |charger| {
        let path = format!("output/depot/charger_{}.csv", charger.id.0);
        match CsvEventLog::new(Path::new(&path)) {
            Ok(log) => {
                let shared = Arc::new(Mutex::new(log));
                logs_handle
                    .lock()
                    .unwrap()
                    .push((charger.id, Arc::clone(&shared)));
                Box::new(shared)
            }
            Err(e) => {
                eprintln!("cannot open {path}: {e}; events for this charger are dropped");
                Box::new(ev_events::NoopSink)
            }
        }
    }));
    let mut depot = factory.build_depot(chargers);

    // 4. Seeded arrival plan: (time, vehicle, charger), sorted by time.
    //    Big-battery vehicles take the DC charger, the rest share the AC pair.
    let mut arrivals: Vec<(f64, VehicleId, ChargerId)> = fleet
        .vehicle_ids()
        .map(|v| {
            let t = rng.gen_range(0.0..ARRIVAL_SPAN_S);
            let charger = if v.index() >= 4 { ChargerId(1) } else { ChargerId(0) };
            (t, v, charger)
        })
        .collect();
    arrivals.sort_by(|a, b| a.0.total_cmp(&b.0));

    // 5. Drive the day tick by tick, admitting arrivals as their time comes.
    let done = Arc::new(AtomicUsize::new(0));
    let total = fleet.len();
    let t0 = Instant::now();

    let mut next_arrival = 0;
    let mut now = 0.0;
    let mut ticks = 0u32;
    while now < DAY_S && done.load(Ordering::Relaxed) < total {
        now += CHARGE_PERIOD_S;

        while next_arrival < arrivals.len() && arrivals[next_arrival].0 <= now {
            let (t, vehicle, charger) = arrivals[next_arrival];
            let listener = CompletionCounter { done: Arc::clone(&done) };
            depot.add_vehicle(charger, vehicle, Some(Box::new(listener)), t)?;
            next_arrival += 1;
        }

        depot.charge_all(&mut fleet, CHARGE_PERIOD_S, now)?;
        ticks += 1;
    }
    let elapsed = t0.elapsed();

    // 6. Close the event logs.
    for (charger, log) in logs.lock().unwrap().iter() {
        let mut log = log.lock().unwrap();
        log.finish()?;
        if let Some(e) = log.take_error() {
            eprintln!("event log for {charger}: {e}");
        }
    }

    // 7. Summary.
    println!();
    println!(
        "Simulated {:.1} h in {} ticks ({:.3} s wall clock); {} of {} vehicles fully charged",
        now / 3_600.0,
        ticks,
        elapsed.as_secs_f64(),
        done.load(Ordering::Relaxed),
        total,
    );
    println!();
    println!("{:<10} {:<14} {:<12}", "Vehicle", "SoC (kWh)", "Capacity");
    println!("{}", "-".repeat(36));
    for id in fleet.vehicle_ids() {
        let v = fleet.get(id).expect("fleet is dense");
        println!(
            "{:<10} {:<14.1} {:<12.1}",
            id.0,
            j_to_kwh(v.battery.charge_j()),
            j_to_kwh(v.battery.capacity_j()),
        );
    }
    println!();
    println!("Event logs: output/depot/charger_<id>.csv");

    Ok(())
}
