//! The station factory: stamps out one scheduler per charger, binding each
//! to a strategy and an event sink.

use ev_events::EventSink;
use ev_infra::ChargerSpec;

use crate::{
    ChargingScheduler, ChargingStrategy, ConstantPowerStrategy, Depot, FastThenSlowStrategy,
};

/// Builds the charging strategy for one charger.
pub type StrategyFactory = Box<dyn Fn(&ChargerSpec) -> Box<dyn ChargingStrategy>>;

/// Builds the event sink for one charger.
pub type SinkFactory = Box<dyn Fn(&ChargerSpec) -> Box<dyn EventSink>>;

/// Creates schedulers at scenario load, one per charger.
///
/// The strategy and (optionally) the sink are produced per charger from the
/// charger's own spec — typically to pick up its rated power or to name a
/// per-charger log file.  Without a sink factory, schedulers keep their
/// construction-time no-op sink.
///
/// ```rust,ignore
/// let factory = StationFactory::constant_power()
///     .with_sink(Box::new(|c| {
///         Box::new(RecordingSink::new()) // or a per-charger file log
///     }));
/// let depot = factory.build_depot(load_chargers_csv(path)?);
/// ```
pub struct StationFactory {
    strategy: StrategyFactory,
    sink:     Option<SinkFactory>,
}

impl StationFactory {
    /// Create a factory with the given strategy recipe.
    pub fn new(strategy: StrategyFactory) -> Self {
        Self { strategy, sink: None }
    }

    /// Constant-power charging at each charger's rated power, to full.
    pub fn constant_power() -> Self {
        Self::new(Box::new(|charger| {
            Box::new(ConstantPowerStrategy::new(charger.rated_power_w))
        }))
    }

    /// Fast-then-slow charging at each charger's rated power.
    pub fn fast_then_slow() -> Self {
        Self::new(Box::new(|charger| {
            Box::new(FastThenSlowStrategy::new(charger.rated_power_w))
        }))
    }

    /// Also bind an event sink to every created scheduler.
    pub fn with_sink(mut self, sink: SinkFactory) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Create one scheduler for `charger`.
    pub fn create(&self, charger: ChargerSpec) -> ChargingScheduler {
        let strategy = (self.strategy)(&charger);
        let mut scheduler = ChargingScheduler::new(charger, strategy);
        if let Some(make_sink) = &self.sink {
            let sink = make_sink(scheduler.charger());
            scheduler.init_events_handling(sink);
        }
        scheduler
    }

    /// Create a [`Depot`] with one station per charger spec.
    pub fn build_depot<I>(&self, chargers: I) -> Depot
    where
        I: IntoIterator<Item = ChargerSpec>,
    {
        let mut depot = Depot::new();
        for charger in chargers {
            depot.insert(self.create(charger));
        }
        depot
    }
}
