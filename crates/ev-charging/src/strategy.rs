//! The `ChargingStrategy` trait — the policy extension point of the scheduler.

use ev_fleet::ElectricVehicle;

/// Tolerance, in joules, under which a remaining gap to the target counts as
/// reached.  Guards the completion signal against float rounding.
const COMPLETION_EPS_J: f64 = 1e-6;

/// What one strategy invocation decided for one vehicle and one period.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChargeOutcome {
    /// Energy to deliver this period, joules.  The scheduler clamps negative
    /// values to zero rather than propagating them.
    pub energy_j: f64,

    /// The strategy's terminal signal: `true` ends the session this tick and
    /// frees the plug.  The scheduler does not second-guess this — a full
    /// battery without `complete` stays plugged.
    pub complete: bool,
}

/// Pluggable charging policy.
///
/// One strategy instance is bound per scheduler at construction time (via
/// [`StationFactory`][crate::StationFactory]) and is read-only from the
/// scheduler's perspective.  Implementations must be total for any vehicle
/// the scheduler can present — only tracked, plugged vehicles are ever
/// passed.
///
/// `Send` so a scheduler owning the strategy can be moved to a worker thread
/// when chargers are driven in parallel.
pub trait ChargingStrategy: Send {
    /// Energy to deliver to `vehicle` for `elapsed_secs` seconds of plugged
    /// time ending at `now`, and whether the session is finished.
    ///
    /// `elapsed_secs` is the vehicle's plugged share of the tick — less than
    /// the full charge period right after admission.  `now` is provided for
    /// time-varying policies (e.g. price-aware charging); the shipped
    /// strategies ignore it.
    fn energy_for(&self, vehicle: &ElectricVehicle, elapsed_secs: f64, now: f64) -> ChargeOutcome;
}

// ── Constant power ────────────────────────────────────────────────────────────

/// Charges at constant power — the charger's rated power capped by the
/// vehicle's own limit — until a target state-of-charge fraction is reached.
pub struct ConstantPowerStrategy {
    rated_power_w: f64,
    target_soc:    f64,
}

impl ConstantPowerStrategy {
    /// Charge to full at `rated_power_w` watts.
    pub fn new(rated_power_w: f64) -> Self {
        Self {
            rated_power_w,
            target_soc: 1.0,
        }
    }

    /// Stop (and signal completion) at `target_soc` of capacity instead of
    /// full — e.g. `0.8` for battery-friendly depot charging.
    pub fn with_target_soc(mut self, target_soc: f64) -> Self {
        self.target_soc = target_soc.clamp(0.0, 1.0);
        self
    }
}

impl ChargingStrategy for ConstantPowerStrategy {
    fn energy_for(&self, vehicle: &ElectricVehicle, elapsed_secs: f64, _now: f64) -> ChargeOutcome {
        let power_w = self.rated_power_w.min(vehicle.max_charge_power_w);
        let target_j = self.target_soc * vehicle.battery.capacity_j();
        let remaining = (target_j - vehicle.battery.charge_j()).max(0.0);
        let energy_j = (power_w * elapsed_secs.max(0.0)).min(remaining);

        ChargeOutcome {
            energy_j,
            complete: remaining - energy_j <= COMPLETION_EPS_J,
        }
    }
}

// ── Fast-then-slow ────────────────────────────────────────────────────────────

/// Full power below a state-of-charge knee, then a linear power taper down to
/// a floor as the battery approaches full.  Completes at full.
///
/// Power is sampled once per tick at the tick-start state of charge; with the
/// short periods typical of the outer simulation the discretization error is
/// negligible against the curve's own approximation.
pub struct FastThenSlowStrategy {
    rated_power_w:  f64,
    knee_soc:       f64,
    floor_fraction: f64,
}

impl FastThenSlowStrategy {
    /// Default curve: full power up to 80 % SoC, tapering to 10 % of rated
    /// power at full.
    pub fn new(rated_power_w: f64) -> Self {
        Self {
            rated_power_w,
            knee_soc:       0.8,
            floor_fraction: 0.1,
        }
    }

    /// Override the taper: full power below `knee_soc`, linear descent to
    /// `floor_fraction` of the power cap at 100 % SoC.
    pub fn with_taper(mut self, knee_soc: f64, floor_fraction: f64) -> Self {
        self.knee_soc = knee_soc.clamp(0.0, 1.0);
        self.floor_fraction = floor_fraction.clamp(0.0, 1.0);
        self
    }

    fn power_w(&self, vehicle: &ElectricVehicle) -> f64 {
        let cap = self.rated_power_w.min(vehicle.max_charge_power_w);
        let soc = vehicle.battery.soc();
        if soc <= self.knee_soc {
            return cap;
        }
        let span = (1.0 - self.knee_soc).max(f64::EPSILON);
        let frac = 1.0 - (1.0 - self.floor_fraction) * ((soc - self.knee_soc) / span);
        cap * frac.max(self.floor_fraction)
    }
}

impl ChargingStrategy for FastThenSlowStrategy {
    fn energy_for(&self, vehicle: &ElectricVehicle, elapsed_secs: f64, _now: f64) -> ChargeOutcome {
        let remaining = vehicle.battery.free_j();
        let energy_j = (self.power_w(vehicle) * elapsed_secs.max(0.0)).min(remaining);

        ChargeOutcome {
            energy_j,
            complete: remaining - energy_j <= COMPLETION_EPS_J,
        }
    }
}
