//! Battery state: capacity and state of charge, both in joules.
//!
//! The battery never stores more than its capacity and never goes below
//! zero; `store` and `draw` clamp and report the amount actually moved so
//! callers can account for energy without re-deriving the clamp.

/// A traction battery with a fixed capacity and a current state of charge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct Battery {
    capacity_j: f64,
    charge_j:   f64,
}

impl Battery {
    /// Create a battery with `capacity_j` joules of capacity holding
    /// `initial_j` joules, clamped into `[0, capacity_j]`.
    pub fn new(capacity_j: f64, initial_j: f64) -> Self {
        let capacity_j = capacity_j.max(0.0);
        Self {
            capacity_j,
            charge_j: initial_j.clamp(0.0, capacity_j),
        }
    }

    #[inline]
    pub fn capacity_j(&self) -> f64 {
        self.capacity_j
    }

    /// Current state of charge in joules.
    #[inline]
    pub fn charge_j(&self) -> f64 {
        self.charge_j
    }

    /// State of charge as a fraction of capacity in `[0, 1]`.
    #[inline]
    pub fn soc(&self) -> f64 {
        if self.capacity_j <= 0.0 {
            return 0.0;
        }
        self.charge_j / self.capacity_j
    }

    /// Headroom to full, in joules.
    #[inline]
    pub fn free_j(&self) -> f64 {
        self.capacity_j - self.charge_j
    }

    /// Add up to `energy_j` joules, clamping at capacity.
    ///
    /// Returns the amount actually stored.  Non-positive input stores nothing.
    pub fn store(&mut self, energy_j: f64) -> f64 {
        let stored = energy_j.clamp(0.0, self.free_j());
        self.charge_j += stored;
        stored
    }

    /// Remove up to `energy_j` joules, clamping at empty.
    ///
    /// Returns the amount actually drawn.  Used by the outer simulation while
    /// the vehicle drives; never called during a charging session.
    pub fn draw(&mut self, energy_j: f64) -> f64 {
        let drawn = energy_j.clamp(0.0, self.charge_j);
        self.charge_j -= drawn;
        drawn
    }
}
