//! Explicit-scheme stability diagnostics for the coupling stencil.
//!
//! For weights a (axis) and d (diagonal) the update is
//! next = (1 − 4a − 4d)·self + Σ weighted neighbors, which stays a convex
//! combination (no overshoot, no sign flips) while S = 4a + 4d ≤ 1.
//! The engine never rescales Δt; these numbers are reported only.

use crate::{config::ReactorConfig, stencil::CouplingCoefficients};

/// Largest stability number for which the explicit update is monotone.
pub const MAX_STABLE_NUMBER: f64 = 1.0;

/// Stability number S = 4a + 4d of a coefficient set.
pub fn stability_number(c: &CouplingCoefficients) -> f64 {
    4.0 * c.axis + 4.0 * c.diagonal
}

/// Stability numbers for every transported quantity of a configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityReport {
    /// S for heat conduction.
    pub heat: f64,
    /// S for species diffusion.
    pub species: f64,
}

impl StabilityReport {
    /// True when heat conduction stays monotone.
    pub fn heat_stable(&self) -> bool {
        self.heat <= MAX_STABLE_NUMBER
    }

    /// True when species diffusion stays monotone.
    pub fn species_stable(&self) -> bool {
        self.species <= MAX_STABLE_NUMBER
    }
}

/// Compute stability numbers for `cfg`.
pub fn assess(cfg: &ReactorConfig) -> StabilityReport {
    StabilityReport {
        heat: stability_number(&CouplingCoefficients::heat(cfg)),
        species: stability_number(&CouplingCoefficients::species(cfg)),
    }
}
