//! Second-order Arrhenius kinetics for a single voxel.
//!
//! Rate constant: k = A · exp(−Ea / (R·T))
//! Converted per tick: Δ = c² · k · Δt, clamped to the reactant on hand.
//! Heat released: ΔT = −ΔH · (Δ · V) / C_voxel

use crate::{cell::Cell, config::ReactorConfig};

/// Gas constant (J/(mol·K)) as used by the reference rate law.
pub const GAS_CONSTANT: f64 = 8.31;

/// Arrhenius rate constant at `temperature_k`. Requires `temperature_k > 0`.
pub fn rate_constant(temperature_k: f64, cfg: &ReactorConfig) -> f64 {
    cfg.pre_exponential_factor * (-cfg.activation_energy / (temperature_k * GAS_CONSTANT)).exp()
}

/// Advance one cell by one reaction step in place and return the converted
/// concentration Δ (mol/dm^3).
///
/// Caller guarantees `temperature > 0` and `concentration >= 0`; otherwise the
/// result is non-finite and is caught by the stepper's finiteness check.
pub fn apply_kinetics(cell: &mut Cell, cfg: &ReactorConfig) -> f64 {
    let k = rate_constant(cell.temperature, cfg);
    let mut converted = cell.concentration * cell.concentration * k * cfg.time_step;
    // Only limiter in the scheme: a cell cannot consume more than it holds.
    if converted > cell.concentration {
        converted = cell.concentration;
    }
    cell.concentration -= converted;
    cell.product += converted;
    let moles = converted * cfg.cell_volume_dm3();
    cell.temperature += (-cfg.reaction_enthalpy * moles) / cfg.cell_heat_capacity();
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_grows_with_temperature() {
        let cfg = ReactorConfig::default();
        let cold = rate_constant(298.0, &cfg);
        let hot = rate_constant(9000.0, &cfg);
        assert!(cold > 0.0);
        assert!(hot > cold * 1e10);
        assert!(hot < cfg.pre_exponential_factor);
    }

    #[test]
    fn gas_constant_literal_is_preserved() {
        assert_eq!(GAS_CONSTANT, 8.31);
        let cfg = ReactorConfig::default();
        let expected = 0.001 * (-80_000.0f64 / (9000.0 * 8.31)).exp();
        assert_eq!(rate_constant(9000.0, &cfg), expected);
    }

    #[test]
    fn empty_cell_is_unchanged() {
        let cfg = ReactorConfig::default();
        let mut c = Cell::new(0.0, 5000.0);
        let d = apply_kinetics(&mut c, &cfg);
        assert_eq!(d, 0.0);
        assert_eq!(c, Cell::new(0.0, 5000.0));
    }
}
