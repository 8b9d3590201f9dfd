//! Eight-neighbor weighted-difference coupling (heat conduction and species
//! diffusion share the same stencil form).
//!
//! next = self + Σ_axis a·(n − self) + Σ_diag d·(n − self)
//!
//! a = L² · (P / L) · Δt / C
//! d = L² · (P / (√2·L)) · Δt / C
//!
//! P is the thermal conductivity with C the voxel heat capacity for
//! temperature, or the diffusion constant with C = 1 for species. Neighbors
//! outside the grid contribute nothing (no-flux boundary).

use std::f64::consts::SQRT_2;

use crate::{
    cell::Cell,
    config::ReactorConfig,
    error::ReactorError,
    grid::{Grid, NeighborKind},
};

/// Which cell field a stencil evaluation reads and produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Temperature (K)
    Temperature,
    /// Reactant concentration
    Concentration,
    /// Product concentration
    Product,
}

impl Field {
    /// Read this field from a cell.
    #[inline]
    pub fn read(self, cell: &Cell) -> f64 {
        match self {
            Field::Temperature => cell.temperature,
            Field::Concentration => cell.concentration,
            Field::Product => cell.product,
        }
    }
}

/// Transfer coefficients for one transported quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouplingCoefficients {
    /// Weight for edge-sharing neighbors.
    pub axis: f64,
    /// Weight for corner-sharing neighbors.
    pub diagonal: f64,
}

impl CouplingCoefficients {
    /// Build from a transport property and the divisor turning flux into a value change.
    pub fn from_property(property: f64, length_step: f64, time_step: f64, capacity: f64) -> Self {
        let area = length_step * length_step;
        Self {
            axis: area * (property / length_step) * time_step / capacity,
            diagonal: area * (property / (SQRT_2 * length_step)) * time_step / capacity,
        }
    }

    /// Heat conduction coefficients.
    pub fn heat(cfg: &ReactorConfig) -> Self {
        Self::from_property(
            cfg.thermal_conductivity,
            cfg.length_step,
            cfg.time_step,
            cfg.cell_heat_capacity(),
        )
    }

    /// Species diffusion coefficients (concentration and product).
    pub fn species(cfg: &ReactorConfig) -> Self {
        Self::from_property(cfg.diffusion_coefficient, cfg.length_step, cfg.time_step, 1.0)
    }

    #[inline]
    fn weight(&self, kind: NeighborKind) -> f64 {
        match kind {
            NeighborKind::Axis => self.axis,
            NeighborKind::Diagonal => self.diagonal,
        }
    }
}

/// Next value of `field` at `(x, y)`, reading only `grid`.
pub fn coupled_value(
    grid: &Grid,
    x: usize,
    y: usize,
    field: Field,
    coeffs: &CouplingCoefficients,
) -> Result<f64, ReactorError> {
    let own = field.read(grid.get(x, y)?);
    Ok(weighted_update(grid, x, y, own, field, coeffs))
}

/// [`coupled_value`] for coordinates the caller already iterates in bounds.
#[inline]
pub(crate) fn coupled_value_in_bounds(
    grid: &Grid,
    x: usize,
    y: usize,
    field: Field,
    coeffs: &CouplingCoefficients,
) -> f64 {
    weighted_update(grid, x, y, field.read(grid.at(x, y)), field, coeffs)
}

fn weighted_update(
    grid: &Grid,
    x: usize,
    y: usize,
    own: f64,
    field: Field,
    coeffs: &CouplingCoefficients,
) -> f64 {
    let mut next = own;
    for n in grid.neighbors(x, y) {
        next += coeffs.weight(n.kind) * (field.read(grid.at(n.x, n.y)) - own);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_axis_over_sqrt2() {
        let c = CouplingCoefficients::heat(&ReactorConfig::default());
        assert!((c.axis / c.diagonal - SQRT_2).abs() < 1e-12);
        // 0.01² · 620 · 0.5 / 2
        assert!((c.axis - 0.0155).abs() < 1e-12);
    }

    #[test]
    fn uniform_field_is_a_fixed_point() -> Result<(), ReactorError> {
        let g = Grid::filled(5, 5, Cell::new(3.0, 412.0))?;
        let c = CouplingCoefficients::heat(&ReactorConfig::default());
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(coupled_value(&g, x, y, Field::Temperature, &c)?, 412.0);
                assert_eq!(coupled_value_in_bounds(&g, x, y, Field::Temperature, &c), 412.0);
            }
        }
        Ok(())
    }
}
