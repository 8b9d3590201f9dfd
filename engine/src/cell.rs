//! Per-cell state carried by every voxel of the reactor slab.

use serde::{Deserialize, Serialize};

/// One voxel: reactant, accumulated product, and temperature.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Reactant concentration (mol/dm^3), never negative.
    pub concentration: f64,
    /// Product concentration (mol/dm^3); grows only through reaction.
    pub product: f64,
    /// Temperature (K).
    pub temperature: f64,
}

impl Cell {
    /// Fresh cell holding only reactant.
    pub fn new(concentration: f64, temperature: f64) -> Self {
        Self { concentration, product: 0.0, temperature }
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.concentration.is_finite() && self.product.is_finite() && self.temperature.is_finite()
    }

    /// True when the cell is finite, above 0 K, and holds no negative species.
    pub fn is_physical(&self) -> bool {
        self.is_finite() && self.temperature > 0.0 && self.concentration >= 0.0 && self.product >= 0.0
    }
}
