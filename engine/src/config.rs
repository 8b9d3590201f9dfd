//! Run configuration for the reactor engine.
//!
//! A `ReactorConfig` is immutable for the duration of a run and is threaded
//! through every pass. Missing TOML fields fall back to the reference
//! deployment (100x100 slab, spark at the origin, five diagonal probes).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReactorError;

/// A grid coordinate (column `x`, row `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl GridCoord {
    /// Construct a coordinate.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A named observation point for front-arrival events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeSite {
    /// Label used in events and logs (e.g. "P1").
    pub name: String,
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl ProbeSite {
    /// Construct a named probe site.
    pub fn new(name: impl Into<String>, x: usize, y: usize) -> Self {
        Self { name: name.into(), x, y }
    }
}

/// Which fields the neighbor-coupling pass transports each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingMode {
    /// Only temperature is exchanged; species react locally and pass through.
    #[default]
    HeatOnly,
    /// Temperature, concentration, and product are all exchanged.
    HeatAndSpecies,
}

/// Immutable parameters for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    /// Thermal conductivity of the medium (W/(m·K)).
    pub thermal_conductivity: f64,
    /// Voxel edge length (m).
    pub length_step: f64,
    /// Simulated time per tick (s).
    pub time_step: f64,
    /// Reactor width in cells.
    pub width: usize,
    /// Reactor height in cells.
    pub height: usize,
    /// Specific heat capacity of the medium (J/(g·K)).
    pub specific_heat_capacity: f64,
    /// Density of the medium (g/dm^3).
    pub density: f64,
    /// Diffusion constant of reactant and product (m^2/s).
    pub diffusion_coefficient: f64,
    /// Enthalpy of reaction (J/mol); negative is exothermic.
    pub reaction_enthalpy: f64,
    /// Activation energy (J/mol).
    pub activation_energy: f64,
    /// Arrhenius pre-exponential factor.
    pub pre_exponential_factor: f64,
    /// Initial temperature of every cell (K).
    pub initial_temperature: f64,
    /// Temperature of the spark cell at seeding (K).
    pub spark_temperature: f64,
    /// Initial reactant concentration (mol/dm^3).
    pub initial_concentration: f64,
    /// Product fraction of the initial concentration at which a probe fires.
    pub completion_threshold: f64,
    /// Product fraction at the far corner that completes the run.
    pub termination_fraction: f64,
    /// Cell that receives the spark temperature; origin of front speeds.
    pub spark: GridCoord,
    /// Observation points, reported in crossing order.
    pub probes: Vec<ProbeSite>,
    /// Fields transported by the coupling pass.
    pub coupling: CouplingMode,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            thermal_conductivity: 6.2,
            length_step: 0.01,
            time_step: 0.5,
            width: 100,
            height: 100,
            specific_heat_capacity: 0.5,
            density: 4000.0,
            diffusion_coefficient: 1.0e-4,
            reaction_enthalpy: -849_000.0,
            activation_energy: 80_000.0,
            pre_exponential_factor: 0.001,
            initial_temperature: 298.0,
            spark_temperature: 9000.0,
            initial_concentration: 100.0,
            completion_threshold: 0.9,
            termination_fraction: 0.5,
            spark: GridCoord::new(0, 0),
            probes: vec![
                ProbeSite::new("P1", 17, 69),
                ProbeSite::new("P2", 32, 63),
                ProbeSite::new("P3", 50, 50),
                ProbeSite::new("P4", 63, 32),
                ProbeSite::new("P5", 69, 17),
            ],
            coupling: CouplingMode::HeatOnly,
        }
    }
}

impl ReactorConfig {
    /// Parse a configuration from TOML text. Absent keys keep reference values.
    pub fn from_toml_str(content: &str) -> Result<Self, ReactorError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ReactorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Voxel volume in dm^3 (edge cubed, m^3 -> dm^3).
    pub fn cell_volume_dm3(&self) -> f64 {
        self.length_step * self.length_step * self.length_step * 1000.0
    }

    /// Joules needed to raise one voxel by 1 K.
    pub fn cell_heat_capacity(&self) -> f64 {
        self.cell_volume_dm3() * self.density * self.specific_heat_capacity
    }

    /// Reject any value that would make the rate law or stencil ill-defined.
    pub fn validate(&self) -> Result<(), ReactorError> {
        let finite = [
            ("thermal_conductivity", self.thermal_conductivity),
            ("length_step", self.length_step),
            ("time_step", self.time_step),
            ("specific_heat_capacity", self.specific_heat_capacity),
            ("density", self.density),
            ("diffusion_coefficient", self.diffusion_coefficient),
            ("reaction_enthalpy", self.reaction_enthalpy),
            ("activation_energy", self.activation_energy),
            ("pre_exponential_factor", self.pre_exponential_factor),
            ("initial_temperature", self.initial_temperature),
            ("spark_temperature", self.spark_temperature),
            ("initial_concentration", self.initial_concentration),
            ("completion_threshold", self.completion_threshold),
            ("termination_fraction", self.termination_fraction),
        ];
        for (field, v) in finite {
            if !v.is_finite() {
                return Err(ReactorError::invalid(field, format!("must be finite (got {v})")));
            }
        }

        let positive = [
            ("length_step", self.length_step),
            ("time_step", self.time_step),
            ("specific_heat_capacity", self.specific_heat_capacity),
            ("density", self.density),
            ("initial_temperature", self.initial_temperature),
            ("spark_temperature", self.spark_temperature),
        ];
        for (field, v) in positive {
            if v <= 0.0 {
                return Err(ReactorError::invalid(field, format!("must be > 0 (got {v})")));
            }
        }

        let non_negative = [
            ("thermal_conductivity", self.thermal_conductivity),
            ("diffusion_coefficient", self.diffusion_coefficient),
            ("pre_exponential_factor", self.pre_exponential_factor),
            ("initial_concentration", self.initial_concentration),
        ];
        for (field, v) in non_negative {
            if v < 0.0 {
                return Err(ReactorError::invalid(field, format!("must be >= 0 (got {v})")));
            }
        }

        for (field, v) in [
            ("completion_threshold", self.completion_threshold),
            ("termination_fraction", self.termination_fraction),
        ] {
            if v <= 0.0 || v > 1.0 {
                return Err(ReactorError::invalid(field, format!("must lie in (0, 1] (got {v})")));
            }
        }

        if self.width == 0 {
            return Err(ReactorError::invalid("width", "must be at least 1 cell"));
        }
        if self.height == 0 {
            return Err(ReactorError::invalid("height", "must be at least 1 cell"));
        }
        // Heat capacity is a product of validated positives but can still underflow.
        if self.cell_heat_capacity() <= 0.0 {
            return Err(ReactorError::invalid("cell_heat_capacity", "must be > 0"));
        }

        self.check_in_bounds(self.spark.x, self.spark.y)?;
        for p in &self.probes {
            self.check_in_bounds(p.x, p.y)?;
        }
        Ok(())
    }

    fn check_in_bounds(&self, x: usize, y: usize) -> Result<(), ReactorError> {
        if x >= self.width || y >= self.height {
            return Err(ReactorError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_heat_capacity_is_two_joules_per_kelvin() {
        let cfg = ReactorConfig::default();
        assert!((cfg.cell_volume_dm3() - 1.0e-3).abs() < 1e-15);
        assert!((cfg.cell_heat_capacity() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn partial_toml_keeps_reference_values() -> Result<(), ReactorError> {
        let cfg = ReactorConfig::from_toml_str("width = 8\nheight = 4\nprobes = []\n")?;
        assert_eq!(cfg.width, 8);
        assert_eq!(cfg.height, 4);
        assert!(cfg.probes.is_empty());
        assert_eq!(cfg.time_step, 0.5);
        assert_eq!(cfg.coupling, CouplingMode::HeatOnly);
        Ok(())
    }

    #[test]
    fn coupling_mode_uses_snake_case() -> Result<(), ReactorError> {
        let cfg = ReactorConfig::from_toml_str("coupling = \"heat_and_species\"\n")?;
        assert_eq!(cfg.coupling, CouplingMode::HeatAndSpecies);
        Ok(())
    }
}
