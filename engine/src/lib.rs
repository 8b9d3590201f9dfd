//! Reactor engine: a 2D slab undergoing an exothermic, second-order,
//! Arrhenius-activated reaction coupled with heat conduction.
//!
//! One tick is a local reaction pass followed by a Moore-stencil coupling
//! pass into a second buffer; the driver pulls ticks through [`stepper::step`]
//! and reads cells and probe events back.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod kinetics;
pub mod probes;
pub mod stability;
pub mod state;
pub mod stencil;
pub mod stepper;

pub use cell::Cell;
pub use config::{CouplingMode, GridCoord, ProbeSite, ReactorConfig};
pub use error::ReactorError;
pub use grid::{Grid, GridTotals, Neighbor, NeighborKind};
pub use probes::{Probe, ProbeEvent};
pub use state::{initialize, Clock, Phase, RunState};
pub use stepper::{step, StepOutcome};

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver_like() {
        assert!(version().split('.').count() >= 3);
    }
}
