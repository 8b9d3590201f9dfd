//! Run state: double-buffered grid, clock, probes, and phase.

use log::{info, warn};

use crate::{
    cell::Cell,
    config::ReactorConfig,
    error::ReactorError,
    grid::Grid,
    probes::{Probe, ProbeTracker},
    stability,
};

/// Simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    /// Simulated time since seeding (s).
    pub elapsed_s: f64,
    /// Completed ticks.
    pub step_idx: u64,
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Grid built and spark applied; no tick yet.
    Seeded,
    /// At least one tick applied; termination not reached.
    Stepping,
    /// Corner reached; further ticks are no-ops.
    Completed,
    /// A tick failed; further ticks are rejected.
    Aborted,
}

/// Everything a run carries between ticks.
#[derive(Debug, Clone)]
pub struct RunState {
    pub(crate) config: ReactorConfig,
    /// Two grids; `buffers[generation % 2]` is active.
    pub(crate) buffers: [Grid; 2],
    pub(crate) generation: u64,
    pub(crate) clock: Clock,
    pub(crate) probes: ProbeTracker,
    pub(crate) phase: Phase,
}

/// Validate `config` and seed a run. See [`RunState::initialize`].
pub fn initialize(config: ReactorConfig) -> Result<RunState, ReactorError> {
    RunState::initialize(config)
}

impl RunState {
    /// Validate `config`, fill the slab at the initial state, and heat the spark cell.
    pub fn initialize(config: ReactorConfig) -> Result<Self, ReactorError> {
        config.validate()?;

        let base = Cell::new(config.initial_concentration, config.initial_temperature);
        let mut grid = Grid::filled(config.width, config.height, base)?;
        grid.get_mut(config.spark.x, config.spark.y)?.temperature = config.spark_temperature;

        let report = stability::assess(&config);
        if !report.heat_stable() {
            warn!(
                "[stability] heat stencil number {:.3} > {:.1}; explicit update may oscillate",
                report.heat,
                stability::MAX_STABLE_NUMBER
            );
        }
        if !report.species_stable() {
            warn!(
                "[stability] species stencil number {:.3} > {:.1}; explicit update may oscillate",
                report.species,
                stability::MAX_STABLE_NUMBER
            );
        }
        info!(
            "[init] {}x{} cells, dt={} s, L={} m, C_voxel={:.4} J/K, spark=({}, {}) at {} K, {} probes, coupling={:?}",
            config.width,
            config.height,
            config.time_step,
            config.length_step,
            config.cell_heat_capacity(),
            config.spark.x,
            config.spark.y,
            config.spark_temperature,
            config.probes.len(),
            config.coupling
        );

        let probes = ProbeTracker::new(&config);
        Ok(Self {
            buffers: [grid.clone(), grid],
            config,
            generation: 0,
            clock: Clock::default(),
            probes,
            phase: Phase::Seeded,
        })
    }

    /// The configuration this run was seeded with.
    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    /// The grid as of the last completed tick.
    pub fn grid(&self) -> &Grid {
        &self.buffers[self.active_index()]
    }

    /// Bounds-checked read of one cell of the active grid.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<Cell, ReactorError> {
        self.grid().get(x, y).copied()
    }

    /// Simulated time since seeding (s).
    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed_s
    }

    /// Clock snapshot.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Number of buffer swaps performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the termination predicate has fired.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Probe records with their latch state.
    pub fn probes(&self) -> &[Probe] {
        self.probes.probes()
    }

    #[inline]
    pub(crate) fn active_index(&self) -> usize {
        (self.generation % 2) as usize
    }

    /// Direct write access to the active grid, for seeding custom initial
    /// conditions before the first tick.
    pub fn grid_mut(&mut self) -> &mut Grid {
        let i = self.active_index();
        &mut self.buffers[i]
    }
}
