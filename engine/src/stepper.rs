//! Reactor stepper: advance a run by one tick.

use log::{debug, error, info};
use rayon::prelude::*;

use crate::{
    cell::Cell,
    config::{CouplingMode, ReactorConfig},
    error::ReactorError,
    grid::Grid,
    kinetics::apply_kinetics,
    probes::{corner_reached, ProbeEvent},
    state::{Phase, RunState},
    stencil::{coupled_value_in_bounds, CouplingCoefficients, Field},
};

/// What one call to [`step`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// False when the run was already complete and nothing changed.
    pub advanced: bool,
    /// Tick count after the call.
    pub step_idx: u64,
    /// Simulated time after the call (s).
    pub elapsed_s: f64,
    /// Moles converted by the reaction pass across the grid.
    pub reacted_mol: f64,
    /// Probes that crossed their threshold on this tick, in configuration order.
    pub events: Vec<ProbeEvent>,
    /// True if the run is complete after this call.
    pub completed: bool,
}

/// Reaction pass: apply kinetics to every cell in place. Returns moles converted.
pub fn reaction_pass(grid: &mut Grid, cfg: &ReactorConfig) -> f64 {
    let width = grid.width();
    // Per-row sums collected in order so the total is reproducible.
    let row_sums: Vec<f64> = grid
        .cells_mut()
        .par_chunks_mut(width)
        .map(|row| row.iter_mut().map(|c| apply_kinetics(c, cfg)).sum::<f64>())
        .collect();
    row_sums.iter().sum::<f64>() * cfg.cell_volume_dm3()
}

/// Coupling pass: write every cell of `dst` from `src` only.
///
/// Temperature is always conducted; concentration and product are diffused
/// under [`CouplingMode::HeatAndSpecies`] and copied through otherwise.
pub fn coupling_pass(src: &Grid, dst: &mut Grid, cfg: &ReactorConfig) {
    debug_assert_eq!((src.width(), src.height()), (dst.width(), dst.height()));
    let heat = CouplingCoefficients::heat(cfg);
    let species = CouplingCoefficients::species(cfg);
    let mode = cfg.coupling;
    let width = src.width();
    dst.cells_mut().par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let temperature = coupled_value_in_bounds(src, x, y, Field::Temperature, &heat);
            *out = match mode {
                CouplingMode::HeatOnly => Cell { temperature, ..*src.at(x, y) },
                CouplingMode::HeatAndSpecies => Cell {
                    concentration: coupled_value_in_bounds(src, x, y, Field::Concentration, &species),
                    product: coupled_value_in_bounds(src, x, y, Field::Product, &species),
                    temperature,
                },
            };
        }
    });
}

/// Execute one tick. Order:
/// 1) reaction pass in place on the active buffer
/// 2) coupling pass from the active buffer into the secondary buffer
/// 3) swap (generation += 1)
/// 4) clock += dt
/// 5) probes
/// 6) corner termination check
///
/// A completed run returns an outcome with `advanced == false`. A non-finite
/// cell, a cell at or below 0 K, or a negative species value aborts the run
/// and every later call returns [`ReactorError::Aborted`].
pub fn step(state: &mut RunState) -> Result<StepOutcome, ReactorError> {
    match state.phase {
        Phase::Completed => {
            return Ok(StepOutcome {
                advanced: false,
                step_idx: state.clock.step_idx,
                elapsed_s: state.clock.elapsed_s,
                reacted_mol: 0.0,
                events: Vec::new(),
                completed: true,
            });
        }
        Phase::Aborted => return Err(ReactorError::Aborted),
        Phase::Seeded | Phase::Stepping => {}
    }

    let step_idx = state.clock.step_idx + 1;
    let active = state.active_index();
    let [b0, b1] = &mut state.buffers;
    let (src, dst) = if active == 0 { (b0, b1) } else { (b1, b0) };

    // 1) reaction
    let reacted_mol = reaction_pass(src, &state.config);

    // 2) coupling
    coupling_pass(src, dst, &state.config);
    if let Some((x, y)) = dst.first_non_physical() {
        state.phase = Phase::Aborted;
        let c = *dst.at(x, y);
        error!("[step] invalid cell at ({x}, {y}) on step {step_idx}: {c:?}; run aborted");
        return Err(if c.is_finite() {
            ReactorError::NonPhysical {
                x,
                y,
                step_idx,
                temperature: c.temperature,
                concentration: c.concentration,
                product: c.product,
            }
        } else {
            ReactorError::NonFinite { x, y, step_idx }
        });
    }

    // 3) swap, 4) clock
    state.generation += 1;
    state.clock.elapsed_s += state.config.time_step;
    state.clock.step_idx = step_idx;
    state.phase = Phase::Stepping;

    // 5) probes
    let grid = &state.buffers[state.active_index()];
    let events = state.probes.evaluate(grid, state.clock.elapsed_s, &state.config);
    for e in &events {
        debug!("[probe] {} crossed at t={} s (speed {:.6e} m/s)", e.name, e.elapsed_s, e.speed_m_per_s);
    }

    // 6) termination
    let completed = corner_reached(grid, &state.config);
    if completed {
        state.phase = Phase::Completed;
        info!("[step] corner reached on step {} at t={} s", step_idx, state.clock.elapsed_s);
    }
    debug!("[step] {} t={} s reacted={:.6e} mol", step_idx, state.clock.elapsed_s, reacted_mol);

    Ok(StepOutcome {
        advanced: true,
        step_idx,
        elapsed_s: state.clock.elapsed_s,
        reacted_mol,
        events,
        completed,
    })
}

/// Step until the run completes or `max_steps` ticks have been applied,
/// collecting every probe event in crossing order. `on_step` sees the state
/// and outcome after each advancing tick.
pub fn run_until_complete<F>(
    state: &mut RunState,
    max_steps: u64,
    mut on_step: F,
) -> Result<Vec<ProbeEvent>, ReactorError>
where
    F: FnMut(&RunState, &StepOutcome),
{
    let mut events = Vec::new();
    for _ in 0..max_steps {
        if state.is_complete() {
            break;
        }
        let outcome = step(state)?;
        on_step(state, &outcome);
        events.extend(outcome.events);
    }
    Ok(events)
}
