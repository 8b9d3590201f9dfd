//! Headless reactor driver: step a run to completion and report front speeds.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use reactor_engine::{stepper, CouplingMode, ReactorConfig, RunState};

#[derive(Parser, Debug)]
#[command(name = "reactor")]
#[command(version)]
#[command(about = "Explicit 2D exothermic reactor simulation", long_about = None)]
struct Args {
    /// TOML configuration file; reference values are used for absent keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks even if the corner has not reacted
    #[arg(long, default_value_t = 200_000)]
    max_steps: u64,

    /// Diffuse concentration and product as well as heat
    #[arg(long)]
    species_diffusion: bool,

    /// Log a progress line every N ticks (0 disables)
    #[arg(long, default_value_t = 1_000)]
    report_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    let mut cfg = match &args.config {
        Some(path) => ReactorConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReactorConfig::default(),
    };
    if args.species_diffusion {
        cfg.coupling = CouplingMode::HeatAndSpecies;
    }

    let mut state = RunState::initialize(cfg).context("initializing reactor")?;
    let corner = (state.config().width - 1, state.config().height - 1);

    let report_every = args.report_every;
    stepper::run_until_complete(&mut state, args.max_steps, |state, out| {
        for e in &out.events {
            info!("[probe] {} speed = {:.6e} m/s at t = {} s", e.name, e.speed_m_per_s, e.elapsed_s);
        }
        if report_every > 0 && out.step_idx % report_every == 0 {
            if let Ok(c) = state.cell_at(corner.0, corner.1) {
                info!(
                    "[run] step={} t={} s corner_product={:.4} peak_T={:.1} K",
                    out.step_idx,
                    out.elapsed_s,
                    c.product,
                    state.grid().max_temperature()
                );
            }
        }
    })
    .with_context(|| format!("stepping after {} ticks", state.clock().step_idx))?;

    let totals = state.grid().totals();
    let pending: Vec<&str> =
        state.probes().iter().filter(|p| !p.triggered).map(|p| p.name.as_str()).collect();
    if state.is_complete() {
        info!("[run] complete after {} steps (t = {} s)", state.clock().step_idx, state.elapsed_time());
    } else {
        warn!("[run] stopped at max_steps={} before the corner reacted", args.max_steps);
    }
    if !pending.is_empty() {
        warn!("[run] probes never reached: {}", pending.join(", "));
    }
    info!(
        "[run] totals: reactant={:.4} product={:.4} mean_T={:.2} K",
        totals.concentration,
        totals.product,
        totals.temperature / state.grid().len() as f64
    );
    Ok(())
}
