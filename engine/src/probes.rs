//! Reaction-front probes with one-shot latches, and the corner termination check.

use crate::{config::ReactorConfig, grid::Grid};

/// A fixed observation point.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    /// Position in the configured probe list.
    pub id: usize,
    /// Configured label.
    pub name: String,
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
    /// Set once the probe has reported; never cleared.
    pub triggered: bool,
}

/// Front arrival at a probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeEvent {
    /// Probe id (index into the configured list).
    pub probe_id: usize,
    /// Probe label.
    pub name: String,
    /// Spark-to-probe distance over elapsed time (m/s).
    pub speed_m_per_s: f64,
    /// Simulated time at crossing (s).
    pub elapsed_s: f64,
}

/// Latched probe set for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeTracker {
    probes: Vec<Probe>,
}

impl ProbeTracker {
    /// Build un-latched probes from the configured sites.
    pub fn new(cfg: &ReactorConfig) -> Self {
        let probes = cfg
            .probes
            .iter()
            .enumerate()
            .map(|(id, s)| Probe { id, name: s.name.clone(), x: s.x, y: s.y, triggered: false })
            .collect();
        Self { probes }
    }

    /// Probe records in configuration order.
    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// True once every probe has fired.
    pub fn all_triggered(&self) -> bool {
        self.probes.iter().all(|p| p.triggered)
    }

    /// Fire every un-latched probe whose product has reached the completion
    /// threshold. Probes are assumed in bounds (checked at configuration time).
    pub fn evaluate(
        &mut self,
        grid: &Grid,
        elapsed_s: f64,
        cfg: &ReactorConfig,
    ) -> Vec<ProbeEvent> {
        let threshold = cfg.initial_concentration * cfg.completion_threshold;
        let mut events = Vec::new();
        for p in self.probes.iter_mut().filter(|p| !p.triggered) {
            if grid.at(p.x, p.y).product >= threshold {
                let dx = p.x as f64 - cfg.spark.x as f64;
                let dy = p.y as f64 - cfg.spark.y as f64;
                let distance_m = dx.hypot(dy) * cfg.length_step;
                p.triggered = true;
                events.push(ProbeEvent {
                    probe_id: p.id,
                    name: p.name.clone(),
                    speed_m_per_s: distance_m / elapsed_s,
                    elapsed_s,
                });
            }
        }
        events
    }
}

/// True once the far corner holds at least `termination_fraction` of the
/// initial concentration as product.
pub fn corner_reached(grid: &Grid, cfg: &ReactorConfig) -> bool {
    let corner = grid.at(grid.width() - 1, grid.height() - 1);
    corner.product >= cfg.initial_concentration * cfg.termination_fraction
}
