//! Error type shared by configuration, grid access, and stepping.

/// Errors surfaced by the reactor engine.
#[derive(thiserror::Error, Debug)]
pub enum ReactorError {
    /// A configuration value is outside its physical domain.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Offending field name
        field: &'static str,
        /// Human-readable constraint that failed
        reason: String,
    },
    /// A coordinate lies outside `[0,width) x [0,height)`.
    #[error("coordinate ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },
    /// A NaN or infinite value appeared in a cell during a tick.
    #[error("non-finite state at ({x}, {y}) on step {step_idx}")]
    NonFinite {
        /// Column of the first offending cell
        x: usize,
        /// Row of the first offending cell
        y: usize,
        /// Index of the tick that produced it
        step_idx: u64,
    },
    /// A finite but non-physical value (temperature at or below 0 K, or a
    /// negative concentration) appeared in a cell during a tick.
    #[error("non-physical state at ({x}, {y}) on step {step_idx}: T={temperature} K, c={concentration}, p={product}")]
    NonPhysical {
        /// Column of the first offending cell
        x: usize,
        /// Row of the first offending cell
        y: usize,
        /// Index of the tick that produced it
        step_idx: u64,
        /// Offending temperature (K)
        temperature: f64,
        /// Offending reactant concentration
        concentration: f64,
        /// Offending product concentration
        product: f64,
    },
    /// The run was aborted by an earlier error and cannot advance.
    #[error("run aborted; no further steps are possible")]
    Aborted,
    /// Wrapper for standard I/O errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML could not be parsed into a configuration
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ReactorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { field, reason: reason.into() }
    }
}
