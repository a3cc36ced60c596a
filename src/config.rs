use validator::{Validate, ValidationError};

use crate::sweep::{self, Acceptance};

/// Single-spin-flip acceptance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Glauber,
    Metropolis,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Glauber => "glauber",
            Self::Metropolis => "metropolis",
        }
    }

    /// Resolve the algorithm to its acceptance function once, before the
    /// sweep loop, so no per-trial dispatch on the algorithm name remains.
    pub fn acceptance(self) -> Acceptance {
        match self {
            Self::Glauber => sweep::glauber,
            Self::Metropolis => sweep::metropolis,
        }
    }
}

impl TryFrom<&str> for Algorithm {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "glauber" => Ok(Self::Glauber),
            "metropolis" => Ok(Self::Metropolis),
            _ => Err(format!(
                "unknown algorithm '{s}', expected 'glauber' or 'metropolis'"
            )),
        }
    }
}

fn validate_params(params: &SimParams) -> Result<(), ValidationError> {
    if params.length < 1 {
        return Err(ValidationError::new("length must be >= 1"));
    }
    if params.reduced_temperature <= 0.0 {
        return Err(ValidationError::new(
            "reduced_temperature must be greater than zero",
        ));
    }
    if params.interaction == 0.0 {
        return Err(ValidationError::new("interaction must be nonzero"));
    }
    if !(-1.0..=1.0).contains(&params.initial_magnetization) {
        return Err(ValidationError::new(
            "initial_magnetization must be in [-1, 1]",
        ));
    }
    Ok(())
}

/// Immutable parameters for one simulation run.
///
/// β is a derived quantity, β = 1/(J·T*). The effective coupling entering
/// the energy change is 1/(β·T*); both are computed here once and passed
/// explicitly into the sweep code, never re-derived per trial.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_params"))]
pub struct SimParams {
    /// Lattice length L (the system has L×L spins).
    pub length: usize,
    /// Number of Monte Carlo sweeps K (each sweep is L² trial flips).
    pub sweeps: usize,
    /// Reduced temperature T* = 1/(J·β), must be positive.
    pub reduced_temperature: f64,
    /// External homogeneous magnetic field h.
    pub field: f64,
    /// Pair interaction strength J, must be nonzero.
    pub interaction: f64,
    /// Target initial magnetization m0 in [-1, 1].
    pub initial_magnetization: f64,
    pub algorithm: Algorithm,
    pub seed: u64,
}

impl SimParams {
    /// Inverse temperature β = 1/(J·T*).
    pub fn beta(&self) -> f64 {
        1.0 / (self.interaction * self.reduced_temperature)
    }

    /// Effective coupling 1/(β·T*) used in the energy-change term.
    pub fn effective_coupling(&self) -> f64 {
        1.0 / (self.beta() * self.reduced_temperature)
    }

    /// Probability of initializing a cell as spin up: p = (m0 + 1)/2.
    pub fn up_probability(&self) -> f64 {
        (self.initial_magnetization + 1.0) / 2.0
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            length: 40,
            sweeps: 400,
            reduced_temperature: 1.0,
            field: 0.0,
            interaction: 1.0,
            initial_magnetization: 0.0,
            algorithm: Algorithm::Glauber,
            seed: 1997,
        }
    }
}
