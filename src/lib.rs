//! Monte Carlo simulation of the 2D Ising model.
//!
//! The core is a single-spin-flip evolution engine over an L×L periodic
//! lattice, with Glauber and Metropolis acceptance rules and an optional
//! homogeneous external field. A run owns its seeded random stream, so
//! identical parameters always reproduce the same trajectory.

pub mod config;
pub mod lattice;
pub mod output;
pub mod render;
pub mod simulation;
pub mod sweep;

pub use config::{Algorithm, SimParams};
pub use lattice::Lattice;
pub use render::{frame, NullRenderer, Renderer, TermRenderer};
pub use simulation::{run, RunResult};
