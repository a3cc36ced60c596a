//! Command-line interface for the 2D Ising model Monte Carlo simulation.

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use ising_mc::render::{frame, NullRenderer, Renderer, TermRenderer};
use ising_mc::{output, simulation, Algorithm, RunResult, SimParams};

#[derive(Parser, Debug)]
#[command(name = "ising-mc", version, about = "Monte Carlo simulation of the 2D Ising model")]
struct Cli {
    /// Seed for the random number generator.
    #[arg(short, long, default_value_t = 1997)]
    seed: u64,

    /// Length L of the LxL spin lattice.
    #[arg(short = 'L', long, default_value_t = 40)]
    length: usize,

    /// Reduced temperature T* = 1/(J*beta), must be positive.
    #[arg(short = 'T', long = "temperature-reduced", default_value_t = 1.0)]
    temperature_reduced: f64,

    /// External homogeneous magnetic field h.
    #[arg(short = 'f', long = "external-magnetic-field", default_value_t = 0.0)]
    external_magnetic_field: f64,

    /// Interaction J between a pair of spins, must be nonzero.
    #[arg(short = 'J', long, default_value_t = 1.0)]
    interaction: f64,

    /// Number of Monte Carlo steps (sweeps) K.
    #[arg(short = 'K', long = "steps", default_value_t = 400)]
    steps: usize,

    /// Initial magnetization m0 in [-1, 1].
    #[arg(short = 'm', long = "initial-magnetization", default_value_t = 0.0)]
    initial_magnetization: f64,

    /// Acceptance rule: 'glauber' or 'metropolis'.
    #[arg(short, long, default_value = "glauber")]
    algorithm: String,

    /// Show the evolving lattice in the terminal. The optional value is a
    /// pair of characters for spin up and spin down.
    #[arg(short, long, value_name = "MARKERS", num_args = 0..=1, default_missing_value = " \u{2588}")]
    visualization: Option<String>,

    /// Save the final spin configuration to this directory.
    #[arg(long = "save-configuration", value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    save_configuration: Option<PathBuf>,

    /// Save the magnetization trajectory to this directory.
    #[arg(long = "save-magnetization", value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    save_magnetization: Option<PathBuf>,
}

/// Split a marker argument into (up, down); a single character is paired
/// with the default down marker (full block).
fn parse_markers(arg: &str) -> (char, char) {
    let mut chars = arg.chars();
    let up = chars.next().unwrap_or(' ');
    let down = chars.next().unwrap_or('\u{2588}');
    (up, down)
}

/// File stem encoding the run parameters, as in
/// `L40Tred1h0J1K400m0glauber lattice`.
fn file_stem(params: &SimParams, kind: &str) -> String {
    format!(
        "L{}Tred{}h{}J{}K{}m{}{} {}",
        params.length,
        params.reduced_temperature,
        params.field,
        params.interaction,
        params.sweeps,
        params.initial_magnetization,
        params.algorithm.name(),
        kind,
    )
}

fn run_with_progress(params: &SimParams) -> Result<RunResult, String> {
    // one tick for the initial configuration plus one per sweep
    let pb = ProgressBar::new(params.sweeps as u64 + 1);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )
        .unwrap()
        .progress_chars("=> "),
    );
    pb.set_message("sweeps");
    let result = simulation::run(params, |_| pb.inc(1));
    pb.finish();
    result
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let algorithm = Algorithm::try_from(cli.algorithm.as_str()).map_err(|e| eyre!(e))?;
    let params = SimParams {
        length: cli.length,
        sweeps: cli.steps,
        reduced_temperature: cli.temperature_reduced,
        field: cli.external_magnetic_field,
        interaction: cli.interaction,
        initial_magnetization: cli.initial_magnetization,
        algorithm,
        seed: cli.seed,
    };

    info!(
        "L={} K={} T*={} h={} J={} m0={} algorithm={} seed={}",
        params.length,
        params.sweeps,
        params.reduced_temperature,
        params.field,
        params.interaction,
        params.initial_magnetization,
        params.algorithm.name(),
        params.seed,
    );

    let result = match cli.visualization.as_deref() {
        Some(markers) => {
            let (up, down) = parse_markers(markers);
            match TermRenderer::stdout() {
                Some(mut renderer) => {
                    renderer.prepare(params.length, params.length);
                    simulation::run(&params, |lattice| {
                        renderer.render(&frame(lattice, up, down));
                    })
                }
                // stdout is not a terminal: degrade instead of failing
                None => {
                    let mut renderer = NullRenderer;
                    simulation::run(&params, |lattice| {
                        renderer.render(&frame(lattice, up, down));
                    })
                }
            }
        }
        None => run_with_progress(&params),
    }
    .map_err(|e| eyre!(e))?;

    info!(
        "final magnetization {:.6} after {} sweeps",
        result.magnetization.last().copied().unwrap_or_default(),
        params.sweeps,
    );

    if let Some(dir) = cli.save_configuration {
        let path = output::save_lattice(&dir, &file_stem(&params, "lattice"), &result.lattice)
            .wrap_err("failed to save the spin configuration")?;
        info!("configuration saved to {}", path.display());
    }

    if let Some(dir) = cli.save_magnetization {
        let path = output::save_trajectory(
            &dir,
            &file_stem(&params, "magnetization"),
            &result.magnetization,
        )
        .wrap_err("failed to save the magnetization trajectory")?;
        info!("magnetization saved to {}", path.display());
    }

    Ok(())
}
