//! Command-line front-end (§6): loads a JSON configuration, optionally
//! resumes from a binary checkpoint, runs the Metropolis loop, and writes
//! the final state back out. Mirrors `src/argon.rs`/`bin/bioshell.rs`'s
//! `clap`-derive `Args` plus explicit exit-code mapping.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use faunus::config::SimulationConfig;
use faunus::errors::RunError;
use faunus::montecarlo::{MetropolisCriterion, ObserversSet};
use faunus::persist::Checkpoint;

/// A Monte Carlo run of the faunus engine.
#[derive(Parser, Debug)]
#[command(name = "faunus", version, about = "Monte Carlo simulation of classical statistical mechanics")]
struct Args {
    /// Path to the JSON simulation configuration.
    #[arg(long)]
    input: PathBuf,

    /// Path to write the final binary checkpoint to.
    #[arg(long)]
    output: PathBuf,

    /// Path to a binary checkpoint to resume from, if present.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Number of inner Metropolis steps per outer sweep.
    #[arg(long, default_value_t = 1000)]
    nstep: usize,

    /// Number of outer sweeps to run.
    #[arg(long, default_value_t = 1000)]
    nsweep: usize,

    /// How often (in sweeps) to audit the incrementally tracked energy
    /// against a full recomputation. 0 disables auditing.
    #[arg(long, default_value_t = 10)]
    audit_every: usize,

    /// Energy drift (in kT) above which the run is considered a runtime
    /// failure once `--strict` is set.
    #[arg(long, default_value_t = 1e-2)]
    drift_threshold: f64,

    /// Treat drift above `--drift-threshold` as a fatal error (exit code 2)
    /// rather than a warning.
    #[arg(long)]
    strict: bool,

    /// Verbosity: -v for info, -vv for debug, absent for warnings only.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Seed driving every random draw this run makes, for reproducibility.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum number of times to retry an overlapping initial placement
    /// before giving up.
    #[arg(long, default_value_t = 100)]
    max_placement_attempts: usize,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(args: &Args) -> Result<(), RunError> {
    let text = std::fs::read_to_string(&args.input)?;
    let config = SimulationConfig::from_json(&text)?;

    let resume_from = match &args.state {
        Some(path) if path.exists() => {
            info!("resuming from checkpoint {}", path.display());
            Some(Checkpoint::load(path)?)
        }
        _ => None,
    };

    // A fresh (non-resumed) random placement can overlap; retry with a
    // different seed up to the configured attempt count before giving up
    // (spec. 7: numerical infeasibility on initial placement).
    let faunus::BuiltSimulation { atom_table, hamiltonian, mut space, mut move_set, .. } = if resume_from.is_some() {
        config.build(args.seed)?
    } else {
        let mut attempt = 0;
        loop {
            let built = config.build(args.seed.wrapping_add(attempt as u64))?;
            if !built.hamiltonian.system_energy(built.space.committed()).is_infinite() {
                break built;
            }
            attempt += 1;
            if attempt >= args.max_placement_attempts {
                return Err(RunError::UnrecoverableCollision(attempt));
            }
        }
    };

    if let Some(checkpoint) = resume_from {
        space = checkpoint.into_space(atom_table.clone());
    }

    let u0 = hamiltonian.system_energy(space.committed());
    if u0.is_infinite() {
        return Err(RunError::UnrecoverableCollision(args.max_placement_attempts));
    }

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut criterion = MetropolisCriterion::new(args.seed.wrapping_add(1));
    let mut observers = ObserversSet::new();

    let drift = move_set.run_simulation(args.nstep, args.nsweep, args.audit_every, u0, &mut space, &hamiltonian, &mut criterion, &mut rng, &mut observers)?;

    info!("final drift: {drift:.6} kT");
    if drift > args.drift_threshold {
        if args.strict {
            return Err(RunError::DriftExceeded { drift, threshold: args.drift_threshold });
        }
        log::warn!("energy drift {drift:.6} kT exceeded threshold {:.6} kT", args.drift_threshold);
    }

    let checkpoint = Checkpoint::capture(&space, move_set.dusum());
    checkpoint.save(&args.output)?;
    info!("wrote final state to {}", args.output.display());

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbosity);

    match run(&args) {
        Ok(()) => ExitCode::from(0),
        Err(err @ (RunError::Config(_) | RunError::Io(_))) => {
            error!("{err}");
            ExitCode::from(1)
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(2)
        }
    }
}
