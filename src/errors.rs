use thiserror::Error;

/// Configuration problems: surfaced at load time, before any run starts (spec. 7).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown property '{0}' in section '{1}'")]
    UnknownProperty(String, String),
    #[error("missing required field '{0}' in section '{1}'")]
    MissingField(String, String),
    #[error("{0} lists {1} entries but {2} expects {3}")]
    InconsistentCounts(String, usize, String, usize),
    #[error("unknown atom name '{0}' referenced")]
    UnknownAtomName(String),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("persisted state version {found} is incompatible with this binary's version {expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error(transparent)]
    Geometry(#[from] faunus_geometry::GeometryError),
    #[error(transparent)]
    Particle(#[from] faunus_particle::ParticleError),
    #[error("grand-canonical move targets group {0} but only the last group (index {1}) may hold reserved inactive capacity")]
    GrandCanonicalGroupNotLast(usize, usize),
    #[error("failed to (de)serialize persisted state: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wraps configuration and state-invariant failures plus I/O, for top-level
/// `main` error reporting (spec. 7).
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Space(#[from] faunus_space::SpaceError),
    #[error(transparent)]
    MonteCarlo(#[from] faunus_montecarlo::MonteCarloError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("energy drift {drift:.6} kT exceeded threshold {threshold:.6} kT")]
    DriftExceeded { drift: f64, threshold: f64 },
    #[error("repeated overlap on initial placement after {0} attempts")]
    UnrecoverableCollision(usize),
}
