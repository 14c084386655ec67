//! Thin wiring layer that turns the sub-crates into a runnable simulation:
//! JSON configuration loading, binary checkpoint persistence, and a
//! top-level error type unifying both.

pub mod config;
pub mod errors;
pub mod persist;
pub mod potential_spec;

pub use config::{BuiltSimulation, SimulationConfig};
pub use errors::{ConfigError, RunError};
pub use persist::Checkpoint;

pub use faunus_energy as energy;
pub use faunus_geometry as geometry;
pub use faunus_montecarlo as montecarlo;
pub use faunus_numerical as numerical;
pub use faunus_particle as particle;
pub use faunus_potentials as potentials;
pub use faunus_space as space;
