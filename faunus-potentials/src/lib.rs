//! Pairwise interaction potentials: hard sphere, harmonic, Lennard-Jones and
//! Coulomb (with Ewald/Wolf/reaction-field splitting), composable by
//! summation and optionally tabulated for speed.

mod composite;
mod coulomb;
mod hard_sphere;
mod harmonic;
mod lennard_jones;
mod pair_potential;
mod tabulated;

pub use composite::CompositePotential;
pub use coulomb::{Coulomb, Splitting};
pub use hard_sphere::HardSphere;
pub use harmonic::Harmonic;
pub use lennard_jones::LennardJones;
pub use pair_potential::{PairParams, PairPotential};
pub use tabulated::Tabulated;
