mod bond_table;
mod bonded;
mod energy_term;
mod errors;
mod external;
mod hamiltonian;
mod nonbonded;

pub use bond_table::BondTable;
pub use bonded::Bonded;
pub use energy_term::EnergyTerm;
pub use errors::EnergyError;
pub use external::{DistanceConstraint, EnergyRest, ExternalPressure, MassCenterConstrain, RestrictedVolume};
pub use hamiltonian::Hamiltonian;
pub use nonbonded::{Nonbonded, NonbondedCG};
