use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnergyError {
    #[error("particle index {0} has no atom type entry (radius/charge lookup failed)")]
    MissingAtomType(usize),
    #[error("group index {0} out of range")]
    UnknownGroup(usize),
}
