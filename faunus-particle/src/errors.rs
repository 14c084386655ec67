use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    #[error("duplicate atom type name '{0}' in atom table")]
    DuplicateAtomName(String),
    #[error("no atom type named '{0}' in atom table")]
    UnknownAtomName(String),
    #[error("no atom type with id {0} in atom table (table holds {1} entries)")]
    UnknownAtomId(usize, usize),
}
