use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonteCarloError {
    #[error("named group '{0}' is not registered with this mover")]
    UnknownNamedGroup(String),
    #[error("species pool for atom id {0} is empty; cannot attempt an insertion/deletion move")]
    EmptySpeciesPool(usize),
    #[error("move set has no enrolled movers to draw from")]
    NoMovers,
}
