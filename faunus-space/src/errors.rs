use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpaceError {
    #[error("deactivation range [{first},{last}) is not inside the active range [{begin},{end})")]
    InvalidDeactivateRange { first: usize, last: usize, begin: usize, end: usize },
    #[error("activation range [{first},{last}) is not a prefix of the inactive region starting at {end}, capped at {end_cap}")]
    InvalidActivateRange { first: usize, last: usize, end: usize, end_cap: usize },
    #[error("group index {0} out of range (space holds {1} groups)")]
    UnknownGroup(usize, usize),
    #[error("particle index {0} out of range (space holds {1} particles)")]
    UnknownParticle(usize, usize),
}
