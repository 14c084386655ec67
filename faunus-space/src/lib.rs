//! The particle array, group partitioning and committed/trial shadow state
//! that Monte Carlo moves and energy terms operate on.

mod errors;
mod group;
mod space;

pub use errors::SpaceError;
pub use group::{group_filter, Group, GroupKind, Selector};
pub use space::{Space, SpaceState};
