//! Vectors, quaternions and rigid-body transforms shared by the geometry,
//! space and Monte Carlo move crates.

mod quaternion;
mod rototranslation;
#[macro_use]
mod testing_macros;
mod vec3;

pub use quaternion::Quaternion;
pub use rototranslation::Rototranslation;
pub use vec3::{planar_angle3, Vec3};
