mod grand_canonical_salt;
mod isobaric;
mod particle_translation;
mod rotate_group;
mod titration;

pub use grand_canonical_salt::GrandCanonicalSalt;
pub use isobaric::Isobaric;
pub use particle_translation::ParticleTranslation;
pub use rotate_group::RotateGroup;
pub use titration::Titration;
