use faunus_numerical::Vec3;
use serde::{Deserialize, Serialize};

/// Dipole/patch data a particle only needs when its atom type calls for it.
///
/// Kept out of [`Particle`] itself and boxed so that purely atomic particles
/// (the common case) don't pay for fields they never use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    pub dipole_direction: Vec3,
    pub dipole_magnitude: f64,
    pub orientation: Vec3,
}

impl Default for ExtendedProperties {
    fn default() -> Self {
        ExtendedProperties {
            dipole_direction: Vec3::new(1.0, 0.0, 0.0),
            dipole_magnitude: 0.0,
            orientation: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// A single particle: a position, a charge, a type id into the enclosing
/// [`AtomTable`](crate::AtomTable), and an optional extended record.
///
/// `ext` stays `None` until something asks to mutate it; that absence is
/// itself meaningful (a plain Lennard-Jones sphere has no dipole) and is
/// preserved verbatim by `#[derive(Serialize, Deserialize)]` on the `Option`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pos: Vec3,
    charge: f64,
    id: usize,
    ext: Option<Box<ExtendedProperties>>,
}

impl Particle {
    pub fn new(pos: Vec3, charge: f64, id: usize) -> Particle {
        Particle { pos, charge, id, ext: None }
    }

    pub fn pos(&self) -> &Vec3 {
        &self.pos
    }

    pub fn pos_mut(&mut self) -> &mut Vec3 {
        &mut self.pos
    }

    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn set_charge(&mut self, charge: f64) {
        self.charge = charge;
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Peeks at the extended record without materializing it.
    pub fn ext(&self) -> Option<&ExtendedProperties> {
        self.ext.as_deref()
    }

    pub fn has_ext(&self) -> bool {
        self.ext.is_some()
    }

    /// Returns a mutable reference to the extended record, allocating a
    /// default one on first use.
    pub fn ext_mut(&mut self) -> &mut ExtendedProperties {
        self.ext.get_or_insert_with(|| Box::new(ExtendedProperties::default()))
    }

    /// Mutable access to the extended record without materializing one.
    pub fn ext_mut_if_present(&mut self) -> Option<&mut ExtendedProperties> {
        self.ext.as_deref_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_record_is_absent_until_first_mutation() {
        let mut p = Particle::new(Vec3::zero(), 1.0, 0);
        assert!(!p.has_ext());
        p.ext_mut().dipole_magnitude = 2.5;
        assert!(p.has_ext());
        assert_eq!(p.ext().unwrap().dipole_magnitude, 2.5);
    }

    #[test]
    fn serde_round_trip_preserves_ext_absence() {
        let p = Particle::new(Vec3::new(1.0, 2.0, 3.0), -1.0, 4);
        let encoded = serde_json::to_string(&p).unwrap();
        let decoded: Particle = serde_json::from_str(&encoded).unwrap();
        assert!(!decoded.has_ext());
        assert_eq!(decoded, p);
    }

    #[test]
    fn serde_round_trip_preserves_ext_presence() {
        let mut p = Particle::new(Vec3::new(1.0, 2.0, 3.0), -1.0, 4);
        p.ext_mut().dipole_magnitude = 0.8;
        let encoded = serde_json::to_string(&p).unwrap();
        let decoded: Particle = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.has_ext());
        assert_eq!(decoded, p);
    }
}
