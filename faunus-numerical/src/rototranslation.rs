use crate::{Quaternion, Vec3};

#[derive(Clone)]
/// A rigid-body transform: a rotation about a pivot point followed by a translation.
///
/// Where the original `bioshell-numerical::Rototranslation` stored a row-wise 3x3
/// matrix (and left its constructors unimplemented), this version is built on
/// [`Quaternion`] so it composes cleanly with `Group::rotate`'s quaternion
/// contract and stays numerically stable over many incremental move proposals.
pub struct Rototranslation {
    rotation: Quaternion,
    pivot: Vec3,
    translation: Vec3,
}

impl Default for Rototranslation {
    fn default() -> Self {
        Rototranslation { rotation: Quaternion::identity(), pivot: Vec3::zero(), translation: Vec3::zero() }
    }
}

impl Rototranslation {
    pub fn new(rotation: Quaternion, pivot: Vec3, translation: Vec3) -> Rototranslation {
        Rototranslation { rotation, pivot, translation }
    }

    /// Creates a transformation that rotates by `angle` radians about the axis
    /// running from `begin` to `end`, with the rotation pivoted at `center`.
    pub fn around_axis(center: &Vec3, begin: &Vec3, end: &Vec3, angle: f64) -> Rototranslation {
        let axis = *end - *begin;
        Rototranslation {
            rotation: Quaternion::from_axis_angle(&axis, angle),
            pivot: *center,
            translation: Vec3::zero(),
        }
    }

    pub fn rotation_quaternion(&self) -> &Quaternion {
        &self.rotation
    }

    /// Returns a transformed copy of a given vector
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        let mut v = *v;
        self.apply_mut(&mut v);
        v
    }

    /// Apply this rototranslation to a given vector
    pub fn apply_mut(&self, v: &mut Vec3) {
        let relative = *v - self.pivot;
        *v = self.pivot + self.rotation.rotate(&relative) + self.translation;
    }

    /// Apply the inverse of this rototranslation to a given vector.
    /// Returns a transformed copy of a given vector
    pub fn apply_inverse(&self, v: &Vec3) -> Vec3 {
        let mut v = *v;
        self.apply_inverse_mut(&mut v);
        v
    }

    /// Apply the inverse of this rototranslation to a given vector
    pub fn apply_inverse_mut(&self, v: &mut Vec3) {
        let relative = *v - self.translation - self.pivot;
        *v = self.pivot + self.rotation.inverse_rotate(&relative);
    }
}
