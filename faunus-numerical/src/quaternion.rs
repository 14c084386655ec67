use crate::Vec3;

#[cfg_attr(feature = "encode", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
/// A unit quaternion representing a rotation in 3D space.
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const fn identity() -> Quaternion {
        Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Builds the unit quaternion that rotates by `angle` radians about `axis`.
    ///
    /// `axis` need not be normalized.
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Quaternion {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let s = half.sin();
        Quaternion { w: half.cos(), x: axis.x * s, y: axis.y * s, z: axis.z * s }
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(&self) -> Quaternion {
        let n = self.norm();
        Quaternion { w: self.w / n, x: self.x / n, y: self.y / n, z: self.z / n }
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Hamilton product `self * rhs`.
    pub fn mul(&self, rhs: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }

    /// Rotates `v` by this quaternion: `q v q*`, computed without building the
    /// equivalent 3x3 matrix.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let uv = qv.cross(v);
        let uuv = qv.cross(&uv);
        *v + (uv * (2.0 * self.w)) + (uuv * 2.0)
    }

    pub fn inverse_rotate(&self, v: &Vec3) -> Vec3 {
        self.conjugate().rotate(v)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}
