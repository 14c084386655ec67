use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use rand::Rng;

#[cfg_attr(feature = "encode", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
/// A point or a displacement in 3D space.
///
/// Unlike `bioshell-numerical`'s original `Vec3`, this type carries no per-atom
/// metadata (residue type, atom type, chain id): in Faunus that bookkeeping lives
/// on `Particle` and `Group` instead, so `Vec3` stays a plain algebraic vector.
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub const fn zero() -> Vec3 {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub const fn from_float(value: f64) -> Vec3 {
        Vec3 { x: value, y: value, z: value }
    }

    /// Dot product
    pub fn dot(&self, rhs: &Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product
    pub fn cross(&self, rhs: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Returns a unit vector pointing the same way as `self`.
    ///
    /// Panics on a zero vector; callers that rotate/insert particles should
    /// never produce one.
    pub fn normalized(&self) -> Vec3 {
        let n = self.norm();
        Vec3::new(self.x / n, self.y / n, self.z / n)
    }

    pub fn distance_to(&self, rhs: &Vec3) -> f64 {
        (*self - *rhs).norm()
    }

    pub fn distance_squared_to(&self, rhs: &Vec3) -> f64 {
        (*self - *rhs).norm_squared()
    }

    /// Draws a vector uniformly distributed on the unit sphere.
    pub fn random_unit_versor<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
        // rejection sampling inside the unit cube, same approach bioshell-sim's
        // random_unit_versor() uses
        loop {
            let x = rng.gen_range(-1.0..1.0);
            let y = rng.gen_range(-1.0..1.0);
            let z = rng.gen_range(-1.0..1.0);
            let v = Vec3::new(x, y, z);
            let n2 = v.norm_squared();
            if n2 > 1.0e-12 && n2 <= 1.0 {
                return v * (1.0 / n2.sqrt());
            }
        }
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 has only 3 components, index {} is out of range", i),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 has only 3 components, index {} is out of range", i),
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.4}, {:.4}, {:.4}]", self.x, self.y, self.z)
    }
}

/// Planar angle (in radians) at vertex `b` formed by `a-b-c`.
pub fn planar_angle3(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    let u = *a - *b;
    let v = *c - *b;
    (u.dot(&v) / (u.norm() * v.norm())).clamp(-1.0, 1.0).acos()
}
