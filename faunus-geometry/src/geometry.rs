use rand::Rng;

use faunus_numerical::Vec3;

use crate::errors::GeometryError;
use crate::scale::{ScalePolicy, ScaleTransform};

/// Finds the edge length of a cubic box that realizes a target number
/// density of spherical particles of a given radius.
///
/// Generalizes `bioshell-cartesians::coordinates::box_width` (originally
/// cuboid-only) so every shape in this crate can be sized the same way.
pub fn box_width(atom_radius: f64, n_atoms: usize, density: f64) -> f64 {
    let v = 4.0 / 3.0 * std::f64::consts::PI * atom_radius.powi(3);
    (n_atoms as f64 * v / density).powf(1.0 / 3.0)
}

/// Shortest signed difference `c1 - c2` along one periodic axis of length `l`,
/// using round-to-nearest rather than the single-branch correction the
/// original cuboid macro used (`closest_image!` in `bioshell-cartesians`),
/// so it stays correct even for a displacement larger than one box length.
fn minimum_image_1d(c1: f64, c2: f64, l: f64) -> f64 {
    let d = c1 - c2;
    d - l * (d / l).round()
}

fn wrap_1d(c: f64, l: f64) -> f64 {
    let mut c = c % l;
    if c < 0.0 {
        c += l;
    }
    c
}

/// Minimum image of a 2D displacement under an oblique lattice, found by a
/// brute neighbour-shell search over the 9 adjacent cells. A plain fractional
/// round (the cuboid shortcut) is only exact for rectangular cells; the
/// hexagonal lattice is oblique, so every candidate image is tried and the
/// shortest kept.
fn minimum_image_2d(a1: (f64, f64), a2: (f64, f64), d: (f64, f64)) -> (f64, f64) {
    let det = a1.0 * a2.1 - a1.1 * a2.0;
    let f1 = (d.0 * a2.1 - d.1 * a2.0) / det;
    let f2 = (a1.0 * d.1 - a1.1 * d.0) / det;
    let (n1, n2) = (f1.round(), f2.round());

    let mut best = (d.0 - n1 * a1.0 - n2 * a2.0, d.1 - n1 * a1.1 - n2 * a2.1);
    let mut best_sq = best.0 * best.0 + best.1 * best.1;
    for i in -1..=1 {
        for j in -1..=1 {
            let cand_n1 = n1 + i as f64;
            let cand_n2 = n2 + j as f64;
            let cand = (d.0 - cand_n1 * a1.0 - cand_n2 * a2.0, d.1 - cand_n1 * a1.1 - cand_n2 * a2.1);
            let sq = cand.0 * cand.0 + cand.1 * cand.1;
            if sq < best_sq {
                best = cand;
                best_sq = sq;
            }
        }
    }
    best
}

/// Minimum image under the truncated-octahedron periodic cell built from a
/// cube of edge `l`: first apply the ordinary cubic wrap, then fold back any
/// displacement that crosses the octahedron's truncating planes (the
/// well-known two-step rule for this cell, e.g. as used by GROMACS/LAMMPS).
fn minimum_image_truncated_octahedron(l: f64, d: Vec3) -> Vec3 {
    let mut dx = minimum_image_1d(d.x, 0.0, l);
    let mut dy = minimum_image_1d(d.y, 0.0, l);
    let mut dz = minimum_image_1d(d.z, 0.0, l);
    if dx.abs() + dy.abs() + dz.abs() > 0.75 * l {
        dx -= 0.5 * l * dx.signum();
        dy -= 0.5 * l * dy.signum();
        dz -= 0.5 * l * dz.signum();
    }
    Vec3::new(dx, dy, dz)
}

/// A closed set of simulation container shapes.
///
/// Faunus fixes this set at six members (spec. 3/4.1), so the container is a
/// tagged enum with monomorphized dispatch rather than a trait object: no
/// caller ever needs to plug in a shape the engine doesn't already know.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    /// Rectangular box, independently periodic along each axis.
    Cuboid { side: Vec3, periodic: [bool; 3] },
    /// Periodic in x and y; hard, non-periodic walls at z=0 and z=side.z.
    Slit { side: Vec3 },
    /// No periodicity; particles confined to a ball of this radius about the origin.
    Sphere { radius: f64 },
    /// No periodicity; confined to a disk of `radius` extruded over `[-height/2, height/2]`.
    Cylinder { radius: f64, height: f64 },
    /// Periodic hexagonal cross-section (side `side`) extruded and periodic along z (`height`).
    HexagonalPrism { side: f64, height: f64 },
    /// Periodic truncated octahedron built from a cube of edge `edge`.
    TruncatedOctahedron { edge: f64 },
}

impl Geometry {
    pub fn cuboid(side: Vec3) -> Geometry {
        Geometry::Cuboid { side, periodic: [true, true, true] }
    }

    pub fn slit(side: Vec3) -> Geometry {
        Geometry::Slit { side }
    }

    pub fn volume(&self) -> f64 {
        match self {
            Geometry::Cuboid { side, .. } => side.x * side.y * side.z,
            Geometry::Slit { side } => side.x * side.y * side.z,
            Geometry::Sphere { radius } => 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3),
            Geometry::Cylinder { radius, height } => std::f64::consts::PI * radius * radius * height,
            Geometry::HexagonalPrism { side, height } => {
                // area of a regular hexagon with side length `side`, times the prism height
                1.5 * 3f64.sqrt() * side * side * height
            }
            Geometry::TruncatedOctahedron { edge } => 0.5 * edge.powi(3),
        }
    }

    /// Displacement `a - b`, taking the minimum image under this container's
    /// periodicity into account (spec. 4.1).
    pub fn vdist(&self, a: &Vec3, b: &Vec3) -> Vec3 {
        match self {
            Geometry::Cuboid { side, periodic } => Vec3::new(
                if periodic[0] { minimum_image_1d(a.x, b.x, side.x) } else { a.x - b.x },
                if periodic[1] { minimum_image_1d(a.y, b.y, side.y) } else { a.y - b.y },
                if periodic[2] { minimum_image_1d(a.z, b.z, side.z) } else { a.z - b.z },
            ),
            Geometry::Slit { side } => Vec3::new(
                minimum_image_1d(a.x, b.x, side.x),
                minimum_image_1d(a.y, b.y, side.y),
                a.z - b.z,
            ),
            Geometry::Sphere { .. } | Geometry::Cylinder { .. } => *a - *b,
            Geometry::HexagonalPrism { side, height } => {
                let (a1, a2) = hex_lattice_vectors(*side);
                let (dx, dy) = minimum_image_2d(a1, a2, (a.x - b.x, a.y - b.y));
                let dz = minimum_image_1d(a.z, b.z, *height);
                Vec3::new(dx, dy, dz)
            }
            Geometry::TruncatedOctahedron { edge } => minimum_image_truncated_octahedron(*edge, *a - *b),
        }
    }

    pub fn sqdist(&self, a: &Vec3, b: &Vec3) -> f64 {
        self.vdist(a, b).norm_squared()
    }

    /// Wraps `point` back into the primary periodic cell; a no-op on axes
    /// without periodicity.
    pub fn boundary(&self, point: &mut Vec3) {
        match self {
            Geometry::Cuboid { side, periodic } => {
                if periodic[0] {
                    point.x = wrap_1d(point.x, side.x);
                }
                if periodic[1] {
                    point.y = wrap_1d(point.y, side.y);
                }
                if periodic[2] {
                    point.z = wrap_1d(point.z, side.z);
                }
            }
            Geometry::Slit { side } => {
                point.x = wrap_1d(point.x, side.x);
                point.y = wrap_1d(point.y, side.y);
            }
            Geometry::Sphere { .. } | Geometry::Cylinder { .. } => {}
            Geometry::HexagonalPrism { side, height } => {
                let (a1, a2) = hex_lattice_vectors(*side);
                let (x, y) = minimum_image_2d(a1, a2, (point.x, point.y));
                point.x = x;
                point.y = y;
                point.z = wrap_1d(point.z, *height);
            }
            Geometry::TruncatedOctahedron { edge } => {
                let wrapped = minimum_image_truncated_octahedron(*edge, *point);
                *point = wrapped;
            }
        }
    }

    /// True if `point` lies outside this container's confining boundary.
    /// Periodic shapes (cuboid with all axes periodic, slit, hexagonal
    /// prism, truncated octahedron) always accept any point since `boundary`
    /// can fold it back in; the finite shapes (sphere, cylinder, and any
    /// non-periodic cuboid axis) reject points outside their hard wall.
    pub fn collision(&self, point: &Vec3) -> bool {
        match self {
            Geometry::Cuboid { side, periodic } => {
                (!periodic[0] && (point.x < 0.0 || point.x > side.x))
                    || (!periodic[1] && (point.y < 0.0 || point.y > side.y))
                    || (!periodic[2] && (point.z < 0.0 || point.z > side.z))
            }
            Geometry::Slit { side } => point.z < 0.0 || point.z > side.z,
            Geometry::Sphere { radius } => point.norm_squared() > radius * radius,
            Geometry::Cylinder { radius, height } => {
                let radial_sq = point.x * point.x + point.y * point.y;
                radial_sq > radius * radius || point.z.abs() > height / 2.0
            }
            Geometry::HexagonalPrism { .. } | Geometry::TruncatedOctahedron { .. } => false,
        }
    }

    /// Draws a point uniformly distributed inside the container.
    pub fn random_inside<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match self {
            Geometry::Cuboid { side, .. } => Vec3::new(
                rng.gen_range(0.0..side.x),
                rng.gen_range(0.0..side.y),
                rng.gen_range(0.0..side.z),
            ),
            Geometry::Slit { side } => Vec3::new(
                rng.gen_range(0.0..side.x),
                rng.gen_range(0.0..side.y),
                rng.gen_range(0.0..side.z),
            ),
            Geometry::Sphere { radius } => {
                let u: f64 = rng.gen_range(0.0..1.0f64);
                Vec3::random_unit_versor(rng) * (radius * u.cbrt())
            }
            Geometry::Cylinder { radius, height } => loop {
                let x = rng.gen_range(-*radius..*radius);
                let y = rng.gen_range(-*radius..*radius);
                if x * x + y * y <= radius * radius {
                    let z = rng.gen_range(-height / 2.0..height / 2.0);
                    return Vec3::new(x, y, z);
                }
            },
            Geometry::HexagonalPrism { side, height } => {
                let (a1, a2) = hex_lattice_vectors(*side);
                let r = *side * 1.5;
                loop {
                    let x = rng.gen_range(-r..r);
                    let y = rng.gen_range(-r..r);
                    // the fundamental cell is exactly the set of points that are
                    // already their own minimum image about the origin
                    let (mx, my) = minimum_image_2d(a1, a2, (x, y));
                    if (mx - x).abs() < 1e-9 && (my - y).abs() < 1e-9 {
                        let z = rng.gen_range(-height / 2.0..height / 2.0);
                        return Vec3::new(x, y, z);
                    }
                }
            }
            Geometry::TruncatedOctahedron { edge } => loop {
                let x = rng.gen_range(-edge / 2.0..edge / 2.0);
                let y = rng.gen_range(-edge / 2.0..edge / 2.0);
                let z = rng.gen_range(-edge / 2.0..edge / 2.0);
                if x.abs() + y.abs() + z.abs() <= 0.75 * edge {
                    return Vec3::new(x, y, z);
                }
            },
        }
    }

    /// Rescales the container to `new_volume`, returning the per-axis factor
    /// to apply to particle positions and group centers of mass (spec. 4.1).
    pub fn scale(&mut self, new_volume: f64, policy: ScalePolicy) -> Result<ScaleTransform, GeometryError> {
        if !(new_volume > 0.0) {
            return Err(GeometryError::NonPositiveVolume(new_volume));
        }
        let old_volume = self.volume();
        let ratio = new_volume / old_volume;

        let transform = match self {
            Geometry::Cuboid { side, .. } | Geometry::Slit { side } => match policy {
                ScalePolicy::Isotropic => {
                    let f = ratio.cbrt();
                    *side = *side * f;
                    ScaleTransform::isotropic(f)
                }
                ScalePolicy::XYOnly => {
                    let f = ratio.sqrt();
                    side.x *= f;
                    side.y *= f;
                    ScaleTransform { factors: Vec3::new(f, f, 1.0) }
                }
                ScalePolicy::ZOnly => {
                    let f = ratio;
                    side.z *= f;
                    ScaleTransform { factors: Vec3::new(1.0, 1.0, f) }
                }
            },
            Geometry::Sphere { radius } => {
                let f = ratio.cbrt();
                *radius *= f;
                ScaleTransform::isotropic(f)
            }
            Geometry::Cylinder { radius, height } => match policy {
                ScalePolicy::ZOnly => {
                    *height *= ratio;
                    ScaleTransform { factors: Vec3::new(1.0, 1.0, ratio) }
                }
                ScalePolicy::Isotropic => {
                    let f = ratio.cbrt();
                    *radius *= f;
                    *height *= f;
                    ScaleTransform::isotropic(f)
                }
                ScalePolicy::XYOnly => return Err(GeometryError::UnsupportedScalePolicy),
            },
            Geometry::HexagonalPrism { side, height } => match policy {
                ScalePolicy::ZOnly => {
                    *height *= ratio;
                    ScaleTransform { factors: Vec3::new(1.0, 1.0, ratio) }
                }
                ScalePolicy::Isotropic => {
                    let f = ratio.cbrt();
                    *side *= f;
                    *height *= f;
                    ScaleTransform::isotropic(f)
                }
                ScalePolicy::XYOnly => return Err(GeometryError::UnsupportedScalePolicy),
            },
            Geometry::TruncatedOctahedron { edge } => {
                let f = ratio.cbrt();
                *edge *= f;
                ScaleTransform::isotropic(f)
            }
        };

        if !transform.factors.x.is_finite() {
            return Err(GeometryError::NonFiniteScaleFactor(transform.factors.x));
        }
        Ok(transform)
    }
}

fn hex_lattice_vectors(side: f64) -> ((f64, f64), (f64, f64)) {
    let a1 = (1.5 * side, 0.5 * 3f64.sqrt() * side);
    let a2 = (1.5 * side, -0.5 * 3f64.sqrt() * side);
    (a1, a2)
}
