use faunus_numerical::Vec3;

/// How a volume change is distributed across the three axes.
///
/// Cuboid and slit containers can grow anisotropically to support NPT moves
/// that scale in one or two dimensions only; the remaining shapes only have a
/// single free parameter (radius, edge, ...) and always scale isotropically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePolicy {
    Isotropic,
    XYOnly,
    ZOnly,
}

/// A volume-change transform to be applied to particle positions and, for
/// rigid molecular groups, to the group's center of mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTransform {
    pub factors: Vec3,
}

impl ScaleTransform {
    pub fn identity() -> ScaleTransform {
        ScaleTransform { factors: Vec3::from_float(1.0) }
    }

    pub fn isotropic(factor: f64) -> ScaleTransform {
        ScaleTransform { factors: Vec3::from_float(factor) }
    }

    /// Scales a point's coordinates in place (atomic particles and free cuboid corners).
    pub fn scale_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(p.x * self.factors.x, p.y * self.factors.y, p.z * self.factors.z)
    }

    /// Scales a rigid molecular group: only its center of mass moves, by this
    /// factor; members then translate rigidly by `new_cm - old_cm` (spec. 4.1/4.3).
    pub fn scale_center_of_mass(&self, cm: Vec3) -> Vec3 {
        self.scale_point(cm)
    }
}
