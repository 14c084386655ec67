//! Simulation container volumes: boundary wrapping, minimum-image distances
//! and volume scaling for the six shapes Faunus supports.

mod errors;
mod geometry;
mod scale;

pub use errors::GeometryError;
pub use geometry::{box_width, Geometry};
pub use scale::{ScalePolicy, ScaleTransform};

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_numerical::Vec3;

    #[test]
    fn cuboid_minimum_image_wraps_across_boundary() {
        let geo = Geometry::cuboid(Vec3::from_float(10.0));
        let a = Vec3::new(0.5, 0.0, 0.0);
        let b = Vec3::new(9.5, 0.0, 0.0);
        let d = geo.vdist(&a, &b);
        assert!((d.x - 1.0).abs() < 1e-9, "expected wrapped distance of 1.0, got {}", d.x);
    }

    #[test]
    fn cuboid_boundary_wraps_negative_and_overflow_coordinates() {
        let geo = Geometry::cuboid(Vec3::from_float(10.0));
        let mut p = Vec3::new(-1.0, 11.0, 5.0);
        geo.boundary(&mut p);
        assert!((p.x - 9.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert!((p.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn sphere_collision_detects_points_outside_radius() {
        let geo = Geometry::Sphere { radius: 5.0 };
        assert!(!geo.collision(&Vec3::new(4.0, 0.0, 0.0)));
        assert!(geo.collision(&Vec3::new(6.0, 0.0, 0.0)));
    }

    #[test]
    fn cuboid_isotropic_scale_doubles_each_side_on_8x_volume() {
        let mut geo = Geometry::cuboid(Vec3::from_float(10.0));
        let old_volume = geo.volume();
        let transform = geo.scale(old_volume * 8.0, ScalePolicy::Isotropic).unwrap();
        assert!((transform.factors.x - 2.0).abs() < 1e-9);
        assert!((geo.volume() - old_volume * 8.0).abs() < 1e-6);
    }

    #[test]
    fn cylinder_rejects_xy_only_scaling() {
        let mut geo = Geometry::Cylinder { radius: 2.0, height: 4.0 };
        assert!(geo.scale(50.0, ScalePolicy::XYOnly).is_err());
    }

    #[test]
    fn negative_volume_is_rejected() {
        let mut geo = Geometry::Sphere { radius: 1.0 };
        assert!(geo.scale(-1.0, ScalePolicy::Isotropic).is_err());
    }

    #[test]
    fn truncated_octahedron_minimum_image_never_exceeds_half_its_own_envelope() {
        let geo = Geometry::TruncatedOctahedron { edge: 10.0 };
        let a = Vec3::new(4.9, 4.9, 4.9);
        let b = Vec3::zero();
        let d = geo.vdist(&a, &b);
        assert!(d.norm() <= a.norm() + 1e-9);
    }

    #[test]
    fn hexagonal_prism_random_points_are_self_minimum_images() {
        use rand::SeedableRng;
        let geo = Geometry::HexagonalPrism { side: 3.0, height: 6.0 };
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let p = geo.random_inside(&mut rng);
            let mut wrapped = p;
            geo.boundary(&mut wrapped);
            assert!((p.x - wrapped.x).abs() < 1e-6);
            assert!((p.y - wrapped.y).abs() < 1e-6);
        }
    }
}
