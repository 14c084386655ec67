use faunus_numerical::{assert_eq_vec3, Quaternion, Rototranslation, Vec3};

#[test]
fn rotate_point_90_degrees_about_x_axis() {
    let center = Vec3::zero();
    let begin = Vec3::zero();
    let end = Vec3::new(1.0, 0.0, 0.0);
    let rot = Rototranslation::around_axis(&center, &begin, &end, std::f64::consts::FRAC_PI_2);

    let p = Vec3::new(0.0, 1.0, 0.0);
    let rotated = rot.apply(&p);
    assert_eq_vec3!(rotated, Vec3::new(0.0, 0.0, 1.0), 1e-9);
}

#[test]
fn four_quarter_turns_about_z_axis_return_to_start() {
    let rot = Rototranslation::around_axis(
        &Vec3::zero(),
        &Vec3::zero(),
        &Vec3::new(0.0, 0.0, 1.0),
        std::f64::consts::FRAC_PI_2,
    );

    let mut p = Vec3::new(1.0, 1.0, 0.0);
    let expected = vec![
        Vec3::new(-1.0, 1.0, 0.0),
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    for e in &expected {
        rot.apply_mut(&mut p);
        assert_eq_vec3!(p, *e, 1e-9);
    }
}

#[test]
fn apply_then_apply_inverse_is_identity() {
    let rot = Rototranslation::around_axis(
        &Vec3::new(1.0, 2.0, 3.0),
        &Vec3::new(1.0, 2.0, 3.0),
        &Vec3::new(1.0, 2.0, 10.0),
        0.77,
    );
    let p = Vec3::new(4.0, -1.0, 2.5);
    let round_tripped = rot.apply_inverse(&rot.apply(&p));
    assert_eq_vec3!(round_tripped, p, 1e-9);
}

#[test]
fn rotation_about_pivot_preserves_distance_to_pivot() {
    let pivot = Vec3::new(2.0, -1.0, 0.5);
    let rot = Rototranslation::new(
        Quaternion::from_axis_angle(&Vec3::new(0.2, 1.0, -0.3), 1.1),
        pivot,
        Vec3::zero(),
    );
    let p = Vec3::new(5.0, 3.0, -2.0);
    let d_before = p.distance_to(&pivot);
    let rotated = rot.apply(&p);
    let d_after = rotated.distance_to(&pivot);
    assert!((d_before - d_after).abs() < 1e-9);
}
