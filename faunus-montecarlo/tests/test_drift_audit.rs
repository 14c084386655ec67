use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use faunus_energy::{Hamiltonian, Nonbonded};
use faunus_geometry::Geometry;
use faunus_montecarlo::{MetropolisCriterion, ParticleTranslation, WeightedMoveSet};
use faunus_numerical::Vec3;
use faunus_particle::{AtomTable, AtomType, Particle};
use faunus_potentials::LennardJones;
use faunus_space::{GroupKind, Space};

/// spec. 8 scenario 6: 10^4 `ParticleTranslation` steps on a multi-particle
/// molecular group under a `Nonbonded` term must keep the incrementally
/// tracked energy (`u0 + dusum`) within `1e-6` per step of a from-scratch
/// recomputation. This is exactly the scenario that would catch
/// `Nonbonded::g_internal` double-counting an intra-group pair that
/// `all2all` already sums system-wide.
#[test]
fn ten_thousand_translation_steps_stay_within_drift_tolerance() {
    let atom_table = Arc::new(
        AtomTable::from_atom_types(vec![AtomType {
            name: "bead".into(),
            mass: 1.0,
            radius: 0.5,
            charge: 0.0,
            activity: 0.0,
            custom: Default::default(),
        }])
        .unwrap(),
    );

    let geometry = Geometry::cuboid(Vec3::from_float(30.0));
    let mut space = Space::new(geometry, atom_table.clone());
    let particles = vec![
        Particle::new(Vec3::new(5.0, 5.0, 5.0), 0.0, 0),
        Particle::new(Vec3::new(8.0, 5.0, 5.0), 0.0, 0),
        Particle::new(Vec3::new(5.0, 8.0, 5.0), 0.0, 0),
    ];
    space.push_group(particles, 0, None, 0, GroupKind::Molecular { compressible: true });

    let mut hamiltonian = Hamiltonian::new();
    hamiltonian.push(Box::new(Nonbonded::new(LennardJones::new(0.05, 3.0), atom_table)));

    let mut move_set = WeightedMoveSet::new();
    move_set.add_mover(Box::new(ParticleTranslation::new(0, 0.5, [true, true, true], 1.0)));

    let u0 = hamiltonian.system_energy(space.committed());
    assert!(u0.is_finite());

    let mut criterion = MetropolisCriterion::new(7);
    let mut rng = SmallRng::seed_from_u64(7);
    move_set.make_sweeps(10_000, &mut space, &hamiltonian, &mut criterion, &mut rng).unwrap();

    let drift = move_set.audit_drift(&space, &hamiltonian, u0);
    assert!(drift < 1e-6 * 10_000.0, "drift {drift} exceeded tolerance");
}
