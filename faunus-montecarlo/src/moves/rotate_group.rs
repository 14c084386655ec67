use rand::rngs::SmallRng;
use rand::Rng;

use faunus_energy::Hamiltonian;
use faunus_numerical::{Quaternion, Vec3};
use faunus_space::Space;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::mover::Mover;

/// Rotates a whole group about its center of mass by a random angle in
/// `[-max_angle/2, max_angle/2]` about a random unit axis, optionally also
/// translating it. Energy change is `g2all(trial) - g2all(committed)`
/// (spec. 4.8).
pub struct RotateGroup {
    pub group: usize,
    pub max_angle: f64,
    pub max_translation: f64,
    weight: f64,
    stats: AcceptanceStatistics,
}

impl RotateGroup {
    pub fn new(group: usize, max_angle: f64, max_translation: f64, weight: f64) -> RotateGroup {
        RotateGroup { group, max_angle, max_translation, weight, stats: AcceptanceStatistics::default() }
    }
}

impl Mover for RotateGroup {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn trial_move(&mut self, space: &mut Space, rng: &mut SmallRng) {
        let axis = Vec3::random_unit_versor(rng);
        let angle = rng.gen_range(-0.5..0.5) * self.max_angle;
        let q = Quaternion::from_axis_angle(&axis, angle);

        let faunus_space::SpaceState { particles, groups, geometry } = space.trial_mut();
        groups[self.group].rotate(particles, &q, geometry);

        if self.max_translation > 0.0 {
            let delta = Vec3::new(
                rng.gen_range(-0.5..0.5) * self.max_translation,
                rng.gen_range(-0.5..0.5) * self.max_translation,
                rng.gen_range(-0.5..0.5) * self.max_translation,
            );
            groups[self.group].translate(particles, &delta, geometry);
        }
    }

    fn energy_change(&self, space: &Space, hamiltonian: &Hamiltonian) -> f64 {
        hamiltonian.g2all(space.trial(), self.group) - hamiltonian.g2all(space.committed(), self.group)
    }

    fn accept(&mut self, space: &mut Space) {
        space.sync_group(self.group).expect("rotated group must exist");
    }

    fn reject(&mut self, space: &mut Space) {
        space.revert_group(self.group).expect("rotated group must exist");
    }

    fn info(&self) -> String {
        format!("RotateGroup(group={}, max_angle={:.3})", self.group, self.max_angle)
    }

    fn statistics(&self) -> &AcceptanceStatistics {
        &self.stats
    }

    fn statistics_mut(&mut self) -> &mut AcceptanceStatistics {
        &mut self.stats
    }

    fn max_range(&self) -> Option<f64> {
        Some(self.max_angle)
    }

    fn set_max_range(&mut self, new_value: f64) {
        self.max_angle = new_value;
    }
}
