use rand::rngs::SmallRng;
use rand::Rng;

use faunus_energy::Hamiltonian;
use faunus_geometry::ScalePolicy;
use faunus_space::Space;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::mover::Mover;

/// Isobaric (NPT) volume move: draws `δ ∈ [-dV/2, +dV/2]`, sets
/// `V' = exp(ln V + δ)`, and rescales every group accordingly. The energy
/// change, including the `P·V` and log-volume (Jacobian) bias terms, is
/// delegated to whichever `ExternalPressure` term is enrolled in the
/// Hamiltonian, so this mover only needs `system_energy` before and after
/// (spec. 4.8).
pub struct Isobaric {
    pub max_log_volume_step: f64,
    pub scale_policy: ScalePolicy,
    weight: f64,
    stats: AcceptanceStatistics,
}

impl Isobaric {
    pub fn new(max_log_volume_step: f64, scale_policy: ScalePolicy, weight: f64) -> Isobaric {
        Isobaric { max_log_volume_step, scale_policy, weight, stats: AcceptanceStatistics::default() }
    }
}

impl Mover for Isobaric {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn trial_move(&mut self, space: &mut Space, rng: &mut SmallRng) {
        let delta = rng.gen_range(-0.5..0.5) * self.max_log_volume_step;
        let old_volume = space.trial().geometry.volume();
        let new_volume = (old_volume.ln() + delta).exp();
        space.scale_trial_volume(new_volume, self.scale_policy.clone()).expect("volume scaling must stay feasible");
    }

    fn energy_change(&self, space: &Space, hamiltonian: &Hamiltonian) -> f64 {
        hamiltonian.system_energy(space.trial()) - hamiltonian.system_energy(space.committed())
    }

    fn accept(&mut self, space: &mut Space) {
        space.sync_geometry();
        for g in 0..space.committed().groups.len() {
            space.sync_group(g).expect("enrolled group must exist");
        }
    }

    fn reject(&mut self, space: &mut Space) {
        space.revert_geometry();
        for g in 0..space.committed().groups.len() {
            space.revert_group(g).expect("enrolled group must exist");
        }
    }

    fn info(&self) -> String {
        format!("Isobaric(max_log_volume_step={:.3})", self.max_log_volume_step)
    }

    fn statistics(&self) -> &AcceptanceStatistics {
        &self.stats
    }

    fn statistics_mut(&mut self) -> &mut AcceptanceStatistics {
        &mut self.stats
    }

    fn max_range(&self) -> Option<f64> {
        Some(self.max_log_volume_step)
    }

    fn set_max_range(&mut self, new_value: f64) {
        self.max_log_volume_step = new_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_geometry::Geometry;
    use faunus_numerical::Vec3;
    use faunus_particle::{AtomTable, Particle};
    use faunus_space::GroupKind;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn reject_restores_committed_volume() {
        let mut space = Space::new(Geometry::cuboid(Vec3::new(10.0, 10.0, 10.0)), Arc::new(AtomTable::empty()));
        space.push_group(vec![Particle::new(Vec3::new(1.0, 0.0, 0.0), 0.0, 0)], 0, None, 0, GroupKind::Atomic);
        let mut mover = Isobaric::new(0.2, ScalePolicy::Isotropic, 1.0);
        let mut rng = SmallRng::seed_from_u64(9);
        let old_volume = space.committed().geometry.volume();
        mover.trial_move(&mut space, &mut rng);
        mover.reject(&mut space);
        assert_eq!(space.trial().geometry.volume(), old_volume);
    }
}
