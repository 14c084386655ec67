use rand::rngs::SmallRng;
use rand::Rng;

use faunus_energy::Hamiltonian;
use faunus_space::Space;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::mover::Mover;

/// Discrete proton-transfer move: toggles one titratable site's charge by
/// `±1` and its paired counter-ion's charge by the opposite amount, with a
/// pH-derived bias `ln(10) · (pH − pKa)` folded additively into `ΔU` before
/// the Metropolis test (spec. 4.8).
pub struct Titration {
    pub site_index: usize,
    pub counter_ion_index: usize,
    pub pka: f64,
    pub ph: f64,
    weight: f64,
    protonated: bool,
    stats: AcceptanceStatistics,
}

impl Titration {
    pub fn new(site_index: usize, counter_ion_index: usize, pka: f64, ph: f64, initially_protonated: bool, weight: f64) -> Titration {
        Titration { site_index, counter_ion_index, pka, ph, weight, protonated: initially_protonated, stats: AcceptanceStatistics::default() }
    }

    fn bias(&self) -> f64 {
        let sign = if self.protonated { 1.0 } else { -1.0 };
        sign * std::f64::consts::LN_10 * (self.ph - self.pka)
    }
}

impl Mover for Titration {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn trial_move(&mut self, space: &mut Space, _rng: &mut SmallRng) {
        let delta = if self.protonated { -1.0 } else { 1.0 };
        let state = space.trial_mut();
        let site_charge = state.particles[self.site_index].charge() + delta;
        state.particles[self.site_index].set_charge(site_charge);
        let counter_charge = state.particles[self.counter_ion_index].charge() - delta;
        state.particles[self.counter_ion_index].set_charge(counter_charge);
    }

    fn energy_change(&self, space: &Space, hamiltonian: &Hamiltonian) -> f64 {
        let before = hamiltonian.i2all(space.committed(), self.site_index)
            + hamiltonian.i2all(space.committed(), self.counter_ion_index)
            + hamiltonian.i_external(space.committed(), self.site_index)
            + hamiltonian.i_external(space.committed(), self.counter_ion_index);
        let after = hamiltonian.i2all(space.trial(), self.site_index)
            + hamiltonian.i2all(space.trial(), self.counter_ion_index)
            + hamiltonian.i_external(space.trial(), self.site_index)
            + hamiltonian.i_external(space.trial(), self.counter_ion_index);
        (after - before) + self.bias()
    }

    fn accept(&mut self, space: &mut Space) {
        self.protonated = !self.protonated;
        let (a, b) = (self.site_index, self.counter_ion_index);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        space.sync_range(lo..lo + 1);
        space.sync_range(hi..hi + 1);
    }

    fn reject(&mut self, space: &mut Space) {
        let (a, b) = (self.site_index, self.counter_ion_index);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        space.revert_range(lo..lo + 1);
        space.revert_range(hi..hi + 1);
    }

    fn info(&self) -> String {
        format!("Titration(site={}, pKa={:.2}, pH={:.2})", self.site_index, self.pka, self.ph)
    }

    fn statistics(&self) -> &AcceptanceStatistics {
        &self.stats
    }

    fn statistics_mut(&mut self) -> &mut AcceptanceStatistics {
        &mut self.stats
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
    fn accepted_toggle_flips_protonation_state() {
        let mut space = Space::new(Geometry::cuboid(Vec3::new(20.0, 20.0, 20.0)), Arc::new(AtomTable::empty()));
        space.push_group(
            vec![Particle::new(Vec3::new(0.0, 0.0, 0.0), 0.0, 0), Particle::new(Vec3::new(5.0, 0.0, 0.0), -1.0, 1)],
            0,
            None,
            0,
            GroupKind::Atomic,
        );
        let mut mover = Titration::new(0, 1, 4.0, 7.0, false, 1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        mover.trial_move(&mut space, &mut rng);
        assert_eq!(space.trial().particles[0].charge(), 1.0);
        assert_eq!(space.trial().particles[1].charge(), -2.0);
        mover.accept(&mut space);
        assert!(mover.protonated);
        assert_eq!(space.committed().particles[0].charge(), 1.0);
    }

    #[test]
    fn rejected_toggle_restores_committed_charges() {
        let mut space = Space::new(Geometry::cuboid(Vec3::new(20.0, 20.0, 20.0)), Arc::new(AtomTable::empty()));
        space.push_group(vec![Particle::new(Vec3::new(0.0, 0.0, 0.0), 0.0, 0), Particle::new(Vec3::new(5.0, 0.0, 0.0), -1.0, 1)], 0, None, 0, GroupKind::Atomic);
        let mut mover = Titration::new(0, 1, 4.0, 7.0, false, 1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        mover.trial_move(&mut space, &mut rng);
        mover.reject(&mut space);
        assert_eq!(space.trial().particles[0].charge(), 0.0);
        assert_eq!(space.trial().particles[1].charge(), -1.0);
    }
}
