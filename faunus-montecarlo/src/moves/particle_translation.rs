use rand::rngs::SmallRng;
use rand::Rng;

use faunus_energy::Hamiltonian;
use faunus_numerical::Vec3;
use faunus_space::Space;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::mover::Mover;

/// Displaces one particle of a group by `dp ⊙ random_half() · direction_mask`
/// and wraps it through the boundary (spec. 4.8).
///
/// Targets a uniform-random particle of `group` unless `fixed_index` (an
/// absolute particle index) is set, in which case that particle is always
/// the one moved.
pub struct ParticleTranslation {
    pub group: usize,
    pub max_displacement: f64,
    pub direction_mask: [bool; 3],
    pub fixed_index: Option<usize>,
    weight: f64,
    last_index: Option<usize>,
    stats: AcceptanceStatistics,
    mean_square_displacement: f64,
}

impl ParticleTranslation {
    pub fn new(group: usize, max_displacement: f64, direction_mask: [bool; 3], weight: f64) -> ParticleTranslation {
        ParticleTranslation {
            group,
            max_displacement,
            direction_mask,
            fixed_index: None,
            weight,
            last_index: None,
            stats: AcceptanceStatistics::default(),
            mean_square_displacement: 0.0,
        }
    }

    pub fn mean_square_displacement(&self) -> f64 {
        self.mean_square_displacement
    }
}

impl Mover for ParticleTranslation {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn trial_move(&mut self, space: &mut Space, rng: &mut SmallRng) {
        let index = self.fixed_index.unwrap_or_else(|| {
            let range = space.trial().groups[self.group].active_range();
            rng.gen_range(range)
        });
        self.last_index = Some(index);

        let mask = |enabled: bool| if enabled { rng.gen_range(-0.5..0.5) * self.max_displacement } else { 0.0 };
        let dp = Vec3::new(mask(self.direction_mask[0]), mask(self.direction_mask[1]), mask(self.direction_mask[2]));

        let state = space.trial_mut();
        let mut pos = *state.particles[index].pos() + dp;
        state.geometry.boundary(&mut pos);
        state.particles[index].set_pos(pos);
    }

    fn energy_change(&self, space: &Space, hamiltonian: &Hamiltonian) -> f64 {
        let i = self.last_index.expect("trial_move must run before energy_change");
        let before = hamiltonian.i2all(space.committed(), i) + hamiltonian.i_external(space.committed(), i);
        let after = hamiltonian.i2all(space.trial(), i) + hamiltonian.i_external(space.trial(), i);
        after - before
    }

    fn accept(&mut self, space: &mut Space) {
        let i = self.last_index.expect("trial_move must run before accept");
        let displacement = space.trial().geometry.vdist(space.trial().particles[i].pos(), space.committed().particles[i].pos());
        self.mean_square_displacement += displacement.norm_squared();
        space.sync_range(i..i + 1);
    }

    fn reject(&mut self, space: &mut Space) {
        let i = self.last_index.expect("trial_move must run before reject");
        space.revert_range(i..i + 1);
    }

    fn info(&self) -> String {
        format!("ParticleTranslation(group={}, max_displacement={:.3})", self.group, self.max_displacement)
    }

    fn statistics(&self) -> &AcceptanceStatistics {
        &self.stats
    }

    fn statistics_mut(&mut self) -> &mut AcceptanceStatistics {
        &mut self.stats
    }

    fn max_range(&self) -> Option<f64> {
        Some(self.max_displacement)
    }

    fn set_max_range(&mut self, new_value: f64) {
        self.max_displacement = new_value;
    }
}
