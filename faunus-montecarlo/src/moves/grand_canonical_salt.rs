use rand::rngs::SmallRng;
use rand::Rng;

use faunus_energy::Hamiltonian;
use faunus_particle::Particle;
use faunus_space::Space;

use crate::acceptance_statistics::AcceptanceStatistics;
use crate::mover::Mover;

#[derive(Clone, Copy)]
enum Attempt {
    Insertion { cation_index: usize, anion_index: usize },
    Deletion { cation_index: usize, anion_index: usize, n_cation_before: usize, n_anion_before: usize },
    Infeasible,
}

/// Grand-canonical salt bath (gcbath): attempts, with equal probability, to
/// insert a neutral cation/anion pair at uniform-random positions or delete
/// one existing pair chosen uniformly from the group's active members of
/// each id (spec. 4.8).
///
/// Requires `group` to have pre-reserved inactive capacity — insertion only
/// ever activates slots already reserved at load time, never grows the
/// particle array.
pub struct GrandCanonicalSalt {
    pub group: usize,
    pub cation_id: usize,
    pub anion_id: usize,
    pub cation_charge: f64,
    pub anion_charge: f64,
    pub cation_activity: f64,
    pub anion_activity: f64,
    weight: f64,
    stats: AcceptanceStatistics,
    attempt: Attempt,
}

impl GrandCanonicalSalt {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        group: usize,
        cation_id: usize,
        anion_id: usize,
        cation_charge: f64,
        anion_charge: f64,
        cation_activity: f64,
        anion_activity: f64,
        weight: f64,
    ) -> GrandCanonicalSalt {
        GrandCanonicalSalt {
            group,
            cation_id,
            anion_id,
            cation_charge,
            anion_charge,
            cation_activity,
            anion_activity,
            weight,
            stats: AcceptanceStatistics::default(),
            attempt: Attempt::Infeasible,
        }
    }

    fn species_counts(&self, space: &Space) -> (usize, usize) {
        let group = &space.trial().groups[self.group];
        let n_cation = group.find_id(&space.trial().particles, self.cation_id).count();
        let n_anion = group.find_id(&space.trial().particles, self.anion_id).count();
        (n_cation, n_anion)
    }
}

impl Mover for GrandCanonicalSalt {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn trial_move(&mut self, space: &mut Space, rng: &mut SmallRng) {
        let (n_cation, n_anion) = self.species_counts(space);
        let insert = rng.gen_bool(0.5);

        self.attempt = if insert {
            let state = space.trial_mut();
            let group = &mut state.groups[self.group];
            let first = group.end();
            if first + 2 > group.end_cap() {
                Attempt::Infeasible
            } else {
                let cation_pos = state.geometry.random_inside(rng);
                let anion_pos = state.geometry.random_inside(rng);
                state.particles[first] = Particle::new(cation_pos, self.cation_charge, self.cation_id);
                state.particles[first + 1] = Particle::new(anion_pos, self.anion_charge, self.anion_id);
                match state.groups[self.group].activate(first, first + 2) {
                    Ok(()) => Attempt::Insertion { cation_index: first, anion_index: first + 1 },
                    Err(_) => Attempt::Infeasible,
                }
            }
        } else if n_cation == 0 || n_anion == 0 {
            Attempt::Infeasible
        } else {
            let group = &space.trial().groups[self.group];
            let cation_index = group.find_id(&space.trial().particles, self.cation_id).nth(rng.gen_range(0..n_cation)).unwrap();
            let anion_index = group.find_id(&space.trial().particles, self.anion_id).nth(rng.gen_range(0..n_anion)).unwrap();

            // Deactivate the higher index first: if it's the particle that
            // ends up swapped into the lower index's slot, re-resolve the
            // lower index to follow it.
            let state = space.trial_mut();
            let group = &mut state.groups[self.group];
            let old_end = group.end();
            let (hi, lo, hi_is_cation) =
                if cation_index > anion_index { (cation_index, anion_index, true) } else { (anion_index, cation_index, false) };
            group.deactivate(&mut state.particles, hi, hi + 1).expect("hi index must be active");
            let lo = if lo == old_end - 1 { hi } else { lo };
            group.deactivate(&mut state.particles, lo, lo + 1).expect("lo index must be active");

            let (cation_index, anion_index) = if hi_is_cation { (hi, lo) } else { (lo, hi) };
            Attempt::Deletion { cation_index, anion_index, n_cation_before: n_cation, n_anion_before: n_anion }
        };
    }

    fn energy_change(&self, space: &Space, hamiltonian: &Hamiltonian) -> f64 {
        let v = space.trial().geometry.volume();
        match self.attempt {
            Attempt::Infeasible => f64::INFINITY,
            Attempt::Insertion { cation_index, anion_index } => {
                let (n_cation, n_anion) = self.species_counts(space);
                // cation-anion interaction is counted once by each `i2all`, so subtract it back out
                let u_nb = hamiltonian.i2all(space.trial(), cation_index)
                    + hamiltonian.i2all(space.trial(), anion_index)
                    - hamiltonian.p2p(space.trial(), cation_index, anion_index)
                    + hamiltonian.i_external(space.trial(), cation_index)
                    + hamiltonian.i_external(space.trial(), anion_index);
                let kappa = self.cation_activity * self.anion_activity * v * v / (n_cation as f64 * n_anion as f64);
                u_nb - kappa.ln()
            }
            Attempt::Deletion { cation_index, anion_index, n_cation_before, n_anion_before } => {
                let u_nb = hamiltonian.i2all(space.committed(), cation_index)
                    + hamiltonian.i2all(space.committed(), anion_index)
                    - hamiltonian.p2p(space.committed(), cation_index, anion_index)
                    + hamiltonian.i_external(space.committed(), cation_index)
                    + hamiltonian.i_external(space.committed(), anion_index);
                let kappa = (n_cation_before as f64 * n_anion_before as f64) / (self.cation_activity * self.anion_activity * v * v);
                -u_nb - kappa.ln()
            }
        }
    }

    fn accept(&mut self, space: &mut Space) {
        match self.attempt {
            Attempt::Infeasible => {}
            Attempt::Insertion { .. } => {
                space.sync_group(self.group).expect("gc salt group must exist");
            }
            Attempt::Deletion { .. } => {
                space.sync_group(self.group).expect("gc salt group must exist");
            }
        }
    }

    fn reject(&mut self, space: &mut Space) {
        if !matches!(self.attempt, Attempt::Infeasible) {
            space.revert_group(self.group).expect("gc salt group must exist");
        }
    }

    fn info(&self) -> String {
        format!("GrandCanonicalSalt(group={}, cation={}, anion={})", self.group, self.cation_id, self.anion_id)
    }

    fn statistics(&self) -> &AcceptanceStatistics {
        &self.stats
    }

    fn statistics_mut(&mut self) -> &mut AcceptanceStatistics {
        &mut self.stats
    }
}
