use std::sync::Arc;

use faunus_particle::AtomTable;
use faunus_potentials::{PairParams, PairPotential};
use faunus_space::SpaceState;

use crate::energy_term::EnergyTerm;

fn pair_params(table: &AtomTable, state: &SpaceState, index: usize) -> PairParams {
    let particle = &state.particles[index];
    let radius = table.by_id(particle.id()).map(|t| t.radius).unwrap_or(0.0);
    PairParams::new(radius, particle.charge())
}

/// All-pairs nonbonded energy: enumerates pairs skipping self-interaction,
/// and skipping pairs fully inside the same group when evaluated at group
/// granularity (spec. 4.6).
pub struct Nonbonded<P: PairPotential> {
    potential: P,
    atom_table: Arc<AtomTable>,
}

impl<P: PairPotential> Nonbonded<P> {
    pub fn new(potential: P, atom_table: Arc<AtomTable>) -> Nonbonded<P> {
        Nonbonded { potential, atom_table }
    }

    fn pair_energy(&self, state: &SpaceState, i: usize, j: usize) -> f64 {
        let a = pair_params(&self.atom_table, state, i);
        let b = pair_params(&self.atom_table, state, j);
        let d2 = state.geometry.sqdist(state.particles[i].pos(), state.particles[j].pos());
        self.potential.energy(&a, &b, d2)
    }

    fn active_indices(state: &SpaceState) -> impl Iterator<Item = usize> + '_ {
        state.groups.iter().flat_map(|g| g.active_range())
    }
}

impl<P: PairPotential> EnergyTerm for Nonbonded<P> {
    fn p2p(&self, state: &SpaceState, a: usize, b: usize) -> f64 {
        if a == b {
            return 0.0;
        }
        self.pair_energy(state, a, b)
    }

    fn all2p(&self, state: &SpaceState, i: usize) -> f64 {
        let mut total = 0.0;
        for j in Self::active_indices(state) {
            if j == i {
                continue;
            }
            let e = self.pair_energy(state, i, j);
            if e.is_infinite() {
                return e;
            }
            total += e;
        }
        total
    }

    fn all2all(&self, state: &SpaceState) -> f64 {
        let indices: Vec<usize> = Self::active_indices(state).collect();
        let mut total = 0.0;
        for (pos, &i) in indices.iter().enumerate() {
            for &j in &indices[pos + 1..] {
                let e = self.pair_energy(state, i, j);
                if e.is_infinite() {
                    return e;
                }
                total += e;
            }
        }
        total
    }

    fn i2g(&self, state: &SpaceState, g: usize, i: usize) -> f64 {
        let mut total = 0.0;
        for j in state.groups[g].active_range() {
            if j == i {
                continue;
            }
            let e = self.pair_energy(state, i, j);
            if e.is_infinite() {
                return e;
            }
            total += e;
        }
        total
    }

    /// `O(|g1|*|g2|)` sum over every pair with one particle in each group.
    /// Single-threaded here; the engine's concurrency notes call for a
    /// parallel-reduction primitive over this same disjoint pair space in
    /// place of the original OpenMP loop, with identical results.
    fn g2g(&self, state: &SpaceState, g1: usize, g2: usize) -> f64 {
        let mut total = 0.0;
        for i in state.groups[g1].active_range() {
            for j in state.groups[g2].active_range() {
                let e = self.pair_energy(state, i, j);
                if e.is_infinite() {
                    return e;
                }
                total += e;
            }
        }
        total
    }

    /// Scans every other group's full active range — not just its first
    /// particle — so an overlap anywhere is found and reported as `+inf`.
    fn g2all(&self, state: &SpaceState, g: usize) -> f64 {
        let mut total = 0.0;
        for (h, _) in state.groups.iter().enumerate() {
            if h == g {
                continue;
            }
            let e = self.g2g(state, g, h);
            if e.is_infinite() {
                return e;
            }
            total += e;
        }
        total
    }
}

/// Coarse-grained nonbonded energy: treats each molecular group as a single
/// site located at its center of mass, for systems where atomistic detail
/// inside a group doesn't matter to a particular interaction.
///
/// Evaluation takes the `SpaceState` the caller passes — trial or committed
/// — rather than holding a reference to one internally, so there is no risk
/// of silently reading stale state during a move (see crate docs).
pub struct NonbondedCG<P: PairPotential> {
    potential: P,
    params_by_molecule: Vec<PairParams>,
}

impl<P: PairPotential> NonbondedCG<P> {
    pub fn new(potential: P, params_by_molecule: Vec<PairParams>) -> NonbondedCG<P> {
        NonbondedCG { potential, params_by_molecule }
    }
}

impl<P: PairPotential> EnergyTerm for NonbondedCG<P> {
    fn g2g(&self, state: &SpaceState, g1: usize, g2: usize) -> f64 {
        let group1 = &state.groups[g1];
        let group2 = &state.groups[g2];
        let d2 = state.geometry.sqdist(group1.cm(), group2.cm());
        let a = self.params_by_molecule[group1.molecule_id()];
        let b = self.params_by_molecule[group2.molecule_id()];
        self.potential.energy(&a, &b, d2)
    }

    fn g2all(&self, state: &SpaceState, g: usize) -> f64 {
        let mut total = 0.0;
        for h in 0..state.groups.len() {
            if h == g {
                continue;
            }
            let e = self.g2g(state, g, h);
            if e.is_infinite() {
                return e;
            }
            total += e;
        }
        total
    }
}
