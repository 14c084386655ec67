use std::sync::Arc;

use faunus_particle::AtomTable;
use faunus_potentials::{PairParams, PairPotential};
use faunus_space::SpaceState;

use crate::bond_table::BondTable;
use crate::energy_term::EnergyTerm;

fn pair_params(table: &AtomTable, state: &SpaceState, index: usize) -> PairParams {
    let particle = &state.particles[index];
    let radius = table.by_id(particle.id()).map(|t| t.radius).unwrap_or(0.0);
    PairParams::new(radius, particle.charge())
}

/// Consults the bond table: `i2all` sums every bond touching `i`, `g_internal`
/// sums bonds with both endpoints inside `g` (spec. 4.6).
pub struct Bonded<P: PairPotential> {
    bonds: BondTable<P>,
    atom_table: Arc<AtomTable>,
}

impl<P: PairPotential> Bonded<P> {
    pub fn new(bonds: BondTable<P>, atom_table: Arc<AtomTable>) -> Bonded<P> {
        Bonded { bonds, atom_table }
    }
}

impl<P: PairPotential> EnergyTerm for Bonded<P> {
    fn p2p(&self, state: &SpaceState, a: usize, b: usize) -> f64 {
        match self.bonds.get(a, b) {
            Some(pot) => {
                let pa = pair_params(&self.atom_table, state, a);
                let pb = pair_params(&self.atom_table, state, b);
                let d2 = state.geometry.sqdist(state.particles[a].pos(), state.particles[b].pos());
                pot.energy(&pa, &pb, d2)
            }
            None => 0.0,
        }
    }

    fn i2all(&self, state: &SpaceState, i: usize) -> f64 {
        self.bonds.bonds_of(i).map(|(j, pot)| {
            let pa = pair_params(&self.atom_table, state, i);
            let pb = pair_params(&self.atom_table, state, j);
            let d2 = state.geometry.sqdist(state.particles[i].pos(), state.particles[j].pos());
            pot.energy(&pa, &pb, d2)
        }).sum()
    }

    fn g_internal(&self, state: &SpaceState, g: usize) -> f64 {
        let range = state.groups[g].active_range();
        self.bonds.bonds_within(range).map(|(i, j, pot)| {
            let pa = pair_params(&self.atom_table, state, i);
            let pb = pair_params(&self.atom_table, state, j);
            let d2 = state.geometry.sqdist(state.particles[i].pos(), state.particles[j].pos());
            pot.energy(&pa, &pb, d2)
        }).sum()
    }
}
