use std::collections::HashMap;

use faunus_potentials::{PairParams, PairPotential};

fn normalized_key(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

/// A symmetric sparse mapping `(i,j) -> bond potential` with `i != j`; the
/// same entry is reachable as `(i,j)` or `(j,i)` (spec. 3).
pub struct BondTable<P: PairPotential> {
    bonds: HashMap<(usize, usize), P>,
}

impl<P: PairPotential> BondTable<P> {
    pub fn new() -> BondTable<P> {
        BondTable { bonds: HashMap::new() }
    }

    pub fn insert(&mut self, i: usize, j: usize, potential: P) {
        assert_ne!(i, j, "a particle cannot be bonded to itself");
        self.bonds.insert(normalized_key(i, j), potential);
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&P> {
        self.bonds.get(&normalized_key(i, j))
    }

    /// All bonds touching particle `i`.
    pub fn bonds_of<'a>(&'a self, i: usize) -> impl Iterator<Item = (usize, &'a P)> + 'a {
        self.bonds.iter().filter_map(move |(&(a, b), pot)| {
            if a == i {
                Some((b, pot))
            } else if b == i {
                Some((a, pot))
            } else {
                None
            }
        })
    }

    /// All bonds with both endpoints inside `range`.
    pub fn bonds_within<'a>(&'a self, range: std::ops::Range<usize>) -> impl Iterator<Item = (usize, usize, &'a P)> + 'a {
        self.bonds.iter().filter_map(move |(&(a, b), pot)| {
            if range.contains(&a) && range.contains(&b) {
                Some((a, b, pot))
            } else {
                None
            }
        })
    }

    pub fn energy_of_pair(&self, a: &PairParams, b: &PairParams, i: usize, j: usize, squared_distance: f64) -> f64 {
        self.get(i, j).map(|pot| pot.energy(a, b, squared_distance)).unwrap_or(0.0)
    }
}

impl<P: PairPotential> Default for BondTable<P> {
    fn default() -> Self {
        BondTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_potentials::Harmonic;

    #[test]
    fn entry_is_reachable_from_either_order() {
        let mut table = BondTable::new();
        table.insert(2, 5, Harmonic::new(10.0, 1.5));
        assert!(table.get(2, 5).is_some());
        assert!(table.get(5, 2).is_some());
        assert!(table.get(2, 6).is_none());
    }

    #[test]
    fn bonds_of_finds_both_endpoints() {
        let mut table = BondTable::new();
        table.insert(0, 1, Harmonic::new(1.0, 1.0));
        table.insert(1, 2, Harmonic::new(1.0, 1.0));
        let touching_1: Vec<usize> = table.bonds_of(1).map(|(other, _)| other).collect();
        assert_eq!(touching_1.len(), 2);
        assert!(touching_1.contains(&0));
        assert!(touching_1.contains(&2));
    }
}
