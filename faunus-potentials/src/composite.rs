use crate::pair_potential::{PairParams, PairPotential};

/// Sums any number of pair potentials into one (e.g. hard sphere + Coulomb).
pub struct CompositePotential {
    terms: Vec<Box<dyn PairPotential>>,
}

impl CompositePotential {
    pub fn new() -> CompositePotential {
        CompositePotential { terms: Vec::new() }
    }

    pub fn push(mut self, term: Box<dyn PairPotential>) -> CompositePotential {
        self.terms.push(term);
        self
    }
}

impl Default for CompositePotential {
    fn default() -> Self {
        CompositePotential::new()
    }
}

impl PairPotential for CompositePotential {
    fn energy(&self, a: &PairParams, b: &PairParams, squared_distance: f64) -> f64 {
        let mut total = 0.0;
        for term in &self.terms {
            let e = term.energy(a, b, squared_distance);
            if e.is_infinite() {
                return e;
            }
            total += e;
        }
        total
    }
}
