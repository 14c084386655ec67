use crate::pair_potential::{PairParams, PairPotential};

/// `½k(r-r0)²`. Used both as a generic pair potential and (via
/// `faunus-energy`'s bond table) as a bond-stretch term.
#[derive(Clone, Copy, Debug)]
pub struct Harmonic {
    pub k: f64,
    pub r0: f64,
}

impl Harmonic {
    pub fn new(k: f64, r0: f64) -> Harmonic {
        Harmonic { k, r0 }
    }
}

impl PairPotential for Harmonic {
    fn energy(&self, _a: &PairParams, _b: &PairParams, squared_distance: f64) -> f64 {
        let r = squared_distance.sqrt();
        let dr = r - self.r0;
        0.5 * self.k * dr * dr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_equilibrium_distance() {
        let pot = Harmonic::new(10.0, 2.0);
        let dummy = PairParams::new(0.0, 0.0);
        assert!(pot.energy(&dummy, &dummy, 4.0).abs() < 1e-12);
    }

    #[test]
    fn grows_quadratically_away_from_equilibrium() {
        let pot = Harmonic::new(2.0, 1.0);
        let dummy = PairParams::new(0.0, 0.0);
        assert!((pot.energy(&dummy, &dummy, 4.0) - 1.0).abs() < 1e-12);
    }
}
