use log::warn;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::acceptance_criterion::AcceptanceCriterion;

/// Classical Metropolis acceptance criterion, operating directly on energies
/// already expressed in units of `kT` (spec. 6 Units): accept if `ΔU ≤ 0`,
/// otherwise accept with probability `exp(−ΔU)`.
///
/// `ΔU = +∞` (an overlap) is always rejected. `ΔU = NaN` is rejected and
/// logged — it indicates a bug upstream, not a legitimate domain value.
pub struct MetropolisCriterion {
    rng: SmallRng,
}

impl MetropolisCriterion {
    pub fn new(seed: u64) -> MetropolisCriterion {
        MetropolisCriterion { rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> MetropolisCriterion {
        MetropolisCriterion { rng: SmallRng::from_entropy() }
    }
}

impl AcceptanceCriterion for MetropolisCriterion {
    fn check(&mut self, delta_u: f64) -> bool {
        if delta_u.is_nan() {
            warn!("rejecting a move whose energy change evaluated to NaN");
            return false;
        }
        if delta_u <= 0.0 {
            return true;
        }
        if delta_u.is_infinite() {
            return false;
        }
        self.rng.gen_range(0.0..1.0) < (-delta_u).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_accepts_non_positive_delta_u() {
        let mut crit = MetropolisCriterion::new(1);
        assert!(crit.check(0.0));
        assert!(crit.check(-5.0));
    }

    #[test]
    fn always_rejects_infinite_delta_u() {
        let mut crit = MetropolisCriterion::new(1);
        assert!(!crit.check(f64::INFINITY));
    }

    #[test]
    fn always_rejects_nan_delta_u() {
        let mut crit = MetropolisCriterion::new(1);
        assert!(!crit.check(f64::NAN));
    }

    #[test]
    fn same_seed_reproduces_the_same_accept_reject_sequence() {
        let mut a = MetropolisCriterion::new(42);
        let mut b = MetropolisCriterion::new(42);
        let outcomes_a: Vec<bool> = (0..20).map(|_| a.check(2.0)).collect();
        let outcomes_b: Vec<bool> = (0..20).map(|_| b.check(2.0)).collect();
        assert_eq!(outcomes_a, outcomes_b);
    }
}
