use crate::pair_potential::{PairParams, PairPotential};

/// `4ε[(σ/r)^12 - (σ/r)^6]` with a hard cutoff, generalized from the
/// original homogenic (single epsilon/sigma pair) implementation to combine
/// each particle's own radius via the Lorentz-Berthelot rule.
#[derive(Clone, Copy, Debug)]
pub struct LennardJones {
    pub epsilon: f64,
    cutoff_sq: f64,
}

impl LennardJones {
    pub fn new(epsilon: f64, cutoff: f64) -> LennardJones {
        LennardJones { epsilon, cutoff_sq: cutoff * cutoff }
    }
}

impl PairPotential for LennardJones {
    fn energy(&self, a: &PairParams, b: &PairParams, squared_distance: f64) -> f64 {
        if squared_distance >= self.cutoff_sq {
            return 0.0;
        }
        // Lorentz-Berthelot combining rule: sigma_ij is the arithmetic mean
        // of the two contact radii (each particle's radius is half its sigma)
        let sigma = a.radius + b.radius;
        let r2_s = sigma * sigma / squared_distance;
        let r6 = r2_s * r2_s * r2_s;
        let r12 = r6 * r6;
        4.0 * self.epsilon * (r12 - r6)
    }
}
