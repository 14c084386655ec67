use serde::{Deserialize, Serialize};

use crate::pair_potential::{PairParams, PairPotential};

/// How the `1/r` Coulomb tail is split between a short-range real-space part
/// (what this potential evaluates) and a long-range part handled elsewhere,
/// or truncated outright.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Splitting {
    /// Unmodified `1/r`, hard cutoff at `rc`.
    Plain { cutoff: f64 },
    /// Ewald real-space part: `erfc(alpha·r)/r`, the reciprocal-space sum is
    /// out of scope for the pairwise evaluator and handled by the energy
    /// term that owns the full particle set.
    Ewald { alpha: f64, cutoff: f64 },
    /// Wolf summation: damped and shifted so the potential and its value at
    /// the cutoff vanish together.
    Wolf { alpha: f64, cutoff: f64 },
    /// Reaction field: treats everything beyond `cutoff` as a dielectric
    /// continuum of relative permittivity `epsilon_rf`.
    ReactionField { epsilon_rf: f64, cutoff: f64 },
}

impl Splitting {
    fn cutoff(&self) -> f64 {
        match self {
            Splitting::Plain { cutoff }
            | Splitting::Ewald { cutoff, .. }
            | Splitting::Wolf { cutoff, .. }
            | Splitting::ReactionField { cutoff, .. } => *cutoff,
        }
    }
}

/// Coulomb interaction `bjerrum_length · qa·qb / r`, short-range split per
/// [`Splitting`]. `bjerrum_length` folds in the vacuum/solvent permittivity
/// and `e²/4πε₀kT` so the result comes out directly in thermal units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coulomb {
    pub bjerrum_length: f64,
    pub splitting: Splitting,
}

impl Coulomb {
    pub fn new(bjerrum_length: f64, splitting: Splitting) -> Coulomb {
        Coulomb { bjerrum_length, splitting }
    }
}

impl PairPotential for Coulomb {
    fn energy(&self, a: &PairParams, b: &PairParams, squared_distance: f64) -> f64 {
        let cutoff = self.splitting.cutoff();
        if squared_distance >= cutoff * cutoff {
            return 0.0;
        }
        let r = squared_distance.sqrt();
        let qq = self.bjerrum_length * a.charge * b.charge;

        match self.splitting {
            Splitting::Plain { .. } => qq / r,
            Splitting::Ewald { alpha, .. } => qq * libm::erfc(alpha * r) / r,
            Splitting::Wolf { alpha, cutoff } => {
                let shift = libm::erfc(alpha * cutoff) / cutoff;
                qq * (libm::erfc(alpha * r) / r - shift)
            }
            Splitting::ReactionField { epsilon_rf, cutoff } => {
                let rf_factor = (epsilon_rf - 1.0) / (2.0 * epsilon_rf + 1.0);
                qq * (1.0 / r + rf_factor * r * r / (cutoff * cutoff * cutoff))
            }
        }
    }
}
