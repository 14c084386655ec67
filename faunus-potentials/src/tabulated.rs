use crate::pair_potential::{PairParams, PairPotential};

/// Precomputes a wrapped potential on an evenly spaced grid of squared
/// distances and answers queries by linear interpolation, for hot inner
/// loops where the direct evaluation (e.g. `erfc`) is too slow to call
/// millions of times per sweep.
///
/// Built per a single `(PairParams, PairParams)` combination, since the
/// table only has one distance axis — a caller with more than one atom-type
/// pair keeps one `Tabulated` per pair.
pub struct Tabulated {
    table: Vec<f64>,
    squared_distance_max: f64,
    bin_width: f64,
    to_kt: f64,
}

impl Tabulated {
    pub fn build<P: PairPotential>(potential: &P, a: &PairParams, b: &PairParams, squared_distance_max: f64, n_points: usize) -> Tabulated {
        let bin_width = squared_distance_max / (n_points as f64 - 1.0);
        let table = (0..n_points)
            .map(|i| {
                let d2 = (i as f64 * bin_width).max(1e-12);
                potential.energy(a, b, d2)
            })
            .collect();
        Tabulated { table, squared_distance_max, bin_width, to_kt: potential.to_kT() }
    }

    fn lookup(&self, squared_distance: f64) -> f64 {
        if squared_distance >= self.squared_distance_max {
            return 0.0;
        }
        let pos = squared_distance / self.bin_width;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(self.table.len() - 1);
        let frac = pos - lo as f64;
        let e_lo = self.table[lo];
        let e_hi = self.table[hi];
        if e_lo.is_infinite() || e_hi.is_infinite() {
            return if frac < 0.5 { e_lo } else { e_hi };
        }
        e_lo + frac * (e_hi - e_lo)
    }
}

impl PairPotential for Tabulated {
    fn energy(&self, _a: &PairParams, _b: &PairParams, squared_distance: f64) -> f64 {
        self.lookup(squared_distance)
    }

    fn to_kT(&self) -> f64 {
        self.to_kt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lennard_jones::LennardJones;

    #[test]
    fn reproduces_direct_evaluation_within_tolerance() {
        let lj = LennardJones::new(1.0, 5.0);
        let p = PairParams::new(0.5, 0.0);
        let table = Tabulated::build(&lj, &p, &p, 25.0, 2000);

        for r in [1.05, 1.3, 2.0, 3.0, 4.5] {
            let direct = lj.energy(&p, &p, r * r);
            let tabulated = table.energy(&p, &p, r * r);
            assert!((direct - tabulated).abs() < 1e-3, "r={} direct={} tabulated={}", r, direct, tabulated);
        }
    }
}
