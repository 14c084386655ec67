use faunus_space::SpaceState;

use crate::energy_term::EnergyTerm;

fn sum_infinity_aware<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut total = 0.0;
    for e in values {
        if e.is_infinite() {
            return e;
        }
        total += e;
    }
    total
}

/// A heterogeneous collection of energy terms. Every query method sums the
/// same query over every enrolled term, short-circuiting to `+inf` the
/// moment any term reports it (spec. 4.7).
///
/// Terms take the `SpaceState` to evaluate as an explicit argument on every
/// call (see `EnergyTerm`), so there is no separate geometry-propagation or
/// `set_volume` step here: whichever state the caller passes already carries
/// the geometry that's current for that call.
#[derive(Default)]
pub struct Hamiltonian {
    terms: Vec<Box<dyn EnergyTerm>>,
}

impl Hamiltonian {
    pub fn new() -> Hamiltonian {
        Hamiltonian { terms: Vec::new() }
    }

    pub fn push(&mut self, term: Box<dyn EnergyTerm>) {
        self.terms.push(term);
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn p2p(&self, state: &SpaceState, a: usize, b: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.p2p(state, a, b)))
    }

    pub fn all2p(&self, state: &SpaceState, i: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.all2p(state, i)))
    }

    pub fn all2all(&self, state: &SpaceState) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.all2all(state)))
    }

    pub fn i2i(&self, state: &SpaceState, i: usize, j: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.i2i(state, i, j)))
    }

    pub fn i2g(&self, state: &SpaceState, g: usize, i: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.i2g(state, g, i)))
    }

    pub fn i2all(&self, state: &SpaceState, i: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.i2all(state, i)))
    }

    pub fn g2g(&self, state: &SpaceState, g1: usize, g2: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.g2g(state, g1, g2)))
    }

    pub fn g2all(&self, state: &SpaceState, g: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.g2all(state, g)))
    }

    pub fn i_external(&self, state: &SpaceState, i: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.i_external(state, i)))
    }

    pub fn g_external(&self, state: &SpaceState, g: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.g_external(state, g)))
    }

    pub fn external(&self, state: &SpaceState) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.external(state)))
    }

    pub fn i_internal(&self, state: &SpaceState, i: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.i_internal(state, i)))
    }

    pub fn g_internal(&self, state: &SpaceState, g: usize) -> f64 {
        sum_infinity_aware(self.terms.iter().map(|t| t.g_internal(state, g)))
    }

    /// Recomputes total system energy from scratch: all active pairs, every
    /// group's internal and external contribution, plus the system-wide
    /// external term. Used by the drift audit, which compares this against
    /// the incrementally tracked `dusum` (spec. 4.9).
    pub fn system_energy(&self, state: &SpaceState) -> f64 {
        let pairs = self.all2all(state);
        if pairs.is_infinite() {
            return pairs;
        }
        let mut total = pairs + self.external(state);
        for g in 0..state.groups.len() {
            let e = self.g_internal(state, g) + self.g_external(state, g);
            if e.is_infinite() {
                return e;
            }
            total += e;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_geometry::Geometry;
    use faunus_numerical::Vec3;
    use faunus_particle::Particle;
    use faunus_space::{Group, GroupKind};

    struct Constant(f64);
    impl EnergyTerm for Constant {
        fn all2all(&self, _state: &SpaceState) -> f64 {
            self.0
        }
    }

    struct AlwaysOverlapping;
    impl EnergyTerm for AlwaysOverlapping {
        fn all2all(&self, _state: &SpaceState) -> f64 {
            f64::INFINITY
        }
    }

    fn empty_state() -> SpaceState {
        let geometry = Geometry::cuboid(Vec3::new(10.0, 10.0, 10.0));
        let particles = vec![Particle::new(Vec3::new(0.0, 0.0, 0.0), 0.0, 0)];
        let mut group = Group::new(0, 1, 1, 0, GroupKind::Atomic);
        group.recompute_cm(&particles, &geometry, |_| 1.0);
        SpaceState { particles, groups: vec![group], geometry }
    }

    #[test]
    fn sums_contributions_from_every_term() {
        let mut hamiltonian = Hamiltonian::new();
        hamiltonian.push(Box::new(Constant(1.5)));
        hamiltonian.push(Box::new(Constant(2.5)));
        let state = empty_state();
        assert_eq!(hamiltonian.all2all(&state), 4.0);
    }

    #[test]
    fn infinite_term_short_circuits_the_sum() {
        let mut hamiltonian = Hamiltonian::new();
        hamiltonian.push(Box::new(Constant(1.0)));
        hamiltonian.push(Box::new(AlwaysOverlapping));
        let state = empty_state();
        assert!(hamiltonian.all2all(&state).is_infinite());
    }

    #[test]
    fn empty_hamiltonian_reports_zero_everywhere() {
        let hamiltonian = Hamiltonian::new();
        let state = empty_state();
        assert_eq!(hamiltonian.system_energy(&state), 0.0);
    }

    #[test]
    fn system_energy_includes_pairwise_and_group_contributions() {
        let mut hamiltonian = Hamiltonian::new();
        hamiltonian.push(Box::new(Constant(3.0)));
        let state = empty_state();
        assert_eq!(hamiltonian.system_energy(&state), 3.0);
    }
}
