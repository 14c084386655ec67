use faunus_space::SpaceState;

/// The common contract every energy term exposes: each term implements only
/// the subset of these operations that applies to it, the rest keep their
/// default of zero (spec. 4.6).
///
/// Every method takes `&SpaceState` explicitly rather than holding on to a
/// trial-or-committed reference internally, so a term can never accidentally
/// hardcode which state it looks at — the caller decides every time.
pub trait EnergyTerm {
    /// Energy between two individual particles.
    fn p2p(&self, _state: &SpaceState, _a: usize, _b: usize) -> f64 {
        0.0
    }

    /// Energy between particle `i` and every other active particle.
    fn all2p(&self, _state: &SpaceState, _i: usize) -> f64 {
        0.0
    }

    /// Total energy summed over every active pair in the system.
    fn all2all(&self, _state: &SpaceState) -> f64 {
        0.0
    }

    /// Alias of `p2p` used when the caller's mental model is "two specific
    /// particles" rather than "a pair".
    fn i2i(&self, state: &SpaceState, i: usize, j: usize) -> f64 {
        self.p2p(state, i, j)
    }

    /// Energy between particle `i` and every active particle in group `g`
    /// (excluding `i` itself, if it happens to live in `g`).
    fn i2g(&self, _state: &SpaceState, _g: usize, _i: usize) -> f64 {
        0.0
    }

    /// Alias of `all2p`.
    fn i2all(&self, state: &SpaceState, i: usize) -> f64 {
        self.all2p(state, i)
    }

    /// Energy between two (normally disjoint) groups.
    fn g2g(&self, _state: &SpaceState, _g1: usize, _g2: usize) -> f64 {
        0.0
    }

    /// Energy between group `g` and every other group in the system.
    fn g2all(&self, _state: &SpaceState, _g: usize) -> f64 {
        0.0
    }

    /// System-independent, particle-local external contribution (e.g. an
    /// external field).
    fn i_external(&self, _state: &SpaceState, _i: usize) -> f64 {
        0.0
    }

    /// Group-local external contribution (e.g. confinement).
    fn g_external(&self, _state: &SpaceState, _g: usize) -> f64 {
        0.0
    }

    /// System-wide external contribution independent of any one particle or
    /// group (e.g. `PV/kT - ln V`).
    fn external(&self, _state: &SpaceState) -> f64 {
        0.0
    }

    /// Internal energy associated with a single particle (rarely used).
    fn i_internal(&self, _state: &SpaceState, _i: usize) -> f64 {
        0.0
    }

    /// Internal energy of bonds/terms fully contained within group `g`.
    fn g_internal(&self, _state: &SpaceState, _g: usize) -> f64 {
        0.0
    }
}
