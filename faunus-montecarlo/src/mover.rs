use rand::rngs::SmallRng;

use faunus_energy::Hamiltonian;
use faunus_space::Space;

use crate::acceptance_criterion::AcceptanceCriterion;
use crate::acceptance_statistics::AcceptanceStatistics;

/// A Monte Carlo move: perturbs the trial state, reports the resulting
/// energy change, and commits or discards the perturbation (spec. 4.8).
///
/// `do_move` is the non-virtual wrapper every mover gets for free: it runs
/// `trial_move`, computes `ΔU`, consults the acceptance criterion, dispatches
/// to `accept`/`reject`, and updates this mover's acceptance bookkeeping.
/// Implementors only need the four primitive steps.
pub trait Mover {
    /// Relative weight used by the move set when drawing a mover at random.
    fn weight(&self) -> f64;

    /// Mutates `space.trial_mut()` in place.
    fn trial_move(&mut self, space: &mut Space, rng: &mut SmallRng);

    /// `U(trial) - U(committed)` for whatever subset of the system this
    /// mover touched.
    fn energy_change(&self, space: &Space, hamiltonian: &Hamiltonian) -> f64;

    /// Merges the accepted trial perturbation back into the committed state.
    fn accept(&mut self, space: &mut Space);

    /// Restores the trial state to match committed, discarding the perturbation.
    fn reject(&mut self, space: &mut Space);

    /// One-line description for logging/diagnostics.
    fn info(&self) -> String;

    fn statistics(&self) -> &AcceptanceStatistics;
    fn statistics_mut(&mut self) -> &mut AcceptanceStatistics;

    /// Maximum perturbation range, for movers an [`AdaptiveProtocol`](crate::adaptive_protocol::AdaptiveProtocol)
    /// can tune. Movers without a tunable range (e.g. grand-canonical or
    /// titration moves) keep the default, which the adaptive protocol leaves alone.
    fn max_range(&self) -> Option<f64> {
        None
    }

    fn set_max_range(&mut self, _new_value: f64) {}

    fn do_move(
        &mut self,
        space: &mut Space,
        hamiltonian: &Hamiltonian,
        criterion: &mut dyn AcceptanceCriterion,
        rng: &mut SmallRng,
    ) -> f64 {
        self.trial_move(space, rng);
        let delta_u = self.energy_change(space, hamiltonian);
        if criterion.check(delta_u) {
            self.accept(space);
            self.statistics_mut().n_succ += 1;
            delta_u
        } else {
            self.reject(space);
            self.statistics_mut().n_failed += 1;
            0.0
        }
    }
}
