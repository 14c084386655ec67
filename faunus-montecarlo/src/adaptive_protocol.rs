use std::ops::Range;

use rand::rngs::SmallRng;

use faunus_energy::Hamiltonian;
use faunus_space::Space;

use crate::acceptance_criterion::AcceptanceCriterion;
use crate::acceptance_statistics::AcceptanceStatistics;
use crate::errors::MonteCarloError;
use crate::move_set::WeightedMoveSet;

/// Wraps a [`WeightedMoveSet`] and retunes each tunable mover's `max_range`
/// after every round of sweeps, nudging its acceptance rate toward
/// `target_rate` while keeping the range within `initial_range * [0.5, 4.0]`.
pub struct AdaptiveProtocol {
    pub target_rate: f64,
    pub factor: f64,
    move_set: WeightedMoveSet,
    allowed_ranges: Vec<Option<Range<f64>>>,
}

impl AdaptiveProtocol {
    pub fn new(move_set: WeightedMoveSet) -> AdaptiveProtocol {
        let allowed_ranges = (0..move_set.count_movers())
            .map(|i| move_set.get_mover(i).max_range().map(|r| r * 0.5..r * 4.0))
            .collect();
        AdaptiveProtocol { target_rate: 0.4, factor: 0.95, move_set, allowed_ranges }
    }

    pub fn into_move_set(self) -> WeightedMoveSet {
        self.move_set
    }

    pub fn move_set(&mut self) -> &mut WeightedMoveSet {
        &mut self.move_set
    }

    pub fn make_sweeps(
        &mut self,
        n: usize,
        space: &mut Space,
        hamiltonian: &Hamiltonian,
        criterion: &mut dyn AcceptanceCriterion,
        rng: &mut SmallRng,
    ) -> Result<(), MonteCarloError> {
        let before: Vec<AcceptanceStatistics> =
            (0..self.move_set.count_movers()).map(|i| self.move_set.get_mover(i).statistics().clone()).collect();

        self.move_set.make_sweeps(n, space, hamiltonian, criterion, rng)?;

        for i in 0..self.move_set.count_movers() {
            let allowed = match &self.allowed_ranges[i] {
                Some(r) => r.clone(),
                None => continue,
            };
            let after = self.move_set.get_mover(i).statistics().clone();
            let rate = after.recent_success_rate(&before[i]);

            let mover = self.move_set.get_mover_mut(i);
            let mut range = match mover.max_range() {
                Some(r) => r,
                None => continue,
            };
            if rate < self.target_rate - 0.05 {
                range *= self.factor;
            }
            if rate > self.target_rate + 0.05 {
                range /= self.factor;
            }
            range = range.clamp(allowed.start, allowed.end);
            mover.set_max_range(range);
        }
        Ok(())
    }
}
