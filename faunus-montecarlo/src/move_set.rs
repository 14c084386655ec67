use rand::rngs::SmallRng;
use rand::Rng;

use faunus_energy::Hamiltonian;
use faunus_space::Space;
use log::{info, warn};

use crate::acceptance_criterion::AcceptanceCriterion;
use crate::errors::MonteCarloError;
use crate::mover::Mover;
use crate::observer::ObserversSet;

/// An ordered list of moves with weights (spec. 4.9). Every macro step draws
/// one mover with probability proportional to its weight and runs it once.
pub struct WeightedMoveSet {
    movers: Vec<Box<dyn Mover>>,
    cumulative_weights: Vec<f64>,
    dusum: f64,
}

impl WeightedMoveSet {
    pub fn new() -> WeightedMoveSet {
        WeightedMoveSet { movers: Vec::new(), cumulative_weights: Vec::new(), dusum: 0.0 }
    }

    pub fn add_mover(&mut self, mover: Box<dyn Mover>) {
        let weight = mover.weight();
        let prev = self.cumulative_weights.last().copied().unwrap_or(0.0);
        self.cumulative_weights.push(prev + weight);
        self.movers.push(mover);
    }

    pub fn count_movers(&self) -> usize {
        self.movers.len()
    }

    pub fn get_mover(&self, which: usize) -> &dyn Mover {
        self.movers[which].as_ref()
    }

    pub fn get_mover_mut(&mut self, which: usize) -> &mut Box<dyn Mover> {
        &mut self.movers[which]
    }

    /// Energy bookkeeping accumulated over accepted moves since creation.
    pub fn dusum(&self) -> f64 {
        self.dusum
    }

    fn pick(&self, rng: &mut SmallRng) -> Result<usize, MonteCarloError> {
        let total = *self.cumulative_weights.last().ok_or(MonteCarloError::NoMovers)?;
        let x = rng.gen_range(0.0..total);
        Ok(self.cumulative_weights.iter().position(|&cum| x < cum).unwrap_or(self.movers.len() - 1))
    }

    /// Draws one mover by weight and runs `do_move` on it, accumulating `dusum`.
    pub fn macro_step(
        &mut self,
        space: &mut Space,
        hamiltonian: &Hamiltonian,
        criterion: &mut dyn AcceptanceCriterion,
        rng: &mut SmallRng,
    ) -> Result<(), MonteCarloError> {
        let i = self.pick(rng)?;
        let delta_u = self.movers[i].do_move(space, hamiltonian, criterion, rng);
        self.dusum += delta_u;
        Ok(())
    }

    pub fn make_sweeps(
        &mut self,
        n: usize,
        space: &mut Space,
        hamiltonian: &Hamiltonian,
        criterion: &mut dyn AcceptanceCriterion,
        rng: &mut SmallRng,
    ) -> Result<(), MonteCarloError> {
        for _ in 0..n {
            self.macro_step(space, hamiltonian, criterion, rng)?;
        }
        Ok(())
    }

    /// Recomputes total energy from scratch and compares it to `u0 + dusum`;
    /// returns the absolute drift. Called periodically by `run_simulation`
    /// and by the front-end's own audit cadence (spec. 4.9, 7).
    pub fn audit_drift(&self, space: &Space, hamiltonian: &Hamiltonian, u0: f64) -> f64 {
        let tracked = u0 + self.dusum;
        let recomputed = hamiltonian.system_energy(space.committed());
        (recomputed - tracked).abs()
    }

    /// Runs `n_outer` rounds of `n_inner` macro steps, taking observations
    /// after each round and auditing drift every `audit_every` rounds.
    /// Returns the final drift magnitude so the caller can decide whether it
    /// exceeds the configured threshold (spec. 7: non-fatal unless `--strict`).
    pub fn run_simulation(
        &mut self,
        n_inner: usize,
        n_outer: usize,
        audit_every: usize,
        u0: f64,
        space: &mut Space,
        hamiltonian: &Hamiltonian,
        criterion: &mut dyn AcceptanceCriterion,
        rng: &mut SmallRng,
        observers: &mut ObserversSet,
    ) -> Result<f64, MonteCarloError> {
        let mut last_drift = 0.0;
        for round in 0..n_outer {
            self.make_sweeps(n_inner, space, hamiltonian, criterion, rng)?;
            observers.observe(space);
            if audit_every > 0 && round % audit_every == 0 {
                last_drift = self.audit_drift(space, hamiltonian, u0);
                if last_drift > 1e-3 {
                    warn!("energy drift at round {round}: {last_drift:.6} kT");
                } else {
                    info!("round {round}: drift {last_drift:.6} kT");
                }
            }
        }
        observers.flush_observers();
        Ok(last_drift)
    }
}

impl Default for WeightedMoveSet {
    fn default() -> Self {
        WeightedMoveSet::new()
    }
}
