use std::ops::Range;
use std::sync::Arc;

use faunus_geometry::{Geometry, ScalePolicy, ScaleTransform};
use faunus_particle::{AtomTable, Particle};

use crate::errors::SpaceError;
use crate::group::{Group, GroupKind};

/// Per-particle mass used to weight a group's center of mass: the type's
/// mass from `table`, or `1.0` (an unweighted centroid) for an id the table
/// doesn't carry — e.g. the zero-charge filler particles reserved for later
/// grand-canonical activation.
fn mass_of(table: &AtomTable, particle: &Particle) -> f64 {
    table.by_id(particle.id()).map(|t| t.mass).unwrap_or(1.0)
}

/// One fully self-contained copy of the simulation: the particle array, the
/// groups partitioning it, and the container geometry. `Space` keeps two of
/// these — committed and trial — so a move can mutate the trial copy freely
/// and either merge it back or throw it away.
#[derive(Clone, Debug)]
pub struct SpaceState {
    pub particles: Vec<Particle>,
    pub groups: Vec<Group>,
    pub geometry: Geometry,
}

impl SpaceState {
    fn new(geometry: Geometry) -> SpaceState {
        SpaceState { particles: Vec::new(), groups: Vec::new(), geometry }
    }
}

/// Owns the committed and trial copies of the simulation state.
///
/// Moves read and write only `trial()`; `sync_*` merges an accepted move's
/// touched range back into the committed copy, `revert_*` throws a rejected
/// move's trial edits away by copying the committed range back over it.
/// This is the "second arena" shadow-state design called for in the
/// original engine's own notes on avoiding repeated allocation mid-run.
#[derive(Clone, Debug)]
pub struct Space {
    committed: SpaceState,
    trial: SpaceState,
    atom_table: Arc<AtomTable>,
}

impl Space {
    pub fn new(geometry: Geometry, atom_table: Arc<AtomTable>) -> Space {
        Space { committed: SpaceState::new(geometry.clone()), trial: SpaceState::new(geometry), atom_table }
    }

    pub fn committed(&self) -> &SpaceState {
        &self.committed
    }

    pub fn trial(&self) -> &SpaceState {
        &self.trial
    }

    pub fn trial_mut(&mut self) -> &mut SpaceState {
        &mut self.trial
    }

    /// Appends a new group of `active` particles, with `reserve_inactive`
    /// extra slots pre-allocated (filled from `inactive_template`, cloned)
    /// for later grand-canonical activation without ever reallocating the
    /// array mid-run.
    pub fn push_group(
        &mut self,
        active: Vec<Particle>,
        reserve_inactive: usize,
        inactive_template: Option<Particle>,
        molecule_id: usize,
        kind: GroupKind,
    ) -> usize {
        let begin = self.committed.particles.len();
        let end = begin + active.len();
        let end_cap = end + reserve_inactive;

        self.committed.particles.extend(active.iter().cloned());
        self.trial.particles.extend(active.into_iter());

        if reserve_inactive > 0 {
            let template = inactive_template.unwrap_or_else(|| {
                Particle::new(faunus_numerical::Vec3::zero(), 0.0, 0)
            });
            self.committed.particles.extend(std::iter::repeat(template.clone()).take(reserve_inactive));
            self.trial.particles.extend(std::iter::repeat(template).take(reserve_inactive));
        }

        let mut group = Group::new(begin, end, end_cap, molecule_id, kind);
        let table = &self.atom_table;
        group.recompute_cm(&self.committed.particles, &self.committed.geometry, |p| mass_of(table, p));

        self.committed.groups.push(group.clone());
        self.trial.groups.push(group);
        self.committed.groups.len() - 1
    }

    pub fn group(&self, index: usize) -> Result<&Group, SpaceError> {
        self.committed.groups.get(index).ok_or(SpaceError::UnknownGroup(index, self.committed.groups.len()))
    }

    /// Copies `range` of the trial particle array over the committed one
    /// (an accepted move's touched indices).
    pub fn sync_range(&mut self, range: Range<usize>) {
        self.committed.particles[range.clone()].clone_from_slice(&self.trial.particles[range]);
    }

    /// Copies `range` of the committed particle array back over the trial
    /// one (undoing a rejected move's touched indices).
    pub fn revert_range(&mut self, range: Range<usize>) {
        self.trial.particles[range.clone()].clone_from_slice(&self.committed.particles[range]);
    }

    /// Merges an accepted move's group (bounds and cm) and its active-range
    /// particle contents from trial into committed.
    pub fn sync_group(&mut self, group_index: usize) -> Result<(), SpaceError> {
        let trial_group = self
            .trial
            .groups
            .get(group_index)
            .ok_or(SpaceError::UnknownGroup(group_index, self.trial.groups.len()))?
            .clone();
        let range = trial_group.active_range();
        self.committed.particles[range.clone()].clone_from_slice(&self.trial.particles[range]);
        self.committed.groups[group_index] = trial_group;
        Ok(())
    }

    /// Undoes a rejected move by copying a group's committed bounds, cm and
    /// active-range particle contents back over the trial copy.
    pub fn revert_group(&mut self, group_index: usize) -> Result<(), SpaceError> {
        let committed_group = self
            .committed
            .groups
            .get(group_index)
            .ok_or(SpaceError::UnknownGroup(group_index, self.committed.groups.len()))?
            .clone();
        let range = committed_group.active_range();
        self.trial.particles[range.clone()].clone_from_slice(&self.committed.particles[range]);
        self.trial.groups[group_index] = committed_group;
        Ok(())
    }

    /// Copies the whole trial geometry over committed (an accepted isobaric
    /// move).
    pub fn sync_geometry(&mut self) {
        self.committed.geometry = self.trial.geometry.clone();
    }

    pub fn revert_geometry(&mut self) {
        self.trial.geometry = self.committed.geometry.clone();
    }

    /// Rescales the trial container to `new_volume` and moves every trial
    /// particle to match: atomic groups scale per-particle positions,
    /// (in)compressible molecular groups scale only their center of mass and
    /// translate members rigidly by the resulting delta (spec. 4.1).
    pub fn scale_trial_volume(&mut self, new_volume: f64, policy: ScalePolicy) -> Result<ScaleTransform, faunus_geometry::GeometryError> {
        let transform = self.trial.geometry.scale(new_volume, policy)?;
        let table = self.atom_table.clone();
        let table = &*table;
        let SpaceState { particles, groups, geometry } = &mut self.trial;
        for g in groups.iter_mut() {
            if g.is_atomic() {
                for i in g.active_range() {
                    let p = transform.scale_point(*particles[i].pos());
                    particles[i].set_pos(p);
                }
                g.recompute_cm(particles, geometry, |p| mass_of(table, p));
            } else {
                let old_cm = *g.cm();
                let new_cm = transform.scale_center_of_mass(old_cm);
                let delta = new_cm - old_cm;
                g.translate(particles, &delta, geometry);
            }
        }
        Ok(transform)
    }

    /// Activates `count` particles from the inactive tail of `group_index`'s
    /// pre-reserved capacity (a grand-canonical insertion). Particles are
    /// never physically appended at runtime — only the load-time reserved
    /// capacity is ever brought into the active range — so no other group's
    /// bounds need to shift.
    pub fn insert_particles(&mut self, group_index: usize, count: usize) -> Result<(), SpaceError> {
        let g = self
            .trial
            .groups
            .get_mut(group_index)
            .ok_or(SpaceError::UnknownGroup(group_index, self.trial.groups.len()))?;
        let first = g.end();
        g.activate(first, first + count)
    }

    /// Deactivates a single particle at `index_in_group` within `group_index`
    /// (a grand-canonical deletion). The particle is swapped to the group's
    /// inactive tail, not physically removed, matching the rest of the
    /// engine's never-destroy-only-deactivate lifetime rule.
    pub fn erase_particle(&mut self, group_index: usize, index_in_group: usize) -> Result<(), SpaceError> {
        let g = self
            .trial
            .groups
            .get_mut(group_index)
            .ok_or(SpaceError::UnknownGroup(group_index, self.trial.groups.len()))?;
        let abs = g.begin() + index_in_group;
        g.deactivate(&mut self.trial.particles, abs, abs + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_numerical::Vec3;
    use faunus_particle::AtomType;

    fn test_atom_table() -> Arc<AtomTable> {
        let types = vec![
            AtomType { name: "A".into(), mass: 1.0, radius: 1.0, charge: 1.0, activity: 0.0, custom: Default::default() },
            AtomType { name: "B".into(), mass: 2.0, radius: 1.0, charge: -1.0, activity: 0.0, custom: Default::default() },
            AtomType { name: "C".into(), mass: 1.0, radius: 1.0, charge: 1.0, activity: 0.0, custom: Default::default() },
        ];
        Arc::new(AtomTable::from_atom_types(types).unwrap())
    }

    fn two_atom_group() -> (Space, usize) {
        let mut space = Space::new(Geometry::cuboid(Vec3::from_float(20.0)), test_atom_table());
        let particles = vec![Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0, 0), Particle::new(Vec3::new(-1.0, 0.0, 0.0), -1.0, 1)];
        let idx = space.push_group(particles, 2, Some(Particle::new(Vec3::zero(), 1.0, 2)), 0, GroupKind::Atomic);
        (space, idx)
    }

    #[test]
    fn committed_and_trial_start_identical() {
        let (space, _idx) = two_atom_group();
        assert_eq!(space.committed().particles, space.trial().particles);
    }

    #[test]
    fn sync_group_copies_trial_edits_into_committed() {
        let (mut space, idx) = two_atom_group();
        space.trial_mut().particles[0].set_pos(Vec3::new(5.0, 0.0, 0.0));
        space.sync_group(idx).unwrap();
        assert_eq!(space.committed().particles[0].pos().x, 5.0);
    }

    #[test]
    fn revert_group_discards_trial_edits() {
        let (mut space, idx) = two_atom_group();
        space.trial_mut().particles[0].set_pos(Vec3::new(5.0, 0.0, 0.0));
        space.revert_group(idx).unwrap();
        assert_eq!(space.trial().particles[0].pos().x, 1.0);
    }

    #[test]
    fn insert_then_erase_particle_round_trips_group_size() {
        let (mut space, idx) = two_atom_group();
        assert_eq!(space.trial().groups[idx].size(), 2);
        space.insert_particles(idx, 2).unwrap();
        assert_eq!(space.trial().groups[idx].size(), 4);
        space.erase_particle(idx, 0).unwrap();
        assert_eq!(space.trial().groups[idx].size(), 3);
    }

    #[test]
    fn scale_trial_volume_doubles_atomic_positions_on_8x_volume() {
        let (mut space, idx) = two_atom_group();
        let old_volume = space.trial().geometry.volume();
        space.scale_trial_volume(old_volume * 8.0, ScalePolicy::Isotropic).unwrap();
        assert!((space.trial().particles[0].pos().x - 2.0).abs() < 1e-9);
        assert_eq!(idx, 0);
    }

    #[test]
    fn push_group_weights_cm_by_atom_mass_not_a_plain_centroid() {
        // id 0 has mass 1.0 at x=1.0, id 1 has mass 2.0 at x=-1.0:
        // mass-weighted cm.x = (1*1 + 2*-1) / 3 = -1/3, wrapped into [0, 20)
        // by the cuboid boundary rather than the unweighted 0.0.
        let (space, idx) = two_atom_group();
        assert!((space.committed().groups[idx].cm().x - (20.0 - 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn scale_trial_volume_recomputes_mass_weighted_cm_for_atomic_groups() {
        let (mut space, idx) = two_atom_group();
        let old_volume = space.trial().geometry.volume();
        space.scale_trial_volume(old_volume * 8.0, ScalePolicy::Isotropic).unwrap();
        // uniform isotropic scale by f=2 on both positions, so the weighted
        // cm scales by the same factor as the positions it's derived from,
        // then wraps into the doubled [0, 40) box.
        assert!((space.trial().groups[idx].cm().x - (40.0 - 2.0 / 3.0)).abs() < 1e-9);
    }
}
