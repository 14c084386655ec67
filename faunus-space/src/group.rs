use std::ops::Range;

use serde::{Deserialize, Serialize};

use faunus_geometry::Geometry;
use faunus_numerical::{Quaternion, Vec3};
use faunus_particle::Particle;

use crate::errors::SpaceError;

/// Which kind of molecule a group holds, affecting how volume scaling and
/// center-of-mass bookkeeping behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    Atomic,
    Molecular { compressible: bool },
}

/// A contiguous slice `[begin, end_cap)` of the space-wide particle array
/// owned by one molecule instance: `[begin, end)` holds active particles,
/// `[end, end_cap)` holds deactivated ones kept around for reactivation.
///
/// This replaces the iterator-pair Group from the original engine with a
/// plain offset/length/capacity record into a single owning arena, per the
/// simplification the engine's own design notes call for: no `relocate`
/// step is needed since `Space` can shift these bounds directly when it
/// inserts or erases particles elsewhere in the array.
///
/// Derives `Serialize`/`Deserialize` so the committed group vector can be
/// written verbatim into the persisted checkpoint (spec. 6): `begin`, `end`,
/// `end_cap`, `id`, `atomic`/`compressible` (folded into `kind`), `cm` and
/// `confid` are exactly the fields the binary layout documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    begin: usize,
    end: usize,
    end_cap: usize,
    molecule_id: usize,
    kind: GroupKind,
    cm: Vec3,
    confid: usize,
}

impl Group {
    pub fn new(begin: usize, end: usize, end_cap: usize, molecule_id: usize, kind: GroupKind) -> Group {
        Group { begin, end, end_cap, molecule_id, kind, cm: Vec3::zero(), confid: 0 }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn end_cap(&self) -> usize {
        self.end_cap
    }

    pub fn molecule_id(&self) -> usize {
        self.molecule_id
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self.kind, GroupKind::Atomic)
    }

    pub fn is_compressible(&self) -> bool {
        match self.kind {
            GroupKind::Atomic => true,
            GroupKind::Molecular { compressible } => compressible,
        }
    }

    pub fn cm(&self) -> &Vec3 {
        &self.cm
    }

    pub fn confid(&self) -> usize {
        self.confid
    }

    pub fn set_confid(&mut self, confid: usize) {
        self.confid = confid;
    }

    pub fn size(&self) -> usize {
        self.end - self.begin
    }

    pub fn capacity(&self) -> usize {
        self.end_cap - self.begin
    }

    pub fn empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn is_full(&self) -> bool {
        self.end == self.end_cap
    }

    pub fn active_range(&self) -> Range<usize> {
        self.begin..self.end
    }

    pub fn inactive_range(&self) -> Range<usize> {
        self.end..self.end_cap
    }

    /// `(first, last)` offsets of the active range into the enclosing array.
    pub fn to_index(&self) -> (usize, usize) {
        (self.begin, self.end)
    }

    /// Pointer-identity containment: true if `index` names a slot this group
    /// owns, not whether some other particle happens to compare equal.
    pub fn contains(&self, index: usize, include_inactive: bool) -> bool {
        if include_inactive {
            self.begin <= index && index < self.end_cap
        } else {
            self.begin <= index && index < self.end
        }
    }

    /// Recomputes `cm` as the periodic-aware mass-weighted mean of the
    /// active range. Mass-less callers (no atom table on hand) should pass a
    /// closure returning `1.0` for an unweighted centroid.
    pub fn recompute_cm<F: Fn(&Particle) -> f64>(&mut self, particles: &[Particle], geometry: &Geometry, mass_of: F) {
        if self.empty() {
            self.cm = Vec3::zero();
            return;
        }
        let reference = *particles[self.begin].pos();
        let mut weighted_sum = Vec3::zero();
        let mut total_mass = 0.0;
        for i in self.active_range() {
            let m = mass_of(&particles[i]);
            let displacement = geometry.vdist(particles[i].pos(), &reference);
            weighted_sum += displacement * m;
            total_mass += m;
        }
        let mut cm = reference + weighted_sum * (1.0 / total_mass);
        geometry.boundary(&mut cm);
        self.cm = cm;
    }

    /// Removes `[first, last)` from the active range by swapping it with the
    /// tail of the active range, then shrinking `end`. `deactivate(x, x)` is
    /// a no-op. Order of survivors outside both `[first,last)` and the
    /// swapped-in tail is preserved; the tail elements that fill the gap
    /// keep their relative order but move position, which is the documented
    /// trade-off of doing this without reallocating.
    pub fn deactivate(&mut self, particles: &mut [Particle], first: usize, last: usize) -> Result<(), SpaceError> {
        if first == last {
            return Ok(());
        }
        if first < self.begin || last > self.end || first > last {
            return Err(SpaceError::InvalidDeactivateRange { first, last, begin: self.begin, end: self.end });
        }
        let n = last - first;
        let tail_start = self.end - n;
        for k in 0..n {
            particles.swap(first + k, tail_start + k);
        }
        self.end -= n;
        Ok(())
    }

    /// Grows the active range by reclaiming `[first, last)`, which must be a
    /// contiguous prefix of the inactive region starting exactly at `end`.
    pub fn activate(&mut self, first: usize, last: usize) -> Result<(), SpaceError> {
        if first != self.end || last > self.end_cap || last < first {
            return Err(SpaceError::InvalidActivateRange { first, last, end: self.end, end_cap: self.end_cap });
        }
        self.end = last;
        Ok(())
    }

    /// Lazily filtered view over the active range: indices of particles
    /// whose atom type id equals `type_id`.
    pub fn find_id<'a>(&self, particles: &'a [Particle], type_id: usize) -> impl Iterator<Item = usize> + 'a {
        let range = self.active_range();
        particles.iter().enumerate().filter(move |(i, p)| range.contains(i) && p.id() == type_id).map(|(i, _)| i)
    }

    /// Total charge of the active range (used by the `NEUTRAL` selector).
    pub fn total_charge(&self, particles: &[Particle]) -> f64 {
        self.active_range().map(|i| particles[i].charge()).sum()
    }

    /// Rotates every active particle about `cm`, using a boundary-aware
    /// displacement so periodic groups rotate correctly, then rewraps each
    /// result. Dipole direction and orientation of extended records rotate
    /// by the same quaternion. A no-op on an empty group.
    pub fn rotate(&mut self, particles: &mut [Particle], q: &Quaternion, geometry: &Geometry) {
        if self.empty() {
            return;
        }
        let cm = self.cm;
        for i in self.active_range() {
            let displacement = geometry.vdist(particles[i].pos(), &cm);
            let mut rotated = cm + q.rotate(&displacement);
            geometry.boundary(&mut rotated);
            particles[i].set_pos(rotated);
            if let Some(ext) = particles[i].ext_mut_if_present() {
                ext.dipole_direction = q.rotate(&ext.dipole_direction);
                ext.orientation = q.rotate(&ext.orientation);
            }
        }
    }

    /// Adds `delta` to every active particle's position and to `cm`, then
    /// wraps each through the container boundary.
    pub fn translate(&mut self, particles: &mut [Particle], delta: &Vec3, geometry: &Geometry) {
        for i in self.active_range() {
            let mut p = *particles[i].pos() + *delta;
            geometry.boundary(&mut p);
            particles[i].set_pos(p);
        }
        let mut cm = self.cm + *delta;
        geometry.boundary(&mut cm);
        self.cm = cm;
    }

    /// Copies this group's metadata and the particle contents of its active
    /// range into `dest`, which may live in a different particle array.
    /// `dest`'s own range is left unchanged (its "iterator base" survives) —
    /// only the particle values underneath it, and the metadata, are
    /// overwritten. The two groups' sizes are expected to match; if they
    /// don't, only the overlapping prefix is copied.
    pub fn clone_into(&self, src_particles: &[Particle], dest: &mut Group, dest_particles: &mut [Particle]) {
        dest.molecule_id = self.molecule_id;
        dest.kind = self.kind;
        dest.cm = self.cm;
        dest.confid = self.confid;
        let n = self.size().min(dest.size());
        for k in 0..n {
            dest_particles[dest.begin + k] = src_particles[self.begin + k].clone();
        }
    }

    /// Shifts this group's bounds by `new_base - old_base`, used by `Space`
    /// when particles are inserted or erased ahead of this group in the array.
    pub(crate) fn shift(&mut self, delta: isize) {
        self.begin = (self.begin as isize + delta) as usize;
        self.end = (self.end as isize + delta) as usize;
        self.end_cap = (self.end_cap as isize + delta) as usize;
    }

    pub(crate) fn set_cm(&mut self, cm: Vec3) {
        self.cm = cm;
    }
}

/// Tag set used by [`group_filter`] to select groups for a move or energy term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    Active,
    Inactive,
    Full,
    Neutral,
    Molecular,
    Atomic,
}

const NEUTRAL_CHARGE_TOLERANCE: f64 = 1e-9;

/// Builds a predicate that accepts a group only if every tag in `tags` holds.
pub fn group_filter<'a>(tags: &'a [Selector]) -> impl Fn(&Group, &[Particle]) -> bool + 'a {
    move |g: &Group, particles: &[Particle]| {
        tags.iter().all(|tag| match tag {
            Selector::Active => !g.empty(),
            Selector::Inactive => g.end() < g.end_cap(),
            Selector::Full => g.is_full(),
            Selector::Neutral => g.total_charge(particles).abs() < NEUTRAL_CHARGE_TOLERANCE,
            Selector::Molecular => !g.is_atomic(),
            Selector::Atomic => g.is_atomic(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_geometry::Geometry;
    use faunus_particle::Particle;

    fn particles_from_x(xs: &[f64]) -> Vec<Particle> {
        xs.iter().map(|&x| Particle::new(Vec3::new(x, 0.0, 0.0), 0.0, 0)).collect()
    }

    #[test]
    fn elastic_range_deactivate_then_reactivate() {
        // values 10,20,30,40,50,60 stashed as x coordinates for easy inspection
        let mut particles = particles_from_x(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        let mut g = Group::new(0, 6, 6, 0, GroupKind::Atomic);

        g.deactivate(&mut particles, 1, 3).unwrap();
        assert_eq!(g.size(), 4);
        let active_values: Vec<f64> = g.active_range().map(|i| particles[i].pos().x).collect();
        assert!(!active_values.contains(&20.0));
        assert!(!active_values.contains(&30.0));
        assert_eq!(particles[g.end()].pos().x, 20.0);
        assert_eq!(particles[g.end() + 1].pos().x, 30.0);

        g.activate(g.end(), g.end() + 2).unwrap();
        assert_eq!(g.size(), 6);
    }

    #[test]
    fn deactivate_noop_on_empty_range() {
        let mut particles = particles_from_x(&[1.0, 2.0, 3.0]);
        let mut g = Group::new(0, 3, 3, 0, GroupKind::Atomic);
        g.deactivate(&mut particles, 1, 1).unwrap();
        assert_eq!(g.size(), 3);
    }

    #[test]
    fn rotate_matches_known_90_degree_case() {
        let mut particles = vec![Particle::new(Vec3::new(0.0, 1.0, 0.0), 0.0, 0)];
        particles[0].ext_mut().dipole_direction = Vec3::new(0.0, 1.0, 0.0);
        let mut g = Group::new(0, 1, 1, 0, GroupKind::Atomic);
        g.recompute_cm(&particles, &Geometry::cuboid(Vec3::from_float(100.0)), |_| 1.0);

        let q = Quaternion::from_axis_angle(&Vec3::new(1.0, 0.0, 0.0), std::f64::consts::FRAC_PI_2);
        g.rotate(&mut particles, &q, &Geometry::cuboid(Vec3::from_float(100.0)));

        assert!((particles[0].pos().z - 1.0).abs() < 1e-9);
        assert!((particles[0].ext().unwrap().dipole_direction.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_on_empty_group_is_noop() {
        let mut particles: Vec<Particle> = vec![];
        let mut g = Group::new(0, 0, 0, 0, GroupKind::Atomic);
        let q = Quaternion::from_axis_angle(&Vec3::new(1.0, 0.0, 0.0), 1.0);
        g.rotate(&mut particles, &q, &Geometry::cuboid(Vec3::from_float(10.0)));
        assert_eq!(g.size(), 0);
    }

    #[test]
    fn clone_into_overwrites_destination_particle_values_not_its_range() {
        let src_particles = vec![
            Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0, 7),
            Particle::new(Vec3::new(2.0, 0.0, 0.0), 1.0, 7),
        ];
        let mut dest_particles =
            vec![Particle::new(Vec3::zero(), 0.0, 0), Particle::new(Vec3::zero(), 0.0, 0), Particle::new(Vec3::zero(), 0.0, 0)];
        let src_group = Group::new(0, 2, 2, 7, GroupKind::Atomic);
        let mut dest_group = Group::new(1, 3, 3, 0, GroupKind::Atomic);

        src_group.clone_into(&src_particles, &mut dest_group, &mut dest_particles);

        assert_eq!(dest_group.begin(), 1);
        assert_eq!(dest_group.end(), 3);
        assert_eq!(dest_particles[1].id(), 7);
        assert_eq!(dest_particles[2].id(), 7);
        assert_eq!(dest_group.molecule_id(), 7);
    }
}
