//! Binary checkpoint persistence (§6): particle array, group array,
//! geometry, and the Hamiltonian's accumulated `dusum`, stable within a
//! version.
//!
//! Grounded on the pack's `daedalus` crate, which round-trips its own
//! config/state through `bincode` over plain `#[derive(Serialize,
//! Deserialize)]` structs rather than a hand-rolled byte reader; the leading
//! version stamp and mismatch check follow the same precedent.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use faunus_geometry::Geometry;
use faunus_particle::{AtomTable, Particle};
use faunus_space::{Group, Space};

use crate::errors::ConfigError;

/// Bumped whenever the on-disk layout changes incompatibly; a loader refuses
/// a checkpoint stamped with any other version (§6).
pub const CHECKPOINT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
pub struct Checkpoint {
    version: u32,
    particles: Vec<Particle>,
    groups: Vec<Group>,
    geometry: Geometry,
    dusum: f64,
}

impl Checkpoint {
    /// Captures the committed state of `space` plus the move set's running
    /// `dusum`. Only the committed copy is persisted; a run always resumes
    /// from the last accepted state, never from a stale trial.
    pub fn capture(space: &Space, dusum: f64) -> Checkpoint {
        let committed = space.committed();
        Checkpoint {
            version: CHECKPOINT_VERSION,
            particles: committed.particles.clone(),
            groups: committed.groups.clone(),
            geometry: committed.geometry.clone(),
            dusum,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Checkpoint, ConfigError> {
        let file = File::open(path)?;
        let checkpoint: Checkpoint = bincode::deserialize_from(BufReader::new(file))?;
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(ConfigError::VersionMismatch { found: checkpoint.version, expected: CHECKPOINT_VERSION });
        }
        Ok(checkpoint)
    }

    /// Rebuilds a [`Space`] whose committed and trial copies both equal this
    /// checkpoint's captured state. `atom_table` should be the same table the
    /// run's configuration builds, so reactivated/rescaled groups recompute
    /// their mass-weighted `cm` consistently with the rest of the run.
    pub fn into_space(self, atom_table: Arc<AtomTable>) -> Space {
        let mut space = Space::new(self.geometry.clone(), atom_table);
        for group in &self.groups {
            let whole = self.particles[group.begin()..group.end_cap()].to_vec();
            let inactive_count = group.end_cap() - group.end();
            let split_at = whole.len() - inactive_count;
            let template = whole.get(split_at).cloned();
            let active_only = whole[..split_at].to_vec();
            space.push_group(active_only, inactive_count, template, group.molecule_id(), group.kind());
        }
        space
    }

    pub fn dusum(&self) -> f64 {
        self.dusum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faunus_geometry::Geometry as Geo;
    use faunus_numerical::Vec3;
    use faunus_space::GroupKind;

    #[test]
    fn save_then_load_reproduces_particle_and_group_state() {
        let dir = std::env::temp_dir().join(format!("faunus-checkpoint-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.bin");

        let mut space = Space::new(Geo::cuboid(Vec3::from_float(10.0)), Arc::new(AtomTable::empty()));
        space.push_group(
            vec![Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0, 0), Particle::new(Vec3::new(-1.0, 0.0, 0.0), -1.0, 1)],
            0,
            None,
            0,
            GroupKind::Atomic,
        );

        let checkpoint = Checkpoint::capture(&space, 12.5);
        checkpoint.save(&path).unwrap();

        let loaded = Checkpoint::load(&path).unwrap();
        assert_eq!(loaded.dusum(), 12.5);
        let restored = loaded.into_space(Arc::new(AtomTable::empty()));
        assert_eq!(restored.committed().particles, space.committed().particles);
        assert_eq!(restored.committed().groups.len(), space.committed().groups.len());

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn load_rejects_a_mismatched_version_stamp() {
        let dir = std::env::temp_dir().join(format!("faunus-checkpoint-version-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.bin");

        let bogus = Checkpoint {
            version: CHECKPOINT_VERSION + 1,
            particles: Vec::new(),
            groups: Vec::new(),
            geometry: Geo::cuboid(Vec3::from_float(10.0)),
            dusum: 0.0,
        };
        let file = File::create(&path).unwrap();
        bincode::serialize_into(BufWriter::new(file), &bogus).unwrap();

        assert!(matches!(Checkpoint::load(&path), Err(ConfigError::VersionMismatch { .. })));

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }
}
