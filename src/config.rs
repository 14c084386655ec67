//! JSON-shaped input configuration (§6): `geometry`, `atomlist`,
//! `moleculelist`, `energy`, `moves`, `analysis`, `reactionlist`.
//!
//! Mirrors the precedent set by `bioshell-taxonomy`'s JSON config handling:
//! plain `#[derive(Deserialize)]` structs, `#[serde(tag = "...")]` for the
//! polymorphic `energy`/`moves` lists, and deserialization failures surfaced
//! as [`ConfigError`] before any run starts.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use faunus_energy::{BondTable, Bonded, DistanceConstraint, EnergyRest, EnergyTerm, ExternalPressure, Hamiltonian, MassCenterConstrain, Nonbonded, NonbondedCG, RestrictedVolume};
use faunus_geometry::{Geometry, ScalePolicy};
use faunus_montecarlo::{GrandCanonicalSalt, Isobaric, Mover, ParticleTranslation, RotateGroup, Titration, WeightedMoveSet};
use faunus_numerical::Vec3;
use faunus_particle::{AtomTable, AtomType};
use faunus_potentials::PairParams;
use faunus_space::{GroupKind, Space};

use crate::errors::ConfigError;
use crate::potential_spec::PotentialSpec;

/// A bonded-pair entry of the `energy` section's `bonded` term: `(i, j)` are
/// absolute particle indices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BondSpec {
    pub i: usize,
    pub j: usize,
    pub potential: PotentialSpec,
}

/// One entry of `MassCenterConstrain`'s registered pair list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistanceConstraintSpec {
    pub group_a: usize,
    pub group_b: usize,
    pub d_min: f64,
    pub d_max: f64,
}

/// One entry of the `energy` section (spec. 4.6).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "term", rename_all = "snake_case")]
pub enum EnergyTermSpec {
    Nonbonded { potential: PotentialSpec },
    /// Coarse-grained nonbonded: one `(radius, charge)` pair per molecule id
    /// in `moleculelist`, indexed positionally.
    NonbondedCg { potential: PotentialSpec, params_by_molecule: Vec<(f64, f64)> },
    Bonded { bonds: Vec<BondSpec> },
    ExternalPressure { pressure: f64 },
    RestrictedVolume { lower: Vec3, upper: Vec3, #[serde(default)] cm_only: bool },
    MassCenterConstrain { constraints: Vec<DistanceConstraintSpec> },
    EnergyRest,
}

fn build_term(spec: &EnergyTermSpec, atom_table: &Arc<AtomTable>) -> Box<dyn EnergyTerm> {
    match spec {
        EnergyTermSpec::Nonbonded { potential } => Box::new(Nonbonded::new(potential.build(), atom_table.clone())),
        EnergyTermSpec::NonbondedCg { potential, params_by_molecule } => {
            let params = params_by_molecule.iter().map(|&(radius, charge)| PairParams::new(radius, charge)).collect();
            Box::new(NonbondedCG::new(potential.build(), params))
        }
        EnergyTermSpec::Bonded { bonds } => {
            let mut table = BondTable::new();
            for bond in bonds {
                table.insert(bond.i, bond.j, bond.potential.build());
            }
            Box::new(Bonded::new(table, atom_table.clone()))
        }
        EnergyTermSpec::ExternalPressure { pressure } => Box::new(ExternalPressure { pressure: *pressure }),
        EnergyTermSpec::RestrictedVolume { lower, upper, cm_only } => {
            Box::new(RestrictedVolume { lower: *lower, upper: *upper, cm_only: *cm_only })
        }
        EnergyTermSpec::MassCenterConstrain { constraints } => {
            let constraints = constraints
                .iter()
                .map(|c| DistanceConstraint { group_a: c.group_a, group_b: c.group_b, d_min: c.d_min, d_max: c.d_max })
                .collect();
            Box::new(MassCenterConstrain::new(constraints))
        }
        EnergyTermSpec::EnergyRest => Box::new(EnergyRest::new()),
    }
}

/// One entry of the `moves` section (spec. 4.8), each carrying its own
/// relative weight.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "snake_case")]
pub enum MoveSpec {
    ParticleTranslation {
        group: usize,
        max_displacement: f64,
        #[serde(default = "full_direction_mask")]
        direction_mask: [bool; 3],
        weight: f64,
    },
    RotateGroup {
        group: usize,
        max_angle: f64,
        #[serde(default)]
        max_translation: f64,
        weight: f64,
    },
    Isobaric {
        max_log_volume_step: f64,
        scale_policy: ScalePolicy,
        weight: f64,
    },
    GrandCanonicalSalt {
        group: usize,
        cation_id: usize,
        anion_id: usize,
        cation_charge: f64,
        anion_charge: f64,
        cation_activity: f64,
        anion_activity: f64,
        weight: f64,
    },
    Titration {
        site_index: usize,
        counter_ion_index: usize,
        pka: f64,
        ph: f64,
        #[serde(default)]
        initially_protonated: bool,
        weight: f64,
    },
}

fn full_direction_mask() -> [bool; 3] {
    [true, true, true]
}

impl MoveSpec {
    /// The group this move's §7 "gcbath group must be last" requirement
    /// applies to, if any.
    fn grand_canonical_group(&self) -> Option<usize> {
        match self {
            MoveSpec::GrandCanonicalSalt { group, .. } => Some(*group),
            _ => None,
        }
    }
}

fn build_mover(spec: &MoveSpec) -> Box<dyn Mover> {
    match spec {
        MoveSpec::ParticleTranslation { group, max_displacement, direction_mask, weight } => {
            Box::new(ParticleTranslation::new(*group, *max_displacement, *direction_mask, *weight))
        }
        MoveSpec::RotateGroup { group, max_angle, max_translation, weight } => {
            Box::new(RotateGroup::new(*group, *max_angle, *max_translation, *weight))
        }
        MoveSpec::Isobaric { max_log_volume_step, scale_policy, weight } => {
            Box::new(Isobaric::new(*max_log_volume_step, *scale_policy, *weight))
        }
        MoveSpec::GrandCanonicalSalt { group, cation_id, anion_id, cation_charge, anion_charge, cation_activity, anion_activity, weight } => {
            Box::new(GrandCanonicalSalt::new(*group, *cation_id, *anion_id, *cation_charge, *anion_charge, *cation_activity, *anion_activity, *weight))
        }
        MoveSpec::Titration { site_index, counter_ion_index, pka, ph, initially_protonated, weight } => {
            Box::new(Titration::new(*site_index, *counter_ion_index, *pka, *ph, *initially_protonated, *weight))
        }
    }
}

/// One atom placed at `offset` relative to its molecule instance's center.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtomInstance {
    pub name: String,
    #[serde(default = "Vec3::zero")]
    pub offset: Vec3,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoleculeKind {
    Atomic,
    Molecular {
        #[serde(default = "default_true")]
        compressible: bool,
    },
}

fn default_true() -> bool {
    true
}

impl From<&MoleculeKind> for GroupKind {
    fn from(kind: &MoleculeKind) -> GroupKind {
        match kind {
            MoleculeKind::Atomic => GroupKind::Atomic,
            MoleculeKind::Molecular { compressible } => GroupKind::Molecular { compressible: *compressible },
        }
    }
}

/// Where the molecule's instances (one [`Group`] each) are centered.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "placement", rename_all = "snake_case")]
pub enum Placement {
    /// One group instance per listed center.
    Explicit { centers: Vec<Vec3> },
    /// `count` group instances at uniform-random centers inside the geometry.
    Random { count: usize },
}

/// One molecule type in `moleculelist`: a template of atoms (by name, with an
/// offset from the instance's center) replicated at each placement center.
/// A molecule with an empty `atoms` list and nonzero `reserve_inactive` is
/// the documented way to declare a grand-canonical species reservoir (its
/// instance starts with zero active particles and a capacity tail the
/// `grand_canonical_salt` move activates/deactivates into).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoleculeConfig {
    pub name: String,
    #[serde(default)]
    pub atoms: Vec<AtomInstance>,
    pub kind: MoleculeKind,
    pub placement: Placement,
    #[serde(default)]
    pub reserve_inactive: usize,
}

/// Top-level configuration document (spec. 6).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub geometry: Geometry,
    pub atomlist: Vec<AtomType>,
    pub moleculelist: Vec<MoleculeConfig>,
    pub energy: Vec<EnergyTermSpec>,
    #[serde(default)]
    pub moves: Vec<MoveSpec>,
    /// Reaction-coordinate/trajectory/observable hooks: accepted and carried
    /// verbatim, never interpreted by the core (those collaborators are out
    /// of scope — §1, §6).
    #[serde(default)]
    pub analysis: Vec<serde_json::Value>,
    #[serde(default)]
    pub reactionlist: Vec<serde_json::Value>,
}

/// Everything [`SimulationConfig::build`] assembles from one config document.
pub struct BuiltSimulation {
    pub atom_table: Arc<AtomTable>,
    pub space: Space,
    pub hamiltonian: Hamiltonian,
    pub move_set: WeightedMoveSet,
    /// Maps each molecule's `name` to the group indices of its instances, in
    /// placement order.
    pub group_index: HashMap<String, Vec<usize>>,
}

impl SimulationConfig {
    /// Parses a JSON document into a [`SimulationConfig`] (spec. 7: failures
    /// surface as [`ConfigError`] at load, before any run starts).
    pub fn from_json(text: &str) -> Result<SimulationConfig, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the runnable simulation this config describes: an `AtomTable`,
    /// a `Space` with every molecule instance pushed as a group, a
    /// `Hamiltonian` with every energy term enrolled, and a `WeightedMoveSet`
    /// with every move enrolled. `seed` drives only the random placement of
    /// molecules whose `placement` is `Random`.
    pub fn build(&self, seed: u64) -> Result<BuiltSimulation, ConfigError> {
        let atom_table = Arc::new(AtomTable::from_atom_types(self.atomlist.clone())?);
        let mut space = Space::new(self.geometry.clone(), atom_table.clone());
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut group_index: HashMap<String, Vec<usize>> = HashMap::new();

        for molecule in &self.moleculelist {
            let mut atom_ids = Vec::with_capacity(molecule.atoms.len());
            for atom in &molecule.atoms {
                atom_ids.push((atom_table.id_of(&atom.name)?, atom.offset));
            }

            let centers: Vec<Vec3> = match &molecule.placement {
                Placement::Explicit { centers } => centers.clone(),
                Placement::Random { count } => (0..*count).map(|_| self.geometry.random_inside(&mut rng)).collect(),
            };

            let kind = GroupKind::from(&molecule.kind);
            let molecule_id = group_index.len();
            let mut indices = Vec::with_capacity(centers.len());

            for center in &centers {
                let active = atom_ids
                    .iter()
                    .map(|(id, offset)| {
                        let charge = atom_table.by_id(*id).expect("id resolved above").charge;
                        faunus_particle::Particle::new(*center + *offset, charge, *id)
                    })
                    .collect();
                let template = atom_ids.first().map(|(id, _)| faunus_particle::Particle::new(Vec3::zero(), 0.0, *id));
                let idx = space.push_group(active, molecule.reserve_inactive, template, molecule_id, kind);
                indices.push(idx);
            }
            group_index.insert(molecule.name.clone(), indices);
        }

        let last_group = space.committed().groups.len().saturating_sub(1);
        for mover in &self.moves {
            if let Some(group) = mover.grand_canonical_group() {
                if group != last_group {
                    return Err(ConfigError::GrandCanonicalGroupNotLast(group, last_group));
                }
            }
        }

        let mut hamiltonian = Hamiltonian::new();
        for term in &self.energy {
            hamiltonian.push(build_term(term, &atom_table));
        }

        let mut move_set = WeightedMoveSet::new();
        for mover in &self.moves {
            move_set.add_mover(build_mover(mover));
        }

        Ok(BuiltSimulation { atom_table, space, hamiltonian, move_set, group_index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config_json() -> &'static str {
        r#"{
            "geometry": { "shape": "cuboid", "side": { "x": 20.0, "y": 20.0, "z": 20.0 }, "periodic": [true, true, true] },
            "atomlist": [
                { "name": "Na", "mass": 23.0, "radius": 1.9, "charge": 1.0, "activity": 0.05 },
                { "name": "Cl", "mass": 35.5, "radius": 2.1, "charge": -1.0, "activity": 0.05 }
            ],
            "moleculelist": [
                {
                    "name": "ion_pair",
                    "atoms": [
                        { "name": "Na", "offset": { "x": 0.0, "y": 0.0, "z": 0.0 } },
                        { "name": "Cl", "offset": { "x": 4.0, "y": 0.0, "z": 0.0 } }
                    ],
                    "kind": "atomic",
                    "placement": { "placement": "explicit", "centers": [{ "x": 0.0, "y": 0.0, "z": 0.0 }] }
                }
            ],
            "energy": [
                { "term": "nonbonded", "potential": { "kind": "hard_sphere" } },
                { "term": "nonbonded", "potential": { "kind": "coulomb", "bjerrum_length": 7.0, "splitting": { "scheme": "plain", "cutoff": 10.0 } } }
            ],
            "moves": [
                { "move": "particle_translation", "group": 0, "max_displacement": 1.0, "weight": 1.0 }
            ]
        }"#
    }

    #[test]
    fn parses_and_builds_a_minimal_system() {
        let config = SimulationConfig::from_json(minimal_config_json()).unwrap();
        let built = config.build(1).unwrap();
        assert_eq!(built.space.committed().particles.len(), 2);
        assert_eq!(built.hamiltonian.len(), 2);
        assert_eq!(built.move_set.count_movers(), 1);
        assert_eq!(built.group_index["ion_pair"], vec![0]);
    }

    #[test]
    fn unknown_atom_name_is_a_config_error() {
        let bad = minimal_config_json().replace("\"Na\", \"offset\"", "\"K\", \"offset\"");
        let config = SimulationConfig::from_json(&bad).unwrap();
        assert!(config.build(1).is_err());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(SimulationConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn grand_canonical_move_must_target_the_last_group() {
        let json = r#"{
            "geometry": { "shape": "cuboid", "side": { "x": 20.0, "y": 20.0, "z": 20.0 }, "periodic": [true, true, true] },
            "atomlist": [
                { "name": "Na", "mass": 23.0, "radius": 1.9, "charge": 1.0, "activity": 0.05 },
                { "name": "Cl", "mass": 35.5, "radius": 2.1, "charge": -1.0, "activity": 0.05 }
            ],
            "moleculelist": [
                {
                    "name": "decoy",
                    "atoms": [{ "name": "Na", "offset": { "x": 0.0, "y": 0.0, "z": 0.0 } }],
                    "kind": "atomic",
                    "placement": { "placement": "explicit", "centers": [{ "x": 0.0, "y": 0.0, "z": 0.0 }] }
                },
                {
                    "name": "salt",
                    "atoms": [],
                    "kind": "atomic",
                    "placement": { "placement": "explicit", "centers": [{ "x": 0.0, "y": 0.0, "z": 0.0 }] },
                    "reserve_inactive": 2
                }
            ],
            "energy": [],
            "moves": [
                { "move": "grand_canonical_salt", "group": 0, "cation_id": 0, "anion_id": 1, "cation_charge": 1.0, "anion_charge": -1.0, "cation_activity": 0.05, "anion_activity": 0.05, "weight": 1.0 }
            ]
        }"#;
        let config = SimulationConfig::from_json(json).unwrap();
        assert!(config.build(1).is_err());
    }
}
