use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ParticleError;

/// Per-type parameters shared by every particle of a given type: mass,
/// radius, a reference charge, chemical activity (for grand-canonical moves)
/// and whatever else a pair potential or move needs, stashed in `custom`
/// rather than grown as new named fields every time a potential needs one
/// more number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtomType {
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    pub charge: f64,
    pub activity: f64,
    #[serde(default)]
    pub custom: HashMap<String, f64>,
}

/// Process-wide mapping from atom type id to its parameters, built once from
/// configuration and never mutated afterwards.
///
/// Deliberately not a global/static: a run owns one `AtomTable`, built during
/// startup and handed out by shared reference (or `Arc`) to whatever needs
/// it, so tests can build as many independent tables as they like and a
/// caller can tell init and teardown apart.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomTable {
    types: Vec<AtomType>,
    by_name: HashMap<String, usize>,
}

impl AtomTable {
    /// An atom table with no registered types. `by_id`/`by_name` fail for
    /// every lookup; callers that only need mass-weighting fallbacks (which
    /// default to `1.0` for an unknown id) can use this as a stand-in.
    pub fn empty() -> AtomTable {
        AtomTable { types: Vec::new(), by_name: HashMap::new() }
    }

    pub fn from_atom_types(types: Vec<AtomType>) -> Result<AtomTable, ParticleError> {
        let mut by_name = HashMap::with_capacity(types.len());
        for (id, atom_type) in types.iter().enumerate() {
            if by_name.insert(atom_type.name.clone(), id).is_some() {
                return Err(ParticleError::DuplicateAtomName(atom_type.name.clone()));
            }
        }
        Ok(AtomTable { types, by_name })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn by_id(&self, id: usize) -> Result<&AtomType, ParticleError> {
        self.types.get(id).ok_or(ParticleError::UnknownAtomId(id, self.types.len()))
    }

    pub fn by_name(&self, name: &str) -> Result<&AtomType, ParticleError> {
        let id = self.by_name.get(name).ok_or_else(|| ParticleError::UnknownAtomName(name.to_string()))?;
        Ok(&self.types[*id])
    }

    pub fn id_of(&self, name: &str) -> Result<usize, ParticleError> {
        self.by_name.get(name).copied().ok_or_else(|| ParticleError::UnknownAtomName(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtomType> {
        self.types.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn na() -> AtomType {
        AtomType { name: "Na".into(), mass: 23.0, radius: 1.9, charge: 1.0, activity: 0.1, custom: HashMap::new() }
    }

    fn cl() -> AtomType {
        AtomType { name: "Cl".into(), mass: 35.5, radius: 2.1, charge: -1.0, activity: 0.1, custom: HashMap::new() }
    }

    #[test]
    fn looks_up_by_name_and_id_consistently() {
        let table = AtomTable::from_atom_types(vec![na(), cl()]).unwrap();
        assert_eq!(table.id_of("Cl").unwrap(), 1);
        assert_eq!(table.by_id(1).unwrap().name, "Cl");
        assert_eq!(table.by_name("Na").unwrap().mass, 23.0);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = AtomTable::from_atom_types(vec![na(), na()]).unwrap_err();
        assert_eq!(err, ParticleError::DuplicateAtomName("Na".into()));
    }

    #[test]
    fn unknown_lookups_are_errors() {
        let table = AtomTable::from_atom_types(vec![na()]).unwrap();
        assert!(table.by_name("K").is_err());
        assert!(table.by_id(5).is_err());
    }
}
