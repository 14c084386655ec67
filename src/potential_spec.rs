//! Table-driven pair-potential selection for JSON-configured runs.
//!
//! `faunus-potentials` composes potentials at compile time via generics
//! (`Nonbonded<P>`) for the hot inner loops; a config file can't name a Rust
//! generic, so this module gives the loader a closed `enum` it can dispatch
//! on instead, per the engine's own design notes on a table-driven path for
//! configurability sitting next to the generic one.

use serde::{Deserialize, Serialize};

use faunus_potentials::{CompositePotential, Coulomb, HardSphere, Harmonic, LennardJones, PairParams, PairPotential, Splitting};

/// JSON-facing description of a pair potential (`energy`/`moves` sections'
/// `potential` field, §6).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PotentialSpec {
    HardSphere,
    Harmonic { k: f64, r0: f64 },
    LennardJones { epsilon: f64, cutoff: f64 },
    Coulomb { bjerrum_length: f64, splitting: Splitting },
    Composite { terms: Vec<PotentialSpec> },
}

impl PotentialSpec {
    /// Builds the concrete potential this spec describes.
    pub fn build(&self) -> AnyPotential {
        match self {
            PotentialSpec::HardSphere => AnyPotential::HardSphere(HardSphere),
            PotentialSpec::Harmonic { k, r0 } => AnyPotential::Harmonic(Harmonic::new(*k, *r0)),
            PotentialSpec::LennardJones { epsilon, cutoff } => AnyPotential::LennardJones(LennardJones::new(*epsilon, *cutoff)),
            PotentialSpec::Coulomb { bjerrum_length, splitting } => AnyPotential::Coulomb(Coulomb::new(*bjerrum_length, *splitting)),
            PotentialSpec::Composite { terms } => {
                let mut composite = CompositePotential::new();
                for term in terms {
                    composite = composite.push(Box::new(term.build()));
                }
                AnyPotential::Composite(composite)
            }
        }
    }
}

/// The closed set of potentials a config file can select, unified behind one
/// concrete type so `Nonbonded<AnyPotential>`/`Bonded<AnyPotential>` can be
/// boxed into a `Hamiltonian` without a generic parameter leaking into the
/// loader's public surface.
pub enum AnyPotential {
    HardSphere(HardSphere),
    Harmonic(Harmonic),
    LennardJones(LennardJones),
    Coulomb(Coulomb),
    Composite(CompositePotential),
}

impl PairPotential for AnyPotential {
    fn energy(&self, a: &PairParams, b: &PairParams, squared_distance: f64) -> f64 {
        match self {
            AnyPotential::HardSphere(p) => p.energy(a, b, squared_distance),
            AnyPotential::Harmonic(p) => p.energy(a, b, squared_distance),
            AnyPotential::LennardJones(p) => p.energy(a, b, squared_distance),
            AnyPotential::Coulomb(p) => p.energy(a, b, squared_distance),
            AnyPotential::Composite(p) => p.energy(a, b, squared_distance),
        }
    }

    fn to_kT(&self) -> f64 {
        match self {
            AnyPotential::HardSphere(p) => p.to_kT(),
            AnyPotential::Harmonic(p) => p.to_kT(),
            AnyPotential::LennardJones(p) => p.to_kT(),
            AnyPotential::Coulomb(p) => p.to_kT(),
            AnyPotential::Composite(p) => p.to_kT(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_sphere_spec_round_trips_through_json() {
        let spec = PotentialSpec::HardSphere;
        let encoded = serde_json::to_string(&spec).unwrap();
        let decoded: PotentialSpec = serde_json::from_str(&encoded).unwrap();
        let p = PairParams::new(1.0, 0.0);
        assert_eq!(decoded.build().energy(&p, &p, 1.0), f64::INFINITY);
    }

    #[test]
    fn composite_spec_sums_its_terms() {
        let spec = PotentialSpec::Composite {
            terms: vec![PotentialSpec::Harmonic { k: 2.0, r0: 0.0 }, PotentialSpec::Harmonic { k: 2.0, r0: 0.0 }],
        };
        let built = spec.build();
        let p = PairParams::new(0.0, 0.0);
        // two identical harmonic terms at r=1: 2 * (0.5*2*1^2) = 2.0
        assert!((built.energy(&p, &p, 1.0) - 2.0).abs() < 1e-12);
    }
}
