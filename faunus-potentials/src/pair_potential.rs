/// The per-atom-type parameters a pair potential needs to evaluate one
/// interaction: everything else (distance) is supplied by the caller so the
/// potential itself stays position- and geometry-agnostic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairParams {
    pub radius: f64,
    pub charge: f64,
}

impl PairParams {
    pub fn new(radius: f64, charge: f64) -> PairParams {
        PairParams { radius, charge }
    }
}

/// A pairwise interaction, evaluated purely from each particle's
/// [`PairParams`] and the squared distance between them, in thermal units.
///
/// `to_kT` is a historical scaling factor some potentials (mixed-unit force
/// fields) need to convert their native energy unit into kT; most return 1.
pub trait PairPotential {
    fn energy(&self, a: &PairParams, b: &PairParams, squared_distance: f64) -> f64;

    fn to_kT(&self) -> f64 {
        1.0
    }
}

impl<P: PairPotential + ?Sized> PairPotential for Box<P> {
    fn energy(&self, a: &PairParams, b: &PairParams, squared_distance: f64) -> f64 {
        (**self).energy(a, b, squared_distance)
    }

    fn to_kT(&self) -> f64 {
        (**self).to_kT()
    }
}
