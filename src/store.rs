//! The D-class store: an arena of discovered D-classes plus the Λ/Ρ indexes
//! that make membership queries fast (`spec.md` §4.3).

use std::collections::HashMap;

use crate::element::Element;
use crate::nonregular::NonRegularDClass;
use crate::orbit::Orbit;
use crate::regular::RegularDClass;

/// A stable, non-owning handle to a D-class inside a [`DClassStore`]. Never
/// a back-pointer into the arena's storage: it survives reallocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DClassId(pub(crate) usize);

impl DClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Either kind of D-class, exposed through one shared query surface.
#[derive(Debug, Clone)]
pub enum DClass<E: Element> {
    Regular(RegularDClass<E>),
    NonRegular(NonRegularDClass<E>),
}

impl<E: Element> DClass<E> {
    pub fn is_regular(&self) -> bool {
        matches!(self, DClass::Regular(_))
    }

    pub fn rank(&self) -> usize {
        match self {
            DClass::Regular(r) => r.rank(),
            DClass::NonRegular(n) => n.rank(),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            DClass::Regular(r) => r.size(),
            DClass::NonRegular(n) => n.size(),
        }
    }

    pub fn size_h_class(&self) -> usize {
        match self {
            DClass::Regular(r) => r.size_h_class(),
            DClass::NonRegular(n) => n.size_h_class(),
        }
    }

    pub fn nr_left_reps(&self) -> usize {
        match self {
            DClass::Regular(r) => r.nr_left_reps(),
            DClass::NonRegular(n) => n.nr_left_reps(),
        }
    }

    pub fn nr_right_reps(&self) -> usize {
        match self {
            DClass::Regular(r) => r.nr_right_reps(),
            DClass::NonRegular(n) => n.nr_right_reps(),
        }
    }

    pub fn nr_idempotents(&self) -> usize {
        match self {
            DClass::Regular(r) => r.nr_idempotents(),
            DClass::NonRegular(n) => n.nr_idempotents(),
        }
    }

    pub fn contains(&self, x: &E) -> bool {
        match self {
            DClass::Regular(r) => r.contains(x),
            DClass::NonRegular(n) => n.contains(x),
        }
    }

    fn lambda_values(&self) -> Vec<E::Lambda> {
        match self {
            DClass::Regular(r) => r.lambda_values().copied().collect(),
            DClass::NonRegular(n) => n.lambda_values().copied().collect(),
        }
    }

    fn rho_values(&self) -> Vec<E::Rho> {
        match self {
            DClass::Regular(r) => r.rho_values().copied().collect(),
            DClass::NonRegular(n) => n.rho_values().copied().collect(),
        }
    }
}

/// The arena of discovered D-classes, indexed by Λ- and Ρ-orbit position for
/// O(1)-ish membership lookups.
#[derive(Debug, Default)]
pub struct DClassStore<E: Element> {
    classes: Vec<DClass<E>>,
    lambda_index: HashMap<usize, DClassId>,
    rho_index: HashMap<usize, DClassId>,
}

impl<E: Element> DClassStore<E> {
    pub fn new() -> Self {
        DClassStore { classes: Vec::new(), lambda_index: HashMap::new(), rho_index: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, id: DClassId) -> &DClass<E> {
        &self.classes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DClass<E>> {
        self.classes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = DClassId> {
        (0..self.classes.len()).map(DClassId)
    }

    fn insert(
        &mut self,
        class: DClass<E>,
        lambda_orbit: &mut Orbit<E::Lambda>,
        rho_orbit: &mut Orbit<E::Rho>,
    ) -> DClassId {
        let id = DClassId(self.classes.len());
        for l in class.lambda_values() {
            let pos = lambda_orbit.ensure(l);
            self.lambda_index.entry(pos).or_insert(id);
        }
        for r in class.rho_values() {
            let pos = rho_orbit.ensure(r);
            self.rho_index.entry(pos).or_insert(id);
        }
        self.classes.push(class);
        id
    }

    pub fn insert_regular(
        &mut self,
        class: RegularDClass<E>,
        lambda_orbit: &mut Orbit<E::Lambda>,
        rho_orbit: &mut Orbit<E::Rho>,
    ) -> DClassId {
        self.insert(DClass::Regular(class), lambda_orbit, rho_orbit)
    }

    pub fn insert_nonregular(
        &mut self,
        class: NonRegularDClass<E>,
        lambda_orbit: &mut Orbit<E::Lambda>,
        rho_orbit: &mut Orbit<E::Rho>,
    ) -> DClassId {
        self.insert(DClass::NonRegular(class), lambda_orbit, rho_orbit)
    }

    /// Looks up the D-class of `x`, if it has already been discovered.
    /// Hashes `lambda(x)` and `rho(x)` against the orbit positions; if both
    /// resolve to the same class, confirms membership directly against that
    /// class before returning it (agreeing on λ and ρ alone is necessary but
    /// not, on its own, proof of membership).
    pub fn find(
        &self,
        x: &E,
        lambda_orbit: &Orbit<E::Lambda>,
        rho_orbit: &Orbit<E::Rho>,
    ) -> Option<DClassId> {
        let lam_pos = lambda_orbit.position(&x.lambda())?;
        let rho_pos = rho_orbit.position(&x.rho())?;
        let c1 = *self.lambda_index.get(&lam_pos)?;
        let c2 = *self.rho_index.get(&rho_pos)?;
        if c1 == c2 && self.classes[c1.0].contains(x) {
            Some(c1)
        } else {
            None
        }
    }
}
