//! Action orbits: the two lazily-grown closures of Λ/Ρ invariants under the
//! generators (`spec.md` §4.2).
//!
//! An [`Orbit`] is deliberately dumb: it knows nothing about semigroups,
//! elements, or D-classes, only about growing a dense, deduplicated, indexed
//! list of values one generator-application at a time, and remembering the
//! Schreier edge that produced each one. The engine drives two of these (one
//! for Λ, one for Ρ) in lock-step; neither orbit is ever closed in
//! isolation.

use std::collections::HashMap;
use std::hash::Hash;

/// A single discovered orbit point plus its Schreier edge back toward a
/// seed (`parent = None` for seeds themselves).
#[derive(Debug, Clone)]
struct OrbitPoint<V> {
    value: V,
    parent: Option<usize>,
    gen_used: Option<usize>,
}

/// A lazily-growable, deduplicated, indexed orbit of Λ or Ρ values.
#[derive(Debug, Clone)]
pub struct Orbit<V: Clone + Eq + Hash> {
    points: Vec<OrbitPoint<V>>,
    index: HashMap<V, usize>,
    /// Index of the next point whose generator images have not yet been
    /// computed.
    frontier: usize,
}

impl<V: Clone + Eq + Hash> Default for Orbit<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash> Orbit<V> {
    pub fn new() -> Self {
        Orbit { points: Vec::new(), index: HashMap::new(), frontier: 0 }
    }

    /// Inserts a value with no Schreier parent if it is not already present.
    /// Used both to seed the orbit from the generators' own Λ/Ρ values, and
    /// (by the D-class builders) to register a value discovered through a
    /// direct class closure rather than through [`Orbit::extend_one`].
    /// Points inserted this way have no recoverable Schreier word: calling
    /// [`Orbit::trace`] on one returns an empty word rather than the (here,
    /// unknown) path from a generator seed.
    pub fn ensure(&mut self, value: V) -> usize {
        if let Some(&i) = self.index.get(&value) {
            return i;
        }
        let i = self.points.len();
        self.index.insert(value.clone(), i);
        self.points.push(OrbitPoint { value, parent: None, gen_used: None });
        i
    }

    /// Seeds the orbit with a batch of initial points (typically
    /// `lambda(g)`/`rho(g)` for every generator `g`).
    pub fn seed(&mut self, values: impl IntoIterator<Item = V>) {
        for v in values {
            self.ensure(v);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` once every discovered point has had every generator applied
    /// to it at least once.
    pub fn is_exhausted(&self) -> bool {
        self.frontier >= self.points.len()
    }

    pub fn get(&self, i: usize) -> &V {
        &self.points[i].value
    }

    pub fn position(&self, value: &V) -> Option<usize> {
        self.index.get(value).copied()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    /// Pops one unexpanded point and applies `act(point, generator)` for
    /// every generator, recording any newly-discovered images. Returns
    /// whether any new point was added. A no-op (returning `false`) once
    /// [`Orbit::is_exhausted`].
    pub fn extend_one<G>(&mut self, generators: &[G], act: impl Fn(&V, &G) -> V) -> bool {
        if self.is_exhausted() {
            return false;
        }
        let idx = self.frontier;
        self.frontier += 1;
        let value = self.points[idx].value.clone();
        let mut added = false;
        for (g_idx, g) in generators.iter().enumerate() {
            let image = act(&value, g);
            if !self.index.contains_key(&image) {
                let i = self.points.len();
                self.index.insert(image.clone(), i);
                self.points.push(OrbitPoint { value: image, parent: Some(idx), gen_used: Some(g_idx) });
                added = true;
            }
        }
        added
    }

    /// Reconstructs the generator-index sequence realising point `i` from
    /// whichever seed its Schreier tree is rooted at. Empty for a seed, or
    /// for a point inserted via [`Orbit::ensure`] outside of normal
    /// extension.
    pub fn trace(&self, mut i: usize) -> Vec<usize> {
        let mut word = Vec::new();
        while let Some(g) = self.points[i].gen_used {
            word.push(g);
            i = self.points[i].parent.expect("gen_used implies a parent");
        }
        word.reverse();
        word
    }
}
