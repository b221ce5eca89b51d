//! Regular D-class construction (`spec.md` §4.4).
//!
//! A regular D-class is built from a single idempotent `e` as
//! `D = ⋃_{ℓ∈Left} ⋃_{h∈H} ⋃_{r∈Right} ℓ·h·r`, where:
//! - `H = H(e) = e·S·e ∩ Stab(λ(e)) ∩ Stab(ρ(e))`, a group with identity `e`.
//! - `Left` is one representative per λ-point reachable from `e` by
//!   rank-preserving right multiplication (the "Λ-cosets").
//! - `Right` is one representative per ρ-point reachable from `e` by
//!   rank-preserving left multiplication (the "Ρ-cosets").

use std::collections::{BTreeSet, HashSet};

use crate::element::Element;
use crate::error::{KoniecznyError, Result};

/// A fully-enumerated regular D-class, anchored at its idempotent.
#[derive(Debug, Clone)]
pub struct RegularDClass<E: Element> {
    idempotent: E,
    rank: usize,
    h_class: Vec<E>,
    left_reps: Vec<E>,
    right_reps: Vec<E>,
    lambda_values: BTreeSet<E::Lambda>,
    rho_values: BTreeSet<E::Rho>,
}

impl<E: Element> RegularDClass<E> {
    /// Builds the D-class of `e`. Fails with [`KoniecznyError::NotIdempotent`]
    /// if `e` is not actually idempotent.
    pub fn new(e: E, generators: &[E]) -> Result<Self> {
        if !e.is_idempotent() {
            return Err(KoniecznyError::NotIdempotent);
        }
        let rank = e.rank();
        let h_class = compute_h_class(e, generators);
        let left_reps = close_right(e, rank, generators);
        let right_reps = close_left(e, rank, generators);
        let lambda_values = left_reps.iter().map(|l| l.lambda()).collect();
        let rho_values = right_reps.iter().map(|r| r.rho()).collect();
        Ok(RegularDClass { idempotent: e, rank, h_class, left_reps, right_reps, lambda_values, rho_values })
    }

    pub fn idempotent(&self) -> &E {
        &self.idempotent
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.left_reps.len() * self.h_class.len() * self.right_reps.len()
    }

    pub fn size_h_class(&self) -> usize {
        self.h_class.len()
    }

    pub fn nr_left_reps(&self) -> usize {
        self.left_reps.len()
    }

    pub fn nr_right_reps(&self) -> usize {
        self.right_reps.len()
    }

    pub fn left_reps(&self) -> &[E] {
        &self.left_reps
    }

    pub fn right_reps(&self) -> &[E] {
        &self.right_reps
    }

    pub fn h_class(&self) -> &[E] {
        &self.h_class
    }

    pub fn lambda_values(&self) -> impl Iterator<Item = &E::Lambda> {
        self.lambda_values.iter()
    }

    pub fn rho_values(&self) -> impl Iterator<Item = &E::Rho> {
        self.rho_values.iter()
    }

    /// Number of idempotents in the class, found by brute enumeration of
    /// every `ℓ·h·r` rather than the cell-local "unit of H" shortcut: this
    /// costs the same as enumerating the class at all, and needs no extra
    /// proof obligation beyond the definition `(ℓhr)² = ℓhr`.
    pub fn nr_idempotents(&self) -> usize {
        let mut count = 0;
        for l in &self.left_reps {
            for h in &self.h_class {
                let lh = l.mul(h);
                for r in &self.right_reps {
                    if lh.mul(r).is_idempotent() {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    pub fn contains(&self, x: &E) -> bool {
        if x.rank() != self.rank {
            return false;
        }
        for l in &self.left_reps {
            for h in &self.h_class {
                let lh = l.mul(h);
                for r in &self.right_reps {
                    if lh.mul(r) == *x {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Materialises the whole class. Only meant for small classes (tests,
    /// debugging) — callers on the hot path should stay at the grid level.
    pub fn elements(&self) -> Vec<E> {
        let mut out = Vec::with_capacity(self.size());
        for l in &self.left_reps {
            for h in &self.h_class {
                let lh = l.mul(h);
                for r in &self.right_reps {
                    out.push(lh.mul(r));
                }
            }
        }
        out
    }
}

/// Closes `{e}` under right multiplication by generators that do not drop
/// rank, deduplicated by λ-value: one representative per Λ-coset of `e`.
/// Sorted by `E`'s total order before returning, since the `HashMap` used
/// for dedup has no useful iteration order of its own (`spec.md` §5's
/// determinism guarantee requires enumeration within a class to not depend
/// on hash-table iteration).
fn close_right<E: Element>(e: E, rank: usize, generators: &[E]) -> Vec<E> {
    let mut by_lambda: std::collections::HashMap<E::Lambda, E> = std::collections::HashMap::new();
    by_lambda.insert(e.lambda(), e);
    let mut frontier = vec![e];
    while let Some(cur) = frontier.pop() {
        for g in generators {
            let candidate = cur.mul(g);
            if candidate.rank() == rank {
                let lam = candidate.lambda();
                if !by_lambda.contains_key(&lam) {
                    by_lambda.insert(lam, candidate);
                    frontier.push(candidate);
                }
            }
        }
    }
    let mut out: Vec<E> = by_lambda.into_values().collect();
    out.sort();
    out
}

/// Symmetric to [`close_right`]: closes `{e}` under left multiplication,
/// deduplicated by ρ-value.
fn close_left<E: Element>(e: E, rank: usize, generators: &[E]) -> Vec<E> {
    let mut by_rho: std::collections::HashMap<E::Rho, E> = std::collections::HashMap::new();
    by_rho.insert(e.rho(), e);
    let mut frontier = vec![e];
    while let Some(cur) = frontier.pop() {
        for g in generators {
            let candidate = g.mul(&cur);
            if candidate.rank() == rank {
                let rh = candidate.rho();
                if !by_rho.contains_key(&rh) {
                    by_rho.insert(rh, candidate);
                    frontier.push(candidate);
                }
            }
        }
    }
    let mut out: Vec<E> = by_rho.into_values().collect();
    out.sort();
    out
}

/// `H(e) = e·S·e ∩ Stab(λ(e)) ∩ Stab(ρ(e))`: starts from `{e}`, closes under
/// right multiplication by generators that fix both invariants, sandwiching
/// every new element between `e` to stay inside `e·S·e`.
fn compute_h_class<E: Element>(e: E, generators: &[E]) -> Vec<E> {
    let lam = e.lambda();
    let rho = e.rho();
    let mut h_set: HashSet<E> = HashSet::new();
    h_set.insert(e);
    let mut frontier = vec![e];
    while let Some(cur) = frontier.pop() {
        for g in generators {
            let candidate = cur.mul(g);
            if candidate.lambda() == lam && candidate.rho() == rho {
                let sandwiched = e.mul(&candidate).mul(&e);
                if h_set.insert(sandwiched) {
                    frontier.push(sandwiched);
                }
            }
        }
    }
    let mut v: Vec<E> = h_set.into_iter().collect();
    v.sort();
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::bmat8::BMat8;

    #[test]
    fn identity_class_of_full_symmetric_group_has_expected_shape() {
        let id = BMat8::identity(4);
        // adjacent transpositions (0 1), (1 2), (2 3) generate all of S_4
        let gens = vec![
            id,
            BMat8::from_masks(4, &[0b0010, 0b0001, 0b0100, 0b1000]),
            BMat8::from_masks(4, &[0b0001, 0b0100, 0b0010, 0b1000]),
            BMat8::from_masks(4, &[0b0001, 0b0010, 0b1000, 0b0100]),
        ];
        let class = RegularDClass::new(id, &gens).unwrap();
        assert_eq!(class.rank(), 4);
        // top class of the full 4x4 boolean matrix monoid under these
        // generators is exactly the symmetric group S_4, order 24.
        assert_eq!(class.size(), 24);
        assert_eq!(class.nr_idempotents(), 1);
        assert!(class.contains(&id));
    }

    #[test]
    fn not_idempotent_is_rejected() {
        let a = BMat8::from_masks(3, &[0b010, 0b001, 0b100]);
        assert!(RegularDClass::new(a, &[a]).is_err());
    }
}
