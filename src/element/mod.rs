//! The element algebra: the capability set the engine needs from a concrete
//! semigroup element type, and the two built-in element kinds that satisfy
//! it (boolean matrices and finite transformations).
//!
//! The engine is generic over `E: Element` and never looks past this trait
//! at an element's representation. A third-party element type (say, a
//! partial permutation, or a matrix over a different semiring) just needs
//! its own `impl Element for ...`.

pub mod bmat8;
pub mod transformation;

use std::fmt::Debug;
use std::hash::Hash;

/// Capability set required of a semigroup element for the Konieczny engine
/// to operate on it.
///
/// Laws an implementation must satisfy (see `spec.md` §3):
/// - `mul` is associative.
/// - `lambda(s.mul(g))` is a pure function of `(lambda(s), g)` — realised by
///   `lambda_act`.
/// - `rho(g.mul(s))` is a pure function of `(g, rho(s))` — realised by
///   `rho_act`.
/// - `rank` is monotone non-increasing under multiplication:
///   `rank(s.mul(t)) <= rank(s).min(rank(t))`.
pub trait Element: Copy + Eq + Hash + Ord + Debug {
    /// Right-action invariant (classifies one side of Green's relations,
    /// e.g. row space for boolean matrices, image for transformations).
    type Lambda: Copy + Eq + Hash + Ord + Debug;

    /// Left-action invariant (e.g. column space, kernel).
    type Rho: Copy + Eq + Hash + Ord + Debug;

    /// The "arity" shared by every generator of a semigroup: matrix side
    /// length, or transformation degree. Used only to reject elements from
    /// an incompatible universe (`KoniecznyError::IncompatibleGenerator`).
    fn degree(&self) -> usize;

    /// `self * other`, in that order.
    fn mul(&self, other: &Self) -> Self;

    /// `rank(self)`: an integer that is monotone non-increasing under
    /// multiplication and constant on a D-class.
    fn rank(&self) -> usize;

    /// `true` iff `self * self == self`.
    fn is_idempotent(&self) -> bool {
        self.mul(self) == *self
    }

    /// The right-action invariant λ(self).
    fn lambda(&self) -> Self::Lambda;

    /// The left-action invariant ρ(self).
    fn rho(&self) -> Self::Rho;

    /// `lambda(self * gen)`, computed from `lambda(self)` and `gen` alone.
    fn lambda_act(lambda: &Self::Lambda, gen: &Self) -> Self::Lambda;

    /// `rho(gen * self)`, computed from `gen` and `rho(self)` alone.
    fn rho_act(gen: &Self, rho: &Self::Rho) -> Self::Rho;
}
