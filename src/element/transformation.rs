//! Finite transformations of `{0, …, n−1}` (`n <= 16`) as a concrete
//! [`Element`].
//!
//! Two transformations are R-equivalent iff they have the same *kernel*
//! (the partition `{(i, j) : t(i) = t(j)}`), and L-equivalent iff they have
//! the same *image* — the standard Green's-relations facts for `T_n`. Here
//! `lambda` is the image (a right-evolving invariant: `im(s·g) = g(im(s))`)
//! and `rho` is the kernel (a left-evolving invariant:
//! `ker(g·s) = g^{-1}(ker(s))`), matching the laws `spec.md` §3 requires of
//! `lambda_act`/`rho_act`.
//!
//! Composition is left-to-right: `(a.mul(b))(x) == b(a(x))`.

use std::collections::BTreeSet;
use std::fmt;

use super::Element;

/// Upper bound on the degree a [`Transformation`] can represent, chosen to
/// comfortably cover every scenario in `spec.md` §8 (the largest is degree
/// 9) while keeping the type `Copy` and cache-friendly.
pub const MAX_DEGREE: usize = 16;

/// A function `{0, …, degree-1} -> {0, …, degree-1}`, stored as a fixed
/// array so the type stays `Copy`. Entries at or beyond `degree` are always
/// `0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transformation {
    degree: u8,
    #[cfg_attr(feature = "serde", serde(with = "serde_big_array_shim"))]
    images: [u8; MAX_DEGREE],
}

#[cfg(feature = "serde")]
mod serde_big_array_shim {
    //! `serde`'s derive only has blanket array support up to length 32, so
    //! this would in fact already work without a shim for `MAX_DEGREE = 16`.
    //! Kept minimal and explicit rather than pulling in `serde-big-array`
    //! for an array this small.
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(arr: &[u8; super::MAX_DEGREE], s: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&arr[..], s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; super::MAX_DEGREE], D::Error> {
        let v: Vec<u8> = serde::Deserialize::deserialize(d)?;
        let mut arr = [0u8; super::MAX_DEGREE];
        let n = v.len().min(super::MAX_DEGREE);
        arr[..n].copy_from_slice(&v[..n]);
        Ok(arr)
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transformation({:?})", &self.images[..self.degree as usize])
    }
}

impl Transformation {
    /// Builds a transformation from its image array. Panics if `images` is
    /// empty, longer than [`MAX_DEGREE`], or contains a value `>= images.len()`
    /// — these are programmer errors at construction time, not semigroup
    /// conditions.
    pub fn new(images: &[u8]) -> Self {
        let degree = images.len();
        assert!((1..=MAX_DEGREE).contains(&degree), "degree must be in 1..={MAX_DEGREE}");
        let mut arr = [0u8; MAX_DEGREE];
        for (i, &v) in images.iter().enumerate() {
            assert!((v as usize) < degree, "image value out of range");
            arr[i] = v;
        }
        Transformation { degree: degree as u8, images: arr }
    }

    /// The identity transformation of the given degree.
    pub fn identity(degree: usize) -> Self {
        assert!((1..=MAX_DEGREE).contains(&degree));
        let mut arr = [0u8; MAX_DEGREE];
        for (i, slot) in arr.iter_mut().enumerate().take(degree) {
            *slot = i as u8;
        }
        Transformation { degree: degree as u8, images: arr }
    }

    /// `self(point)`.
    pub fn apply(&self, point: u8) -> u8 {
        self.images[point as usize]
    }

    /// Canonical first-occurrence labelling of the kernel partition induced
    /// by reading off `values[i]` for `i` in `0..degree`: equal `values`
    /// partitions produce equal results regardless of the raw labels used.
    fn canonicalize_partition(values: &[u8], degree: usize) -> Vec<u8> {
        let mut label_of = [u8::MAX; MAX_DEGREE];
        let mut next_label = 0u8;
        let mut out = Vec::with_capacity(degree);
        for &v in &values[..degree] {
            let slot = &mut label_of[v as usize];
            if *slot == u8::MAX {
                *slot = next_label;
                next_label += 1;
            }
            out.push(*slot);
        }
        out
    }
}

impl Element for Transformation {
    type Lambda = BTreeSet<u8>;
    type Rho = Vec<u8>;

    fn degree(&self) -> usize {
        self.degree as usize
    }

    fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.degree, other.degree);
        let n = self.degree as usize;
        let mut images = [0u8; MAX_DEGREE];
        for i in 0..n {
            images[i] = other.images[self.images[i] as usize];
        }
        Transformation { degree: self.degree, images }
    }

    fn rank(&self) -> usize {
        let n = self.degree as usize;
        let set: BTreeSet<u8> = self.images[..n].iter().copied().collect();
        set.len()
    }

    fn lambda(&self) -> Self::Lambda {
        let n = self.degree as usize;
        self.images[..n].iter().copied().collect()
    }

    fn rho(&self) -> Self::Rho {
        let n = self.degree as usize;
        Self::canonicalize_partition(&self.images, n)
    }

    fn lambda_act(lambda: &Self::Lambda, gen: &Self) -> Self::Lambda {
        lambda.iter().map(|&p| gen.apply(p)).collect()
    }

    fn rho_act(gen: &Self, rho: &Self::Rho) -> Self::Rho {
        let n = gen.degree as usize;
        let pulled: Vec<u8> = (0..n).map(|i| rho[gen.apply(i as u8) as usize]).collect();
        Self::canonicalize_partition(&pulled, n)
    }
}
