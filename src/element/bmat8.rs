//! 8×8 boolean matrices (and, by zero-padding, any side ≤ 8) as a concrete
//! [`Element`].
//!
//! A row is a `u8` bitmask over its columns (bit `j` set means a 1 in
//! column `j`). Two matrices are R-equivalent iff they have the same *row
//! space* (the boolean-join closure of their rows), and L-equivalent iff
//! they have the same *column space* (the row space of the transpose) —
//! these are the standard Green's-relations facts for matrices over the
//! boolean semiring, and they are exactly what `lambda`/`rho` expose here.

use std::collections::BTreeSet;
use std::fmt;

use super::Element;

/// A boolean matrix of side `degree` (1..=8), stored as one byte per row.
/// Rows and bits at or beyond `degree` are always zero, which keeps
/// `Eq`/`Hash`/`Ord` well-defined without a separate "padding" convention.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BMat8 {
    degree: u8,
    rows: [u8; 8],
}

impl fmt::Debug for BMat8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.degree as usize;
        write!(f, "BMat8(")?;
        for i in 0..n {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:0width$b}", self.rows[i], width = n)?;
        }
        write!(f, ")")
    }
}

impl BMat8 {
    /// Builds a matrix from `degree * degree` row-major bits. Panics if
    /// `degree` is not in `1..=8` or `rows.len() != degree`, or any row's
    /// length differs from `degree` — this is a construction-time
    /// programmer error, not a runtime semigroup condition.
    pub fn new(rows: &[Vec<u8>]) -> Self {
        let degree = rows.len();
        assert!((1..=8).contains(&degree), "BMat8 degree must be in 1..=8");
        let mut packed = [0u8; 8];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), degree, "BMat8 must be square");
            let mut mask = 0u8;
            for (j, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    mask |= 1 << j;
                }
            }
            packed[i] = mask;
        }
        BMat8 { degree: degree as u8, rows: packed }
    }

    /// Builds a matrix directly from row bitmasks (bit `j` = column `j`).
    pub fn from_masks(degree: usize, masks: &[u8]) -> Self {
        assert!((1..=8).contains(&degree), "BMat8 degree must be in 1..=8");
        assert_eq!(masks.len(), degree);
        let col_mask = if degree == 8 { 0xff } else { (1u16 << degree) as u8 - 1 };
        let mut packed = [0u8; 8];
        for (i, &m) in masks.iter().enumerate() {
            packed[i] = m & col_mask;
        }
        BMat8 { degree: degree as u8, rows: packed }
    }

    /// The identity matrix of the given degree.
    pub fn identity(degree: usize) -> Self {
        assert!((1..=8).contains(&degree));
        let mut packed = [0u8; 8];
        for i in 0..degree {
            packed[i] = 1 << i;
        }
        BMat8 { degree: degree as u8, rows: packed }
    }

    /// The all-zero matrix of the given degree.
    pub fn zero(degree: usize) -> Self {
        assert!((1..=8).contains(&degree));
        BMat8 { degree: degree as u8, rows: [0u8; 8] }
    }

    /// Row `i` as a bitmask over columns.
    pub fn row(&self, i: usize) -> u8 {
        self.rows[i]
    }

    fn transpose(&self) -> BMat8 {
        let n = self.degree as usize;
        let mut t = [0u8; 8];
        for i in 0..n {
            for j in 0..n {
                if (self.rows[j] >> i) & 1 == 1 {
                    t[i] |= 1 << j;
                }
            }
        }
        BMat8 { degree: self.degree, rows: t }
    }

    /// `row · self` for a single row vector (a column-index bitmask),
    /// interpreting set bit `i` in `row` as "include row `i` of `self`".
    fn apply_row(&self, row: u8) -> u8 {
        let n = self.degree as usize;
        let mut acc = 0u8;
        for i in 0..n {
            if (row >> i) & 1 == 1 {
                acc |= self.rows[i];
            }
        }
        acc
    }

    /// `self · col` for a single column vector (a row-index bitmask).
    fn apply_col(&self, col: u8) -> u8 {
        let n = self.degree as usize;
        let mut acc = 0u8;
        for i in 0..n {
            if self.rows[i] & col != 0 {
                acc |= 1 << i;
            }
        }
        acc
    }

    /// Join-closure (under bitwise OR, including the zero row) of a set of
    /// row/column masks.
    fn closure(masks: &[u8]) -> BTreeSet<u8> {
        let basis: Vec<u8> = {
            let mut v: Vec<u8> = masks.iter().copied().filter(|&m| m != 0).collect();
            v.sort_unstable();
            v.dedup();
            v
        };
        let n = basis.len();
        let mut set = BTreeSet::new();
        set.insert(0u8);
        for mask in 0u32..(1u32 << n) {
            let mut acc = 0u8;
            for (k, &b) in basis.iter().enumerate() {
                if mask & (1 << k) != 0 {
                    acc |= b;
                }
            }
            set.insert(acc);
        }
        set
    }

    /// Minimal set of rows whose join-closure reproduces the full row
    /// space: the join-irreducible basis. Its size is the matrix's rank.
    fn row_space_basis(rows: &[u8]) -> Vec<u8> {
        let mut set: Vec<u8> = rows.iter().copied().filter(|&r| r != 0).collect();
        set.sort_unstable();
        set.dedup();
        loop {
            let mut redundant = None;
            for i in 0..set.len() {
                let target = set[i];
                let others: Vec<u8> =
                    set.iter().copied().enumerate().filter(|&(j, _)| j != i).map(|(_, v)| v).collect();
                if Self::is_join_of_subset(target, &others) {
                    redundant = Some(i);
                    break;
                }
            }
            match redundant {
                Some(i) => {
                    set.remove(i);
                }
                None => break,
            }
        }
        set
    }

    fn is_join_of_subset(target: u8, candidates: &[u8]) -> bool {
        let subs: Vec<u8> = candidates.iter().copied().filter(|&c| c != 0 && c & target == c).collect();
        let n = subs.len();
        if n == 0 {
            return false;
        }
        for mask in 1u32..(1u32 << n) {
            let mut acc = 0u8;
            for (k, &s) in subs.iter().enumerate() {
                if mask & (1 << k) != 0 {
                    acc |= s;
                }
            }
            if acc == target {
                return true;
            }
        }
        false
    }
}

impl Element for BMat8 {
    type Lambda = BTreeSet<u8>;
    type Rho = BTreeSet<u8>;

    fn degree(&self) -> usize {
        self.degree as usize
    }

    fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.degree, other.degree);
        let n = self.degree as usize;
        let mut rows = [0u8; 8];
        for i in 0..n {
            rows[i] = other.apply_row(self.rows[i]);
        }
        BMat8 { degree: self.degree, rows }
    }

    fn rank(&self) -> usize {
        Self::row_space_basis(&self.rows[..self.degree as usize]).len()
    }

    fn lambda(&self) -> Self::Lambda {
        Self::closure(&self.rows[..self.degree as usize])
    }

    fn rho(&self) -> Self::Rho {
        let t = self.transpose();
        Self::closure(&t.rows[..t.degree as usize])
    }

    fn lambda_act(lambda: &Self::Lambda, gen: &Self) -> Self::Lambda {
        lambda.iter().map(|&r| gen.apply_row(r)).collect()
    }

    fn rho_act(gen: &Self, rho: &Self::Rho) -> Self::Rho {
        rho.iter().map(|&c| gen.apply_col(c)).collect()
    }
}
