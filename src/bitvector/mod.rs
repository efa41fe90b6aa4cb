//! Bit vectors used as clause signatures.
//!
//! A clause of a regulatory function is a subset of the function's regulators. We store
//! it as a fixed-length sequence of booleans indexed by the regulator's position in the
//! function, which makes the subset tests performed by the function lattice cheap.
//!
//! ```rust
//! use modrev::bitvector::{ArrayBitVector, BitVector};
//! let mut bv = ArrayBitVector::empty(4);
//! assert_eq!(4, bv.len());
//! bv.flip(1);
//! bv.set(2, true);
//! assert!(bv.get(1));
//! assert!(!bv.get(3));
//! assert_eq!(vec![1, 2], bv.ones());
//! assert!(ArrayBitVector::from_ones(4, vec![1]).is_subset(&bv));
//! // Prints BV(4)[1 2].
//! println!("{}", bv);
//! ```

use std::fmt::{Display, Formatter};

mod _impl_array_bit_vector;

/// `BitVector` is a collection of boolean values of a fixed length.
pub trait BitVector: Clone + Eq + Display {
    /// Create a new `BitVector` with the given length, initialized to `false`.
    fn empty(len: usize) -> Self;

    /// Create a new `BitVector` which contains `items` specified in the given vector.
    fn from_ones(len: usize, items: Vec<usize>) -> Self {
        let mut bits = Self::empty(len);
        for i in items {
            bits.set(i, true);
        }
        bits
    }

    /// The number of elements stored in this `BitVector`.
    fn len(&self) -> usize;

    /// Get the boolean value at the given `index`.
    fn get(&self, index: usize) -> bool;

    /// Set the boolean `value` at the given `index`.
    fn set(&mut self, index: usize, value: bool);

    /// Invert the value at the given `index`.
    fn flip(&mut self, index: usize);

    /// A vector of the indices of this `BitVector` which are set.
    fn ones(&self) -> Vec<usize> {
        (0..self.len()).filter(|i| self.get(*i)).collect()
    }

    /// A vector of the indices of this `BitVector` which are *not* set.
    fn zeros(&self) -> Vec<usize> {
        (0..self.len()).filter(|i| !self.get(*i)).collect()
    }

    /// The number of set indices.
    fn count_ones(&self) -> usize {
        self.ones().len()
    }

    /// True if every index set in `self` is also set in `other`.
    fn is_subset(&self, other: &Self) -> bool {
        self.ones().into_iter().all(|i| i < other.len() && other.get(i))
    }

    /// True if no index is set in both vectors.
    fn is_disjoint(&self, other: &Self) -> bool {
        self.ones()
            .into_iter()
            .all(|i| i >= other.len() || !other.get(i))
    }

    /// A helper method for `Display` trait implementations.
    fn display(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "BV({})[", self.len())?;
        let mut first = true;
        for i in self.ones() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{i}")?;
            first = false;
        }
        write!(f, "]")?;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `BitVector` implementation that uses the explicit implementation from the `bitvector` crate.
///
/// Unlike the underlying storage, `ArrayBitVector` is hashable and totally ordered. Vectors are
/// ordered by length first and then lexicographically by their set indices.
#[derive(Clone, PartialEq)]
pub struct ArrayBitVector {
    len: usize,
    values: ::bitvector::BitVector,
}
