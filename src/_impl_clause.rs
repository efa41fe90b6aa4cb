use crate::bitvector::{ArrayBitVector, BitVector};
use crate::Clause;

impl Clause {
    /// Create a clause over `dimension` regulators which contains the regulators at the
    /// given positions.
    pub fn from_indices(dimension: usize, indices: Vec<usize>) -> Clause {
        Clause {
            signature: ArrayBitVector::from_ones(dimension, indices),
        }
    }

    pub fn from_signature(signature: ArrayBitVector) -> Clause {
        Clause { signature }
    }

    pub fn signature(&self) -> &ArrayBitVector {
        &self.signature
    }

    /// Positions (in the owning function's regulator list) of the regulators in this clause.
    pub fn indices(&self) -> Vec<usize> {
        self.signature.ones()
    }

    /// The number of regulators of the owning function.
    pub fn dimension(&self) -> usize {
        self.signature.len()
    }

    /// The number of regulators in this clause.
    pub fn size(&self) -> usize {
        self.signature.count_ones()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.signature.len() && self.signature.get(index)
    }

    /// True if every regulator of this clause also appears in `other`.
    pub fn is_subset(&self, other: &Clause) -> bool {
        self.signature.is_subset(&other.signature)
    }

    /// A copy of this clause extended with the regulator at `index`.
    pub fn with(&self, index: usize) -> Clause {
        Clause {
            signature: self.signature.with(index),
        }
    }

    /// Reduce a list of clauses to its minimal elements (absorption `x || (x && y) = x`),
    /// sorted and without duplicates.
    pub fn minimize(mut clauses: Vec<Clause>) -> Vec<Clause> {
        clauses.sort_by(|a, b| a.size().cmp(&b.size()).then_with(|| a.cmp(b)));
        clauses.dedup();
        let mut result: Vec<Clause> = Vec::with_capacity(clauses.len());
        for clause in clauses {
            if !result.iter().any(|kept| kept.is_subset(&clause)) {
                result.push(clause);
            }
        }
        result.sort();
        result
    }
}
