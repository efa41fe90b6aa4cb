use crate::bitvector::{ArrayBitVector, BitVector};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/* The `bitvector` crate does not implement `Eq`, but its equality is an equivalence. */
impl Eq for ArrayBitVector {}

impl ArrayBitVector {
    /// **(internal)** Panic when the given index is out of bounds. The underlying storage
    /// would silently accept some of these accesses.
    fn check_access(&self, index: usize) {
        if index >= self.len {
            panic!(
                "Accessing element {} in a BitVector of length {}.",
                index, self.len
            );
        }
    }

    /// A copy of this vector with the given index set.
    pub fn with(&self, index: usize) -> ArrayBitVector {
        let mut result = self.clone();
        result.set(index, true);
        result
    }

    /// A vector of the same length with all values inverted.
    pub fn complement(&self) -> ArrayBitVector {
        ArrayBitVector::from_ones(self.len, self.zeros())
    }
}

impl BitVector for ArrayBitVector {
    fn empty(len: usize) -> Self {
        ArrayBitVector {
            len,
            values: ::bitvector::BitVector::new(len),
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> bool {
        self.check_access(index);
        self.values.contains(index)
    }

    fn set(&mut self, index: usize, value: bool) {
        self.check_access(index);
        if value {
            self.values.insert(index);
        } else {
            self.values.remove(index);
        }
    }

    fn flip(&mut self, index: usize) {
        self.check_access(index);
        if self.values.contains(index) {
            self.values.remove(index);
        } else {
            self.values.insert(index);
        }
    }

    fn ones(&self) -> Vec<usize> {
        self.values.iter().filter(|i| *i < self.len).collect()
    }
}

impl Hash for ArrayBitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.ones().hash(state);
    }
}

impl PartialOrd for ArrayBitVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArrayBitVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| self.ones().cmp(&other.ones()))
    }
}

impl Display for ArrayBitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.display(f)
    }
}

impl Debug for ArrayBitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "ArrayBitVector({})[", self.len)?;
        let mut first = true;
        for i in self.ones() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", i)?;
            first = false;
        }
        write!(f, "]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::bitvector::{ArrayBitVector, BitVector};
    use std::collections::HashSet;

    #[test]
    fn test_array_bit_vector() {
        let mut bv = ArrayBitVector::empty(10);
        assert!(bv.ones().is_empty());
        bv.set(2, true);
        bv.flip(6);
        assert!(bv.get(2));
        assert!(bv.get(6));
        assert_eq!(vec![2, 6], bv.ones());
        assert_eq!(vec![0, 1, 3, 4, 5, 7, 8, 9], bv.zeros());
        assert_eq!(2, bv.count_ones());
        assert_eq!(bv, ArrayBitVector::from_ones(10, vec![2, 6]));
        assert_eq!("BV(10)[2 6]", bv.to_string());
        bv.set(6, false);
        assert!(!bv.get(6));
        bv.flip(2);
        assert!(!bv.get(2));
    }

    #[test]
    fn test_subset_and_disjoint() {
        let a = ArrayBitVector::from_ones(4, vec![0, 2]);
        let b = ArrayBitVector::from_ones(4, vec![0, 1, 2]);
        let c = ArrayBitVector::from_ones(4, vec![1, 3]);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(a.is_subset(&a));
        assert!(a.is_disjoint(&c));
        assert!(!b.is_disjoint(&c));
        assert_eq!(b, a.with(1));
        assert_eq!(c, a.complement());
    }

    #[test]
    fn test_hash_and_order() {
        let a = ArrayBitVector::from_ones(3, vec![0]);
        let b = ArrayBitVector::from_ones(3, vec![1]);
        let c = ArrayBitVector::from_ones(3, vec![0, 1]);
        assert!(a < c);
        assert!(c < b);
        let set: HashSet<ArrayBitVector> = vec![a.clone(), a, b].into_iter().collect();
        assert_eq!(2, set.len());
    }

    #[test]
    #[should_panic]
    fn test_array_bit_vector_invalid_access() {
        let mut b = ArrayBitVector::empty(80);
        b.flip(100);
    }
}
