/// An iterator over all `k`-element combinations of a slice, in lexicographic order of
/// positions. For `k = 0` it yields a single empty combination, for `k > n` nothing.
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T: Clone> Combinations<'a, T> {
    pub fn new(items: &'a [T], k: usize) -> Combinations<'a, T> {
        Combinations {
            items,
            indices: (0..k).collect(),
            done: k > items.len(),
        }
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.indices.iter().map(|i| self.items[*i].clone()).collect();
        let n = self.items.len();
        let k = self.indices.len();
        match (0..k).rev().find(|i| self.indices[*i] < n - k + i) {
            None => self.done = true,
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
        }
        Some(result)
    }
}
