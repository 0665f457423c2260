use std::cmp::Ordering;

use crate::TermId;

/// Sparse term-weight vector. Entries are kept sorted by term id with no
/// duplicates and no zero weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    pub fn new() -> Self { Self::default() }

    /// Build from arbitrary (term, weight) pairs. Duplicate terms are summed,
    /// zero weights dropped.
    pub fn from_pairs<I: IntoIterator<Item = (TermId, f32)>>(pairs: I) -> Self {
        let mut entries: Vec<(TermId, f32)> = pairs.into_iter().collect();
        entries.sort_by_key(|(t, _)| *t);
        let mut merged: Vec<(TermId, f32)> = Vec::with_capacity(entries.len());
        for (t, w) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == t => *acc += w,
                _ => merged.push((t, w)),
            }
        }
        merged.retain(|(_, w)| *w != 0.0);
        Self { entries: merged }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, term: TermId) -> Option<f32> {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f32)> + '_ {
        self.entries.iter().copied()
    }

    /// Euclidean magnitude.
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length. A zero vector is left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 { return; }
        for (_, w) in self.entries.iter_mut() { *w /= norm; }
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine of the angle between two vectors; 0 when either has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs([(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(3), Some(1.5));
        assert_eq!(v.get(2), None);
    }

    #[test]
    fn dot_only_counts_shared_terms() {
        let a = SparseVector::from_pairs([(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = SparseVector::from_pairs([(2, 4.0), (4, 1.0), (5, 1.0)]);
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(a.dot(&b), b.dot(&a));
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let a = SparseVector::from_pairs([(0, 0.3), (7, 1.2)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let a = SparseVector::from_pairs([(0, 1.0)]);
        let zero = SparseVector::new();
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn cosine_is_symmetric_and_bounded() {
        let a = SparseVector::from_pairs([(0, 1.0), (1, 2.0)]);
        let b = SparseVector::from_pairs([(1, 1.0), (2, 5.0)]);
        let ab = cosine_similarity(&a, &b);
        assert_eq!(ab, cosine_similarity(&b, &a));
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn normalize_yields_unit_length() {
        let mut v = SparseVector::from_pairs([(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.get(0).unwrap_or_default() - 0.6).abs() < 1e-6);
    }
}
