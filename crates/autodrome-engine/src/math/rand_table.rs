//! Pre-generated random lookup tables.
//!
//! Filling thousands of gene arrays per generation draws a lot of random
//! values. A [`RandomTable`] pays the RNG cost once: it pre-generates a
//! fixed-size array and then serves values cyclically starting from a
//! random offset per use. The result is close enough to fresh uniform
//! draws for simulation purposes; it is NOT suitable for anything
//! security-related.

use rand::Rng;

/// A fixed table of pre-generated random values.
#[derive(Debug, Clone)]
pub struct RandomTable<T> {
    values: Vec<T>,
}

impl<T: Copy> RandomTable<T> {
    /// Builds a table of `len` values drawn by `sample`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn generate<R, F>(len: usize, rng: &mut R, mut sample: F) -> Self
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> T,
    {
        assert!(len > 0, "random table must not be empty");
        let values = (0..len).map(|_| sample(rng)).collect();
        Self { values }
    }

    /// Number of pre-generated values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an infinite cyclic stream over the table, starting at a
    /// random offset.
    pub fn stream<R>(&self, rng: &mut R) -> TableStream<'_, T>
    where
        R: Rng + ?Sized,
    {
        TableStream {
            values: &self.values,
            index: rng.random_range(0..self.values.len()),
        }
    }
}

/// Infinite cyclic iterator over a [`RandomTable`].
#[derive(Debug)]
pub struct TableStream<'a, T> {
    values: &'a [T],
    index: usize,
}

impl<T: Copy> Iterator for TableStream<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.values[self.index];
        self.index = (self.index + 1) % self.values.len();
        Some(value)
    }
}
