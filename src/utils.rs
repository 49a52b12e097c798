/// A trait that provides easy access to the first element of a slice.
///
/// Callers must guarantee the slice is non-empty.
pub trait Front<T> {
    fn front(&self) -> &T;
}

/// A trait that provides easy access to the last element of a slice.
///
/// Callers must guarantee the slice is non-empty.
pub trait Back<T> {
    fn back(&self) -> &T;
    fn mut_back(&mut self) -> &mut T;
}

impl<T> Front<T> for [T] {
    #[inline(always)]
    fn front(&self) -> &T {
        &self[0]
    }
}

impl<T> Back<T> for [T] {
    #[inline(always)]
    fn back(&self) -> &T {
        &self[self.len() - 1]
    }
    #[inline(always)]
    fn mut_back(&mut self) -> &mut T {
        let i = self.len() - 1;
        &mut self[i]
    }
}

/// Computes the dot product of two equal-length slices.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Computes the mean squared error between `actual` and `expected`.
pub fn mean_square_error(actual: &[f64], expected: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), expected.len());
    if actual.is_empty() {
        return 0.0;
    }
    let error: f64 = actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e) * (a - e))
        .sum();
    error / (actual.len() as f64)
}
