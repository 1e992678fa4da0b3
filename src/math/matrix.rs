use crate::error::{NetworkError, Result};

/// Row-major matrix backed by a single contiguous allocation.
///
/// A layer stores its weights as one of these: row `j` holds the incoming
/// weights of neuron `j`, so `cols` is the layer's input arity.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix.
    ///
    /// Fails with `AllocationFailure` if the element count overflows `usize`
    /// or the allocator refuses the request, so a matrix is either fully
    /// allocated or not created at all.
    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        let len = rows
            .checked_mul(cols)
            .ok_or(NetworkError::AllocationFailure { requested: usize::MAX })?;
        let data = zeroed_vec(len)?;
        Ok(Matrix { rows, cols, data })
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Applies `functor` to every element in place.
    pub fn map_in_place<F>(&mut self, mut functor: F)
    where
        F: FnMut(f64) -> f64,
    {
        fill_with(&mut self.data, functor);
    }
}

/// Replaces every element of `values` with `functor(element)`.
pub(crate) fn fill_with<F>(values: &mut [f64], mut functor: F)
where
    F: FnMut(f64) -> f64,
{
    for x in values.iter_mut() {
        *x = functor(*x);
    }
}

/// `init + sum(a[k] * b[k])`, accumulated left to right.
pub(crate) fn dot_from(init: f64, a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).fold(init, |acc, (x, y)| acc + x * y)
}

/// Allocates `len` zeros, reporting allocator refusal instead of aborting.
pub(crate) fn zeroed_vec(len: usize) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| NetworkError::AllocationFailure { requested: len })?;
    data.resize(len, 0.0);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let m = Matrix::zeros(3, 4).unwrap();
        assert_eq!(m.rows, 3);
        assert_eq!(m.cols, 4);
        assert_eq!(m.len(), 12);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rows_are_contiguous_slices() {
        let mut m = Matrix::zeros(2, 3).unwrap();
        m.row_mut(1).copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(m.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(m.row(1), &[1.0, 2.0, 3.0]);
        assert_eq!(m.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_dot_from_starts_at_init() {
        assert_eq!(dot_from(0.5, &[1.0, 2.0], &[3.0, 4.0]), 11.5);
        assert_eq!(dot_from(-1.0, &[], &[]), -1.0);
    }

    #[test]
    fn test_overflowing_shape_is_allocation_failure() {
        let err = Matrix::zeros(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, NetworkError::AllocationFailure { .. }));
    }

    #[test]
    fn test_map_in_place() {
        let mut m = Matrix::zeros(1, 3).unwrap();
        m.row_mut(0).copy_from_slice(&[1.0, -2.0, 3.0]);
        m.map_in_place(|x| x * 2.0);
        assert_eq!(m.as_slice(), &[2.0, -4.0, 6.0]);
    }

    #[test]
    fn test_fill_with() {
        let mut v = [1.0, 2.0];
        fill_with(&mut v, |x| x - 1.0);
        assert_eq!(v, [0.0, 1.0]);
    }
}
