use crate::types::Precision;
use num_complex::Complex;
use num_traits::{One, Zero};

/// A dense square complex matrix describing a transformation of mode
/// amplitudes, stored row-major.
///
/// Networks produce these and simulators consume them; the composition
/// guarantees unitarity within float tolerance, but nothing here depends on
/// it, so callers may also bind hand-written matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Unitary<P: Precision> {
    dim: usize,
    mat: Vec<Complex<P>>,
}

impl<P: Precision> Unitary<P> {
    /// The identity transformation on `dim` modes.
    pub fn identity(dim: usize) -> Self {
        let mut mat = vec![Complex::zero(); dim * dim];
        for i in 0..dim {
            mat[i * dim + i] = Complex::one();
        }
        Self { dim, mat }
    }

    /// Build from a row-major buffer of `dim * dim` entries, or `None` if the
    /// buffer does not square up.
    pub fn from_vec(dim: usize, mat: Vec<Complex<P>>) -> Option<Self> {
        if mat.len() == dim * dim {
            Some(Self { dim, mat })
        } else {
            None
        }
    }

    /// The number of modes this matrix acts on.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The entry at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> Complex<P> {
        self.mat[row * self.dim + col]
    }

    /// The ordinary matrix product `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        assert_eq!(self.dim, rhs.dim);
        let dim = self.dim;
        let mut mat = vec![Complex::zero(); dim * dim];
        for row in 0..dim {
            for col in 0..dim {
                let mut acc = Complex::zero();
                for k in 0..dim {
                    acc += self.get(row, k) * rhs.get(k, col);
                }
                mat[row * dim + col] = acc;
            }
        }
        Self { dim, mat }
    }

    /// Replace rows `a` and `b` with their mix under a two-by-two matrix.
    /// This is left-multiplication by that matrix embedded at `(a, b)`.
    pub(crate) fn mix_rows(
        &mut self,
        a: usize,
        b: usize,
        m00: Complex<P>,
        m01: Complex<P>,
        m10: Complex<P>,
        m11: Complex<P>,
    ) {
        for col in 0..self.dim {
            let x = self.mat[a * self.dim + col];
            let y = self.mat[b * self.dim + col];
            self.mat[a * self.dim + col] = m00 * x + m01 * y;
            self.mat[b * self.dim + col] = m10 * x + m11 * y;
        }
    }

    /// Scale row `a` by `factor`: left-multiplication by an embedded
    /// one-mode transformation.
    pub(crate) fn scale_row(&mut self, a: usize, factor: Complex<P>) {
        for col in 0..self.dim {
            self.mat[a * self.dim + col] *= factor;
        }
    }

    /// The largest absolute deviation of `U * U^dagger` from the identity.
    /// Zero (within float noise) exactly when the matrix is unitary.
    pub fn max_unitarity_deviation(&self) -> P {
        let dim = self.dim;
        let mut worst = P::zero();
        for row in 0..dim {
            for col in 0..dim {
                let mut acc: Complex<P> = Complex::zero();
                for k in 0..dim {
                    acc += self.get(row, k) * self.get(col, k).conj();
                }
                let expected = if row == col {
                    Complex::one()
                } else {
                    Complex::zero()
                };
                let dev = (acc - expected).norm();
                if dev > worst {
                    worst = dev;
                }
            }
        }
        worst
    }
}
