use crate::types::Precision;
use num_complex::Complex;
use num_traits::{One, Zero};

/// The matrix permanent of an `n` by `n` row-major complex matrix.
///
/// Like the determinant but without sign alternation; it governs
/// multi-photon interference amplitudes. Dispatches to the naive expansion
/// for tiny matrices and to Ryser's formula above that, since the factorial
/// sum becomes hopeless long before `2^n` does.
pub fn permanent<P: Precision>(n: usize, mat: &[Complex<P>]) -> Complex<P> {
    debug_assert_eq!(mat.len(), n * n);
    if n <= 3 {
        permanent_naive(n, mat)
    } else {
        permanent_ryser(n, mat)
    }
}

/// The permanent by direct sum over all permutations, one entry per row and
/// column. Factorial time: this is the definition itself, kept as an oracle
/// for the fast path and for matrices too small for Ryser bookkeeping to pay
/// off. The permanent of the empty matrix is one.
pub fn permanent_naive<P: Precision>(n: usize, mat: &[Complex<P>]) -> Complex<P> {
    fn expand<P: Precision>(
        n: usize,
        mat: &[Complex<P>],
        row: usize,
        used_cols: usize,
    ) -> Complex<P> {
        if row == n {
            return Complex::one();
        }
        (0..n)
            .filter(|col| used_cols & (1 << col) == 0)
            .map(|col| mat[row * n + col] * expand(n, mat, row + 1, used_cols | (1 << col)))
            .sum()
    }
    expand(n, mat, 0, 0)
}

/// The permanent by Ryser's inclusion-exclusion formula over column subsets,
/// walked in Gray-code order so each step updates the running row sums by a
/// single column: `O(2^n * n)` instead of `O(n! * n)`.
pub fn permanent_ryser<P: Precision>(n: usize, mat: &[Complex<P>]) -> Complex<P> {
    if n == 0 {
        return Complex::one();
    }
    let mut row_sums = vec![Complex::<P>::zero(); n];
    let mut total = Complex::zero();
    for k in 1usize..(1 << n) {
        let col = k.trailing_zeros() as usize;
        let subset = k ^ (k >> 1);
        if subset & (1 << col) != 0 {
            for (row, sum) in row_sums.iter_mut().enumerate() {
                *sum += mat[row * n + col];
            }
        } else {
            for (row, sum) in row_sums.iter_mut().enumerate() {
                *sum -= mat[row * n + col];
            }
        }
        let product = row_sums
            .iter()
            .fold(Complex::one(), |acc: Complex<P>, &sum| acc * sum);
        if (n - subset.count_ones() as usize) % 2 == 0 {
            total += product;
        } else {
            total -= product;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Complex<f64>, b: Complex<f64>) {
        assert!((a - b).norm() < 1e-10, "{} != {}", a, b);
    }

    /// A deterministic dense test matrix with no special structure.
    fn test_matrix(n: usize) -> Vec<Complex<f64>> {
        (0..n * n)
            .map(|k| {
                let k = k as f64;
                Complex::new((0.7 * k + 0.3).sin(), (1.3 * k - 0.5).cos())
            })
            .collect()
    }

    #[test]
    fn empty_matrix_permanent_is_one() {
        assert_eq!(permanent_naive::<f64>(0, &[]), Complex::one());
        assert_eq!(permanent_ryser::<f64>(0, &[]), Complex::one());
    }

    #[test]
    fn one_by_one() {
        let mat = [Complex::new(2.0, -1.0)];
        assert_eq!(permanent_ryser(1, &mat), mat[0]);
        assert_eq!(permanent_naive(1, &mat), mat[0]);
    }

    #[test]
    fn two_by_two_cross_terms() {
        // perm [[a, b], [c, d]] = a d + b c
        let mat = [
            Complex::new(1.0, 0.0),
            Complex::new(2.0, 0.0),
            Complex::new(3.0, 0.0),
            Complex::new(4.0, 0.0),
        ];
        assert_close(permanent_ryser(2, &mat), Complex::new(10.0, 0.0));
        assert_close(permanent_naive(2, &mat), Complex::new(10.0, 0.0));
    }

    #[test]
    fn identity_permanent_is_one() {
        for n in 1..6 {
            let mut mat = vec![Complex::<f64>::zero(); n * n];
            for i in 0..n {
                mat[i * n + i] = Complex::one();
            }
            assert_close(permanent_ryser(n, &mat), Complex::one());
        }
    }

    #[test]
    fn all_ones_permanent_is_factorial() {
        // Every permutation contributes 1.
        let mut expected = 1.0;
        for n in 1..7 {
            expected *= n as f64;
            let mat = vec![Complex::<f64>::one(); n * n];
            assert_close(permanent_ryser(n, &mat), Complex::new(expected, 0.0));
        }
    }

    #[test]
    fn ryser_matches_naive() {
        for n in 0..5 {
            let mat = test_matrix(n);
            assert_close(permanent_ryser(n, &mat), permanent_naive(n, &mat));
        }
    }

    #[test]
    fn dispatch_agrees_with_both() {
        for n in 0..6 {
            let mat = test_matrix(n);
            assert_close(permanent(n, &mat), permanent_naive(n, &mat));
        }
    }
}
