use crate::types::Precision;
use num_traits::One;

/// `k!` accumulated directly in the target float type.
///
/// # Example
/// ```
/// use loqs::utils::factorial;
///
/// assert_eq!(factorial::<f64>(0), 1.0);
/// assert_eq!(factorial::<f64>(5), 120.0);
/// ```
pub fn factorial<P: Precision>(k: usize) -> P {
    (1..=k).fold(P::one(), |acc, i| acc * P::from(i).unwrap())
}
