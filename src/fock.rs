use crate::types::Precision;
use crate::utils::factorial;
use smallvec::SmallVec;
use std::fmt;

/// Photon occupation numbers over a fixed set of modes.
///
/// An immutable value object. Occupations are unsigned, so negative photon
/// counts are unrepresentable by construction; length mismatches against a
/// simulator or encoding surface `InvalidDimension` at the call site.
///
/// # Example
/// ```
/// use loqs::fock::FockState;
///
/// let state = FockState::new([0, 2, 1]);
/// assert_eq!(state.modes(), 3);
/// assert_eq!(state.total_photons(), 3);
/// assert_eq!(state.to_string(), "|0,2,1>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FockState {
    occupations: SmallVec<[usize; 8]>,
}

impl FockState {
    /// A state from per-mode occupation numbers.
    pub fn new<It>(occupations: It) -> Self
    where
        It: IntoIterator<Item = usize>,
    {
        Self {
            occupations: occupations.into_iter().collect(),
        }
    }

    /// The state with no photons in any of `modes` modes.
    pub fn vacuum(modes: usize) -> Self {
        Self {
            occupations: std::iter::repeat(0).take(modes).collect(),
        }
    }

    /// The number of modes.
    pub fn modes(&self) -> usize {
        self.occupations.len()
    }

    /// Photons occupying `mode`.
    pub fn occupation(&self, mode: usize) -> usize {
        self.occupations[mode]
    }

    /// The per-mode occupations.
    pub fn occupations(&self) -> &[usize] {
        &self.occupations
    }

    /// The total photon number.
    pub fn total_photons(&self) -> usize {
        self.occupations.iter().sum()
    }

    /// Product of the factorials of each mode's occupation, in float space.
    /// This is the bosonic normalization weight for amplitude computations.
    pub(crate) fn occupation_factorial<P: Precision>(&self) -> P {
        self.occupations
            .iter()
            .map(|&occupation| factorial::<P>(occupation))
            .product()
    }

    /// Occupied modes listed with multiplicity, one entry per photon.
    pub(crate) fn occupied_modes(&self) -> Vec<usize> {
        let mut modes = Vec::with_capacity(self.total_photons());
        for (mode, &occupation) in self.occupations.iter().enumerate() {
            for _ in 0..occupation {
                modes.push(mode);
            }
        }
        modes
    }
}

impl fmt::Display for FockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for (mode, occupation) in self.occupations.iter().enumerate() {
            if mode > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", occupation)?;
        }
        write!(f, ">")
    }
}

impl From<&[usize]> for FockState {
    fn from(occupations: &[usize]) -> Self {
        Self::new(occupations.iter().copied())
    }
}

/// Every state of `photons` photons over `modes` modes, ordered by
/// decreasing occupation of earlier modes. There are
/// `C(photons + modes - 1, modes - 1)` of them: the complete
/// particle-number sector a linear-optical unitary conserves.
///
/// # Example
/// ```
/// use loqs::fock::{basis_states, FockState};
///
/// let sector = basis_states(2, 2);
/// assert_eq!(
///     sector,
///     vec![
///         FockState::new([2, 0]),
///         FockState::new([1, 1]),
///         FockState::new([0, 2]),
///     ]
/// );
/// ```
pub fn basis_states(modes: usize, photons: usize) -> Vec<FockState> {
    if modes == 0 {
        return Vec::new();
    }
    let mut states = Vec::new();
    let mut occupations = vec![0usize; modes];
    occupations[0] = photons;
    loop {
        states.push(FockState::new(occupations.iter().copied()));
        // Move one photon from the rightmost nonempty mode that is not the
        // last, gathering everything to its right behind it.
        let pivot = match occupations[..modes - 1]
            .iter()
            .rposition(|&occupation| occupation > 0)
        {
            Some(pivot) => pivot,
            None => break,
        };
        let moved: usize = occupations[pivot + 1..].iter().sum();
        occupations[pivot] -= 1;
        occupations[pivot + 1] = moved + 1;
        for occupation in occupations[pivot + 2..].iter_mut() {
            *occupation = 0;
        }
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn sector_sizes() {
        for modes in 1..5 {
            for photons in 0..5 {
                let states = basis_states(modes, photons);
                assert_eq!(states.len(), binomial(photons + modes - 1, modes - 1));
                assert!(states
                    .iter()
                    .all(|state| state.total_photons() == photons && state.modes() == modes));
            }
        }
    }

    #[test]
    fn sector_has_no_duplicates() {
        let states = basis_states(4, 3);
        for (i, a) in states.iter().enumerate() {
            for b in states.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn vacuum_sector() {
        assert_eq!(basis_states(3, 0), vec![FockState::vacuum(3)]);
        assert_eq!(basis_states(0, 2), Vec::new());
    }

    #[test]
    fn occupied_modes_with_multiplicity() {
        let state = FockState::new([0, 2, 0, 1]);
        assert_eq!(state.occupied_modes(), vec![1, 1, 3]);
        assert_eq!(state.occupation_factorial::<f64>(), 2.0);
    }

    #[test]
    fn display_formats_kets() {
        assert_eq!(FockState::vacuum(2).to_string(), "|0,0>");
        assert_eq!(FockState::new([1, 0, 3]).to_string(), "|1,0,3>");
    }
}
