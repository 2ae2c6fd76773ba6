use crate::errors::{NetworkError, NetworkResult};
use crate::fock::FockState;
use crate::types::Precision;
use num_traits::Zero;

/// A dual-rail assignment of logical qubits to mode pairs.
///
/// This is pure configuration data sitting at the boundary between qubit
/// algorithms and the photonic core: qubit `i` lives in `pairs[i]`, with a
/// photon in the first mode reading as `|0>` and in the second as `|1>`;
/// `auxiliary` lists herald and vacuum modes that must stay empty for a
/// state to be readable. The simulation core never depends on any of this.
///
/// # Example
/// ```
/// use loqs::encoding::PathEncoding;
/// use loqs::fock::FockState;
///
/// # fn main() -> loqs::errors::NetworkResult<()> {
/// let enc = PathEncoding::new(4, vec![(0, 1), (2, 3)], vec![])?;
/// let state = enc.fock_state(&[true, false])?;
/// assert_eq!(state, FockState::new([0, 1, 1, 0]));
/// assert_eq!(enc.qubit_state(&state)?, vec![true, false]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PathEncoding {
    modes: usize,
    pairs: Vec<(usize, usize)>,
    auxiliary: Vec<usize>,
}

impl PathEncoding {
    /// Build an encoding over `modes` modes from per-qubit rail pairs and a
    /// list of auxiliary modes.
    ///
    /// Every referenced mode must lie in `[0, modes)` and may appear at most
    /// once across all pairs and auxiliaries (`InvalidModeIndex` otherwise);
    /// a pair whose rails coincide fails with `ModeCountMismatch`.
    pub fn new(
        modes: usize,
        pairs: Vec<(usize, usize)>,
        auxiliary: Vec<usize>,
    ) -> NetworkResult<Self> {
        if modes == 0 {
            return Err(NetworkError::InvalidDimension {
                expected: 1,
                found: 0,
            });
        }
        let mut seen = vec![false; modes];
        let mut claim = |index: usize| -> NetworkResult<()> {
            if index >= modes {
                Err(NetworkError::InvalidModeIndex { index, modes })
            } else if seen[index] {
                Err(NetworkError::InvalidModeIndex { index, modes })
            } else {
                seen[index] = true;
                Ok(())
            }
        };
        for &(zero_rail, one_rail) in &pairs {
            if zero_rail == one_rail {
                return Err(NetworkError::ModeCountMismatch {
                    expected: 2,
                    found: 1,
                });
            }
            claim(zero_rail)?;
            claim(one_rail)?;
        }
        for &mode in &auxiliary {
            claim(mode)?;
        }
        Ok(Self {
            modes,
            pairs,
            auxiliary,
        })
    }

    /// The number of logical qubits.
    pub fn qubits(&self) -> usize {
        self.pairs.len()
    }

    /// The number of optical modes.
    pub fn modes(&self) -> usize {
        self.modes
    }

    /// The dual-rail Fock state for the computational-basis `bits`:
    /// one photon per pair, nothing anywhere else.
    /// Fails with `ModeCountMismatch` when the bit count differs from the
    /// qubit count.
    pub fn fock_state(&self, bits: &[bool]) -> NetworkResult<FockState> {
        if bits.len() != self.pairs.len() {
            return Err(NetworkError::ModeCountMismatch {
                expected: self.pairs.len(),
                found: bits.len(),
            });
        }
        let mut occupations = vec![0usize; self.modes];
        for (&bit, &(zero_rail, one_rail)) in bits.iter().zip(&self.pairs) {
            occupations[if bit { one_rail } else { zero_rail }] = 1;
        }
        Ok(FockState::new(occupations))
    }

    /// Read a Fock state back as computational-basis qubits: the partial
    /// inverse of [`Self::fock_state`].
    ///
    /// Fails with `NotTwoRailRepresentable` when any pair holds anything but
    /// exactly one photon on one rail, or when any photon sits in an
    /// auxiliary or unassigned mode.
    pub fn qubit_state(&self, state: &FockState) -> NetworkResult<Vec<bool>> {
        if state.modes() != self.modes {
            return Err(NetworkError::InvalidDimension {
                expected: self.modes,
                found: state.modes(),
            });
        }
        let mut bits = Vec::with_capacity(self.pairs.len());
        let mut assigned = vec![false; self.modes];
        for &(zero_rail, one_rail) in &self.pairs {
            assigned[zero_rail] = true;
            assigned[one_rail] = true;
            match (state.occupation(zero_rail), state.occupation(one_rail)) {
                (1, 0) => bits.push(false),
                (0, 1) => bits.push(true),
                _ => {
                    return Err(NetworkError::NotTwoRailRepresentable { mode: zero_rail });
                }
            }
        }
        for mode in 0..self.modes {
            if !assigned[mode] && state.occupation(mode) != 0 {
                return Err(NetworkError::NotTwoRailRepresentable { mode });
            }
        }
        Ok(bits)
    }

    /// Every computational-basis state as `(bits, fock)` rows, in binary
    /// counting order with qubit zero as the most significant bit.
    pub fn computational_basis(&self) -> Vec<(Vec<bool>, FockState)> {
        let qubits = self.pairs.len();
        (0..1usize << qubits)
            .map(|index| {
                let bits: Vec<bool> = (0..qubits)
                    .map(|bit| (index >> (qubits - 1 - bit)) & 1 == 1)
                    .collect();
                let state = self.fock_state(&bits).unwrap();
                (bits, state)
            })
            .collect()
    }

    /// Post-select a distribution onto the two-rail subspace and renormalize
    /// over it, the one place renormalization is performed on the caller's
    /// behalf. Outcomes that are not representable are dropped; structural
    /// mismatches still propagate as errors.
    pub fn postselect<P: Precision>(
        &self,
        distribution: &[(FockState, P)],
    ) -> NetworkResult<Vec<(Vec<bool>, P)>> {
        let mut rows = Vec::new();
        let mut total = P::zero();
        for (state, probability) in distribution {
            match self.qubit_state(state) {
                Ok(bits) => {
                    total += *probability;
                    rows.push((bits, *probability));
                }
                Err(NetworkError::NotTwoRailRepresentable { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        if !total.is_zero() {
            for row in &mut rows {
                row.1 = row.1 / total;
            }
        }
        Ok(rows)
    }
}
