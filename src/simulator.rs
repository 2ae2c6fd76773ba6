use crate::errors::{NetworkError, NetworkResult};
use crate::fock::{basis_states, FockState};
use crate::into_iter;
use crate::permanent::permanent;
use crate::types::Precision;
use crate::unitary::Unitary;
use num_complex::Complex;
use num_traits::Zero;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default tolerance below which a computed amplitude should be read as
/// zero. Float noise in composed networks sits many orders of magnitude
/// below this while genuine post-selected amplitudes sit above it; callers
/// with unusual networks may pick their own cut.
pub const ZERO_TOLERANCE: f64 = 1e-9;

/// Whether `amplitude` is indistinguishable from zero at `tolerance`.
pub fn is_effectively_zero<P: Precision>(amplitude: Complex<P>, tolerance: P) -> bool {
    amplitude.norm() <= tolerance
}

/// Computes Fock-state transition amplitudes through a fixed mode
/// transformation.
///
/// Every query is a pure function of its arguments and the bound matrix;
/// there is no internal state to drift, so identical calls return
/// bit-identical results.
///
/// # Example
/// ```
/// use loqs::prelude::*;
///
/// # fn main() -> NetworkResult<()> {
/// let mut net = ModeNetwork::<f64>::new(2)?;
/// net.beam_splitter(0, 1, 0.5, Angle::zero())?;
/// let sim = FockStateSimulator::new(net.unitary());
///
/// // A single photon splits evenly.
/// let p = sim.probability(&FockState::new([1, 0]), &FockState::new([0, 1]))?;
/// assert!((p - 0.5).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FockStateSimulator<P: Precision> {
    unitary: Unitary<P>,
}

impl<P: Precision> FockStateSimulator<P> {
    /// Bind a simulator to a mode transformation.
    pub fn new(unitary: Unitary<P>) -> Self {
        Self { unitary }
    }

    /// The bound transformation.
    pub fn unitary(&self) -> &Unitary<P> {
        &self.unitary
    }

    /// The number of modes.
    pub fn modes(&self) -> usize {
        self.unitary.dim()
    }

    fn check_state(&self, state: &FockState) -> NetworkResult<()> {
        if state.modes() == self.modes() {
            Ok(())
        } else {
            Err(NetworkError::InvalidDimension {
                expected: self.modes(),
                found: state.modes(),
            })
        }
    }

    /// The transition amplitude from `input` to `output`.
    ///
    /// States in different photon-number sectors never mix under a linear
    /// network, so their amplitude is exactly zero; that is a physical
    /// outcome, not an error. A state with the wrong mode count is a
    /// structural mistake and fails with `InvalidDimension`.
    ///
    /// The amplitude is the permanent of the submatrix selecting one column
    /// per input photon and one row per output photon (with multiplicity),
    /// divided by the square root of both states' occupation factorials.
    pub fn amplitude(&self, input: &FockState, output: &FockState) -> NetworkResult<Complex<P>> {
        self.check_state(input)?;
        self.check_state(output)?;
        Ok(self.amplitude_unchecked(input, output))
    }

    fn amplitude_unchecked(&self, input: &FockState, output: &FockState) -> Complex<P> {
        let photons = input.total_photons();
        if photons != output.total_photons() {
            return Complex::zero();
        }
        let cols = input.occupied_modes();
        let rows = output.occupied_modes();
        let mut sub = Vec::with_capacity(photons * photons);
        for &row in &rows {
            for &col in &cols {
                sub.push(self.unitary.get(row, col));
            }
        }
        let norm =
            (input.occupation_factorial::<P>() * output.occupation_factorial::<P>()).sqrt();
        permanent(photons, &sub) / norm
    }

    /// `|amplitude|^2` for the transition from `input` to `output`.
    ///
    /// No renormalization is applied when callers post-select on a subset of
    /// outputs; renormalizing over a chosen measurement subspace is the
    /// caller's decision (see `PathEncoding::postselect`).
    pub fn probability(&self, input: &FockState, output: &FockState) -> NetworkResult<P> {
        Ok(self.amplitude(input, output)?.norm_sqr())
    }

    /// A lazy pass over `candidates`, yielding each state with its
    /// transition probability from `input`, in the order given. Candidate
    /// mode counts are validated eagerly; probabilities are computed as the
    /// iterator is pulled and are not globally normalized.
    pub fn enumerate_outcomes(
        &self,
        input: &FockState,
        candidates: Vec<FockState>,
    ) -> NetworkResult<OutcomeIter<'_, P>> {
        self.check_state(input)?;
        for candidate in &candidates {
            self.check_state(candidate)?;
        }
        Ok(OutcomeIter {
            simulator: self,
            input: input.clone(),
            candidates,
            next: 0,
        })
    }

    /// The probability of every output state in the input's photon-number
    /// sector. For a unitary transformation these sum to one.
    pub fn distribution(&self, input: &FockState) -> NetworkResult<Vec<(FockState, P)>> {
        self.check_state(input)?;
        let sector = basis_states(self.modes(), input.total_photons());
        Ok(into_iter!(sector)
            .map(|state| {
                let probability = self.amplitude_unchecked(input, &state).norm_sqr();
                (state, probability)
            })
            .collect())
    }

    /// Draw one outcome from the output distribution for `input`.
    pub fn sample(&self, input: &FockState) -> NetworkResult<FockState> {
        let mut distribution = self.distribution(input)?;
        let mut remaining = P::from(rand::random::<f64>()).unwrap();
        let mut chosen = distribution.len() - 1;
        for (index, (_, probability)) in distribution.iter().enumerate() {
            remaining -= *probability;
            if remaining <= P::zero() {
                chosen = index;
                break;
            }
        }
        Ok(distribution.swap_remove(chosen).0)
    }
}

/// A finite, restartable pass over candidate outputs and their
/// probabilities. Obtained from [`FockStateSimulator::enumerate_outcomes`];
/// call [`Self::restart`] (or clone before iterating) to run it again.
#[derive(Debug, Clone)]
pub struct OutcomeIter<'a, P: Precision> {
    simulator: &'a FockStateSimulator<P>,
    input: FockState,
    candidates: Vec<FockState>,
    next: usize,
}

impl<P: Precision> OutcomeIter<'_, P> {
    /// Rewind to the first candidate.
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl<P: Precision> Iterator for OutcomeIter<'_, P> {
    type Item = (FockState, P);

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.candidates.get(self.next)?.clone();
        self.next += 1;
        let probability = self
            .simulator
            .amplitude_unchecked(&self.input, &state)
            .norm_sqr();
        Some((state, probability))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.candidates.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl<P: Precision> ExactSizeIterator for OutcomeIter<'_, P> {}
