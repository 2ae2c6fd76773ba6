use crate::errors::{NetworkError, NetworkResult};
use crate::types::Precision;
use crate::unitary::Unitary;
use num_complex::Complex;
use num_rational::Ratio;
use num_traits::{One, ToPrimitive, Zero};
use smallvec::SmallVec;
use std::ops::Neg;

/// A phase angle, either as a float or as an exact rational multiple of pi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle<P: Precision> {
    /// An angle in radians.
    Floating(P),
    /// An angle expressed as a fixed ratio times pi.
    PiRational(Ratio<i64>),
}

impl<P: Precision> Angle<P> {
    /// The zero angle.
    pub fn zero() -> Self {
        Self::PiRational(Ratio::zero())
    }

    /// The angle pi.
    pub fn pi() -> Self {
        Self::PiRational(Ratio::one())
    }

    /// The angle pi/m for nonzero integer m.
    pub fn pi_by(m: i64) -> Self {
        Self::PiRational(Ratio::new(1, m))
    }

    /// The angle in radians.
    pub fn to_float(self) -> P {
        match self {
            Self::Floating(p) => p,
            Self::PiRational(r) => {
                let r = P::from(r.to_f64().unwrap()).unwrap();
                r * P::from(std::f64::consts::PI).unwrap()
            }
        }
    }
}

impl<P: Precision> Neg for Angle<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Floating(p) => Self::Floating(-p),
            Self::PiRational(r) => Self::PiRational(-r),
        }
    }
}

/// An elementary unitary element bound to specific modes of a network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component<P: Precision> {
    /// A two-mode coupler.
    ///
    /// With reflectivity `R` and phase `phi`, the local matrix on the ordered
    /// pair is `[[sqrt(R), i sqrt(1-R)], [i sqrt(1-R) e^{i phi}, sqrt(R) e^{i phi}]]`,
    /// which is unitary for any `R` in `[0, 1]` and any phase.
    BeamSplitter {
        /// The ordered pair of coupled modes.
        modes: (usize, usize),
        /// Probability for a photon to stay in its input mode; must lie in `[0, 1]`.
        reflectivity: P,
        /// Phase applied to the second mode's output.
        phase: Angle<P>,
    },
    /// A one-mode phase rotation with local matrix `[[e^{i phi}]]`.
    PhaseShifter {
        /// The mode the phase acts on.
        mode: usize,
        /// The applied phase.
        phase: Angle<P>,
    },
}

impl<P: Precision> Component<P> {
    /// The modes this component acts on, in order.
    pub fn modes(&self) -> SmallVec<[usize; 2]> {
        match self {
            Self::BeamSplitter { modes: (a, b), .. } => SmallVec::from_slice(&[*a, *b]),
            Self::PhaseShifter { mode, .. } => SmallVec::from_slice(&[*mode]),
        }
    }

    /// How many modes this component couples.
    pub fn arity(&self) -> usize {
        match self {
            Self::BeamSplitter { .. } => 2,
            Self::PhaseShifter { .. } => 1,
        }
    }
}

/// An ordered sequence of components over a fixed number of modes.
///
/// Networks are built once and then treated as immutable: [`Self::unitary`]
/// derives the composed matrix without mutating anything, so a built network
/// can back any number of simulation queries.
#[derive(Debug, Clone)]
pub struct ModeNetwork<P: Precision> {
    modes: usize,
    components: Vec<Component<P>>,
}

impl<P: Precision> ModeNetwork<P> {
    /// An empty network over `modes` modes.
    /// Fails with `InvalidDimension` when `modes` is zero.
    pub fn new(modes: usize) -> NetworkResult<Self> {
        if modes == 0 {
            Err(NetworkError::InvalidDimension {
                expected: 1,
                found: 0,
            })
        } else {
            Ok(Self {
                modes,
                components: Vec::new(),
            })
        }
    }

    /// The number of modes.
    pub fn modes(&self) -> usize {
        self.modes
    }

    /// The components in insertion order.
    pub fn components(&self) -> &[Component<P>] {
        &self.components
    }

    /// The number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the network has no components yet.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Append a component, validating its mode indices eagerly.
    ///
    /// Fails with `InvalidModeIndex` for an index outside `[0, modes)` and
    /// with `ModeCountMismatch` when a beam splitter's two modes coincide.
    pub fn add_component(&mut self, component: Component<P>) -> NetworkResult<&mut Self> {
        let modes = component.modes();
        for &index in &modes {
            if index >= self.modes {
                return Err(NetworkError::InvalidModeIndex {
                    index,
                    modes: self.modes,
                });
            }
        }
        if modes.len() == 2 && modes[0] == modes[1] {
            return Err(NetworkError::ModeCountMismatch {
                expected: 2,
                found: 1,
            });
        }
        self.components.push(component);
        Ok(self)
    }

    /// Append a beam splitter coupling modes `a` and `b`.
    pub fn beam_splitter(
        &mut self,
        a: usize,
        b: usize,
        reflectivity: P,
        phase: Angle<P>,
    ) -> NetworkResult<&mut Self> {
        self.add_component(Component::BeamSplitter {
            modes: (a, b),
            reflectivity,
            phase,
        })
    }

    /// Append a phase shifter on `mode`.
    pub fn phase_shifter(&mut self, mode: usize, phase: Angle<P>) -> NetworkResult<&mut Self> {
        self.add_component(Component::PhaseShifter { mode, phase })
    }

    /// The composed transformation: the ordered product of each component's
    /// local matrix embedded into the identity, with later components applied
    /// after earlier ones, as when acting on a mode-amplitude vector.
    ///
    /// The result is unitary within float tolerance whenever every
    /// component's local matrix is, which beam splitters and phase shifters
    /// satisfy by construction.
    pub fn unitary(&self) -> Unitary<P> {
        let mut u = Unitary::identity(self.modes);
        for component in &self.components {
            match component {
                Component::BeamSplitter {
                    modes: (a, b),
                    reflectivity,
                    phase,
                } => {
                    let stay = Complex::new(reflectivity.sqrt(), P::zero());
                    let cross = Complex::new(P::zero(), (P::one() - *reflectivity).sqrt());
                    let turn = Complex::from_polar(P::one(), phase.to_float());
                    u.mix_rows(*a, *b, stay, cross, cross * turn, stay * turn);
                }
                Component::PhaseShifter { mode, phase } => {
                    let turn = Complex::from_polar(P::one(), phase.to_float());
                    u.scale_row(*mode, turn);
                }
            }
        }
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mode_network_rejected() {
        let err = ModeNetwork::<f64>::new(0).unwrap_err();
        assert_eq!(
            err,
            NetworkError::InvalidDimension {
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn out_of_range_mode_rejected() {
        let mut net = ModeNetwork::<f64>::new(2).unwrap();
        let err = net.phase_shifter(2, Angle::pi()).unwrap_err();
        assert_eq!(err, NetworkError::InvalidModeIndex { index: 2, modes: 2 });
        let err = net.beam_splitter(0, 5, 0.5, Angle::zero()).unwrap_err();
        assert_eq!(err, NetworkError::InvalidModeIndex { index: 5, modes: 2 });
        // Nothing was silently appended.
        assert!(net.is_empty());
    }

    #[test]
    fn coincident_beam_splitter_modes_rejected() {
        let mut net = ModeNetwork::<f64>::new(3).unwrap();
        let err = net.beam_splitter(1, 1, 0.5, Angle::zero()).unwrap_err();
        assert_eq!(
            err,
            NetworkError::ModeCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn composed_unitary_is_unitary() {
        let mut net = ModeNetwork::<f64>::new(4).unwrap();
        net.beam_splitter(0, 1, 0.5, Angle::pi())
            .unwrap()
            .beam_splitter(1, 3, 1.0 / 3.0, Angle::zero())
            .unwrap()
            .phase_shifter(2, Angle::pi_by(4))
            .unwrap()
            .beam_splitter(2, 0, 0.25, Angle::Floating(1.234))
            .unwrap();
        assert!(net.unitary().max_unitarity_deviation() < 1e-9);
    }

    #[test]
    fn later_components_postmultiply() {
        // A phase shifter then a beam splitter must compose as B * P.
        let mut first = ModeNetwork::<f64>::new(2).unwrap();
        first.phase_shifter(0, Angle::pi_by(3)).unwrap();
        let mut second = ModeNetwork::<f64>::new(2).unwrap();
        second.beam_splitter(0, 1, 0.5, Angle::zero()).unwrap();

        let mut both = ModeNetwork::<f64>::new(2).unwrap();
        both.phase_shifter(0, Angle::pi_by(3))
            .unwrap()
            .beam_splitter(0, 1, 0.5, Angle::zero())
            .unwrap();

        let expected = second.unitary().mul(&first.unitary());
        assert_eq!(both.unitary(), expected);
    }

    #[test]
    fn beam_splitter_matrix_entries() {
        let mut net = ModeNetwork::<f64>::new(2).unwrap();
        net.beam_splitter(0, 1, 0.5, Angle::pi()).unwrap();
        let u = net.unitary();
        let rt = 0.5f64.sqrt();
        assert!((u.get(0, 0) - Complex::new(rt, 0.0)).norm() < 1e-12);
        assert!((u.get(0, 1) - Complex::new(0.0, rt)).norm() < 1e-12);
        assert!((u.get(1, 0) - Complex::new(0.0, -rt)).norm() < 1e-12);
        assert!((u.get(1, 1) - Complex::new(-rt, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn angle_conversions() {
        assert_eq!(Angle::<f64>::pi().to_float(), std::f64::consts::PI);
        assert_eq!(Angle::<f64>::pi_by(2).to_float(), std::f64::consts::FRAC_PI_2);
        assert_eq!(Angle::<f64>::zero().to_float(), 0.0);
        assert_eq!((-Angle::<f64>::pi_by(4)).to_float(), -std::f64::consts::FRAC_PI_4);
        assert_eq!(Angle::Floating(1.5f64).to_float(), 1.5);
    }
}
