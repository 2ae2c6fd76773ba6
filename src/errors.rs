use std::error::Error;
use std::fmt::{Display, Formatter};

/// An error from building a network or from querying it with structurally
/// invalid states.
///
/// Particle-number mismatches are deliberately absent: an input and output
/// state with different total photon counts have amplitude zero, which is a
/// physical outcome rather than a caller mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// A network was created with no modes, or a state's mode count does not
    /// match the network it was used with.
    InvalidDimension {
        /// The mode count required by the receiving object.
        expected: usize,
        /// The mode count actually supplied.
        found: usize,
    },
    /// A component or encoding referenced a mode outside `[0, modes)`.
    InvalidModeIndex {
        /// The offending mode index.
        index: usize,
        /// The network's mode count.
        modes: usize,
    },
    /// A component or qubit register was supplied the wrong number of modes
    /// or bits for its arity.
    ModeCountMismatch {
        /// The arity required.
        expected: usize,
        /// The arity actually supplied.
        found: usize,
    },
    /// A Fock state has no reading as dual-rail qubits under the configured
    /// encoding.
    NotTwoRailRepresentable {
        /// A mode whose occupation breaks the convention.
        mode: usize,
    },
}

/// A result which may contain a network error.
pub type NetworkResult<T> = Result<T, NetworkError>;

impl Error for NetworkError {}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimension { expected, found } => {
                write!(f, "invalid dimension: expected {} modes, found {}", expected, found)
            }
            Self::InvalidModeIndex { index, modes } => {
                write!(f, "mode index {} out of range for {} modes", index, modes)
            }
            Self::ModeCountMismatch { expected, found } => {
                write!(f, "expected {} distinct modes, found {}", expected, found)
            }
            Self::NotTwoRailRepresentable { mode } => {
                write!(f, "occupation of mode {} breaks the dual-rail convention", mode)
            }
        }
    }
}
