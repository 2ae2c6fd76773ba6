#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    missing_docs
)]

//! Linear-optical quantum circuit simulation through Fock-state amplitudes.
//!
//! A [`network::ModeNetwork`] describes an optical circuit as an ordered
//! sequence of beam splitters and phase shifters over a fixed set of modes.
//! Building the network and evaluating it are two separate stages: the
//! network is assembled once, its composed unitary extracted, and a
//! [`simulator::FockStateSimulator`] then answers any number of amplitude
//! and probability queries against that immutable matrix. Multi-photon
//! transition amplitudes reduce to matrix permanents over submatrices of
//! the unitary, computed with Ryser's formula.
//!
//! # Example (Hong-Ou-Mandel interference)
//! Two indistinguishable photons entering a balanced beam splitter from
//! opposite sides always leave together.
//! ```
//! use loqs::prelude::*;
//!
//! # fn main() -> NetworkResult<()> {
//! // A two-mode circuit with a single balanced splitter.
//! let mut net = ModeNetwork::<f64>::new(2)?;
//! net.beam_splitter(0, 1, 0.5, Angle::zero())?;
//!
//! // The composed matrix is unitary to float precision.
//! let unitary = net.unitary();
//! assert!(unitary.max_unitarity_deviation() < 1e-9);
//!
//! let sim = FockStateSimulator::new(unitary);
//! let both = FockState::new([1, 1]);
//!
//! // The coincidence amplitude interferes away entirely...
//! assert!(sim.probability(&both, &both)? < 1e-12);
//!
//! // ...and the photons bunch into one mode or the other, evenly.
//! let bunched = sim.probability(&both, &FockState::new([2, 0]))?;
//! assert!((bunched - 0.5).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! # Dual-rail qubits
//! Qubit algorithms sit on top of the core through a caller-supplied
//! [`encoding::PathEncoding`], which maps computational-basis states onto
//! photon paths and reads measurement outcomes back out, post-selecting
//! away the outcomes that have no qubit meaning.
//! ```
//! use loqs::prelude::*;
//!
//! # fn main() -> NetworkResult<()> {
//! let enc = PathEncoding::new(4, vec![(0, 1), (2, 3)], vec![])?;
//! let state = enc.fock_state(&[false, true])?;
//! assert_eq!(state, FockState::new([1, 0, 0, 1]));
//! # Ok(())
//! # }
//! ```

/// Dual-rail mapping between qubit states and Fock states.
pub mod encoding;
/// Network construction and query error types.
pub mod errors;
/// Fock states and photon-number sectors.
pub mod fock;
/// Optical circuit description and unitary composition.
pub mod network;
/// Matrix permanents, naive and Ryser.
pub mod permanent;
/// Fock-state transition amplitudes, probabilities, and sampling.
pub mod simulator;
/// Reusable types.
pub mod types;
/// Dense complex matrices for mode transformations.
pub mod unitary;
/// Small numeric helpers.
pub mod utils;

mod rayon_helper;

pub use num_complex::Complex;
pub use rand;
pub use types::*;

/// Commonly used types and traits.
/// ```
/// use loqs::prelude::*;
/// ```
pub mod prelude {
    pub use super::*;
    pub use crate::encoding::PathEncoding;
    pub use crate::errors::*;
    pub use crate::fock::{basis_states, FockState};
    pub use crate::network::{Angle, Component, ModeNetwork};
    pub use crate::simulator::{
        is_effectively_zero, FockStateSimulator, OutcomeIter, ZERO_TOLERANCE,
    };
    pub use crate::unitary::Unitary;
}
