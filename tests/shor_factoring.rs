//! End-to-end check of the compiled photonic Shor(15) circuit: two dual-rail
//! control qubits put into superposition and copied onto two function qubits
//! through post-selected controlled-Z gates, twelve modes in all.

extern crate loqs;

use loqs::prelude::*;

/// Dual-rail layout: qubit order (x1, x2, f1, f2) with rail pairs on a pair
/// of six-mode gate blocks, heralded by the four vacuum modes.
fn shor_encoding() -> PathEncoding {
    PathEncoding::new(12, vec![(1, 2), (7, 8), (3, 4), (9, 10)], vec![0, 5, 6, 11]).unwrap()
}

/// The circuit itself. Hadamard-equivalent splitters (reflectivity 1/2,
/// phase pi) fan the control qubits out; each controlled-Z is three
/// one-third splitters, one coupling the two one-rails and one balancing
/// each zero-rail against vacuum; the target rails are sandwiched between
/// balanced splitters with an explicit pi phase shifter on the one-rail.
fn shor_network() -> ModeNetwork<f64> {
    let third = 1.0 / 3.0;
    let mut net = ModeNetwork::new(12).unwrap();

    // Control-qubit Hadamards.
    net.beam_splitter(1, 2, 0.5, Angle::pi()).unwrap();
    net.beam_splitter(7, 8, 0.5, Angle::pi()).unwrap();

    // Target-rail mixers ahead of the controlled-Z cores.
    net.beam_splitter(3, 4, 0.5, Angle::zero())
        .unwrap()
        .phase_shifter(4, Angle::pi())
        .unwrap()
        .beam_splitter(9, 10, 0.5, Angle::zero())
        .unwrap()
        .phase_shifter(10, Angle::pi())
        .unwrap();

    // First controlled-Z: vacuum balance, central coupling, vacuum balance.
    net.beam_splitter(0, 1, third, Angle::zero())
        .unwrap()
        .beam_splitter(2, 4, third, Angle::zero())
        .unwrap()
        .beam_splitter(3, 5, third, Angle::zero())
        .unwrap();

    // Second controlled-Z.
    net.beam_splitter(6, 7, third, Angle::zero())
        .unwrap()
        .beam_splitter(8, 10, third, Angle::zero())
        .unwrap()
        .beam_splitter(9, 11, third, Angle::zero())
        .unwrap();

    // Target-rail mixers closing the gates.
    net.beam_splitter(3, 4, 0.5, Angle::zero())
        .unwrap()
        .phase_shifter(4, Angle::pi())
        .unwrap()
        .beam_splitter(9, 10, 0.5, Angle::zero())
        .unwrap()
        .phase_shifter(10, Angle::pi())
        .unwrap();

    net
}

/// The four outcomes the algorithm post-selects: f1 copies x1 while f2
/// copies the negation of x2.
const EXPECTED: [[bool; 4]; 4] = [
    [false, false, false, true],
    [false, true, false, false],
    [true, false, true, true],
    [true, true, true, false],
];

#[test]
fn input_state_matches_documented_layout() {
    let enc = shor_encoding();
    let input = enc.fock_state(&[false, false, false, true]).unwrap();
    assert_eq!(
        input,
        FockState::new([0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0])
    );
    assert_eq!(input.total_photons(), 4);
}

#[test]
fn network_is_unitary() {
    let net = shor_network();
    assert!(net.unitary().max_unitarity_deviation() < 1e-9);
}

#[test]
fn post_selected_outcomes_are_uniform() {
    let enc = shor_encoding();
    let net = shor_network();
    let sim = FockStateSimulator::new(net.unitary());
    let input = enc.fock_state(&[false, false, false, true]).unwrap();

    let expected_amplitude = 1.0 / 18.0;
    let expected_probability = expected_amplitude * expected_amplitude;

    let mut kept = 0.0f64;
    for (bits, output) in enc.computational_basis() {
        let amplitude = sim.amplitude(&input, &output).unwrap();
        if EXPECTED.contains(&[bits[0], bits[1], bits[2], bits[3]]) {
            assert!(
                (amplitude.norm() - expected_amplitude).abs() < 1e-9,
                "outcome {:?} has |amplitude| {}",
                bits,
                amplitude.norm()
            );
            kept += amplitude.norm_sqr();
        } else {
            assert!(
                is_effectively_zero(amplitude, ZERO_TOLERANCE),
                "outcome {:?} should be forbidden, got {}",
                bits,
                amplitude
            );
        }
    }

    // Each gate succeeds with probability 1/9; two of them leave 1/81
    // spread evenly over four outcomes.
    assert!((kept - 1.0 / 81.0).abs() < 1e-9);
    assert!((4.0 * expected_probability - 1.0 / 81.0).abs() < 1e-15);
}

#[test]
fn renormalized_qubit_distribution_is_uniform() {
    let enc = shor_encoding();
    let net = shor_network();
    let sim = FockStateSimulator::new(net.unitary());
    let input = enc.fock_state(&[false, false, false, true]).unwrap();

    let distribution = sim.distribution(&input).unwrap();
    let rows = enc.postselect(&distribution).unwrap();

    // All sixteen qubit patterns are representable; only four carry weight.
    assert_eq!(rows.len(), 16);
    let total: f64 = rows.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);

    for (bits, probability) in rows {
        if EXPECTED.contains(&[bits[0], bits[1], bits[2], bits[3]]) {
            assert!(
                (probability - 0.25).abs() < 1e-6,
                "outcome {:?} got {}",
                bits,
                probability
            );
        } else {
            assert!(probability < 1e-9, "outcome {:?} got {}", bits, probability);
        }
    }
}

#[test]
fn amplitudes_repeat_bit_identically() {
    let enc = shor_encoding();
    let net = shor_network();
    let sim = FockStateSimulator::new(net.unitary());
    let input = enc.fock_state(&[false, false, false, true]).unwrap();
    let output = enc.fock_state(&[true, true, true, false]).unwrap();

    let first = sim.amplitude(&input, &output).unwrap();
    let second = sim.amplitude(&input, &output).unwrap();
    assert_eq!(first, second);
}
