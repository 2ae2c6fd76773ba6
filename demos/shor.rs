//! The compiled photonic Shor(15) demonstration: four photons on twelve
//! modes, two post-selected controlled-Z gates, and a uniform four-outcome
//! measurement distribution after discarding the runs where the gates fail.

use loqs::prelude::*;

fn build_network() -> NetworkResult<ModeNetwork<f64>> {
    let third = 1.0 / 3.0;
    let mut net = ModeNetwork::new(12)?;

    // Put both control qubits into superposition.
    net.beam_splitter(1, 2, 0.5, Angle::pi())?;
    net.beam_splitter(7, 8, 0.5, Angle::pi())?;

    // Open the target rails.
    net.beam_splitter(3, 4, 0.5, Angle::zero())?
        .phase_shifter(4, Angle::pi())?
        .beam_splitter(9, 10, 0.5, Angle::zero())?
        .phase_shifter(10, Angle::pi())?;

    // Two post-selected controlled-Z cores, three one-third splitters each.
    net.beam_splitter(0, 1, third, Angle::zero())?
        .beam_splitter(2, 4, third, Angle::zero())?
        .beam_splitter(3, 5, third, Angle::zero())?;
    net.beam_splitter(6, 7, third, Angle::zero())?
        .beam_splitter(8, 10, third, Angle::zero())?
        .beam_splitter(9, 11, third, Angle::zero())?;

    // Close the target rails.
    net.beam_splitter(3, 4, 0.5, Angle::zero())?
        .phase_shifter(4, Angle::pi())?
        .beam_splitter(9, 10, 0.5, Angle::zero())?
        .phase_shifter(10, Angle::pi())?;

    Ok(net)
}

fn main() -> NetworkResult<()> {
    let enc = PathEncoding::new(12, vec![(1, 2), (7, 8), (3, 4), (9, 10)], vec![0, 5, 6, 11])?;
    let net = build_network()?;
    let unitary = net.unitary();
    println!(
        "{} modes, {} components, unitarity deviation {:.2e}",
        net.modes(),
        net.len(),
        unitary.max_unitarity_deviation()
    );

    let sim = FockStateSimulator::new(unitary);
    let input = enc.fock_state(&[false, false, false, true])?;
    println!("input {}", input);

    println!("raw qubit-consistent amplitudes:");
    let mut kept = 0.0;
    for (bits, output) in enc.computational_basis() {
        let amplitude = sim.amplitude(&input, &output)?;
        if !is_effectively_zero(amplitude, ZERO_TOLERANCE) {
            let label: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
            println!(
                "  |{}>  amplitude {:.4}  p = {:.6}",
                label,
                amplitude,
                amplitude.norm_sqr()
            );
            kept += amplitude.norm_sqr();
        }
    }
    println!("post-selection succeeds with p = {:.6}", kept);

    println!("renormalized over the post-selected subspace:");
    let rows = enc.postselect(&sim.distribution(&input)?)?;
    for (bits, probability) in rows {
        if probability > 1e-9 {
            let label: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
            println!("  |{}>  p = {:.4}", label, probability);
        }
    }
    Ok(())
}
