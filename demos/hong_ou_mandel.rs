//! Hong-Ou-Mandel interference on a balanced beam splitter: two photons
//! entering from opposite sides never exit separately.

use loqs::prelude::*;

fn main() -> NetworkResult<()> {
    let mut net = ModeNetwork::<f64>::new(2)?;
    net.beam_splitter(0, 1, 0.5, Angle::zero())?;
    let sim = FockStateSimulator::new(net.unitary());

    let input = FockState::new([1, 1]);
    println!("input {}", input);
    for (output, probability) in sim.distribution(&input)? {
        println!("  -> {}  p = {:.6}", output, probability);
    }

    println!("a few samples:");
    for _ in 0..8 {
        println!("  {}", sim.sample(&input)?);
    }
    Ok(())
}
