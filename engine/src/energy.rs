//! Shot-weighted energy estimation

use vqo_model::Qubo;
use vqo_solvers::Counts;

/// Decode a little-endian bitstring into a binary sample
pub fn parse_bitstring(bits: &str) -> Vec<u8> {
    bits.chars().map(|c| u8::from(c == '1')).collect()
}

/// Average QUBO energy of a histogram: `(1/shots) * sum counts[b] * E(b)`
pub fn calculate_energy(counts: &Counts, shots: u64, qubo: &Qubo) -> f64 {
    let mut energy = 0.0;
    for (bits, &count) in counts {
        let sample = parse_bitstring(bits);
        energy += count as f64 * qubo.evaluate(&sample);
    }
    energy / shots as f64
}
