//! Local dense-state simulator
//!
//! State-vector simulation of the dialect gate set. Single-qubit gates are
//! applied in place over strided amplitude pairs (parallelized with rayon
//! for larger registers); `cx` and `swap` are basis-state permutations.
//! Amplitude index bit `q` corresponds to qubit `q` (little-endian).

use crate::device::QuantumDevice;
use crate::error::{Result, SolverError};
use crate::Counts;
use nalgebra::Matrix2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Mutex;
use vqo_circuits::{Circuit, Op, Param};

/// Complex number type alias
pub type Complex = Complex64;

/// Zero complex number
pub const ZERO: Complex = Complex64::new(0.0, 0.0);

/// One complex number
pub const ONE: Complex = Complex64::new(1.0, 0.0);

/// Imaginary unit
pub const I: Complex = Complex64::new(0.0, 1.0);

/// Amplitude count above which gate application parallelizes
const PARALLEL_THRESHOLD: usize = 1 << 14;

// ==================== Gate matrices ====================

mod matrices {
    use super::{Complex, I, ONE, ZERO};
    use nalgebra::Matrix2;

    pub fn h() -> Matrix2<Complex> {
        let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Matrix2::new(h, h, h, -h)
    }

    pub fn x() -> Matrix2<Complex> {
        Matrix2::new(ZERO, ONE, ONE, ZERO)
    }

    pub fn sdg() -> Matrix2<Complex> {
        Matrix2::new(ONE, ZERO, ZERO, -I)
    }

    /// Rx(θ) = exp(-iθX/2)
    pub fn rx(theta: f64) -> Matrix2<Complex> {
        let cos = Complex::new((theta / 2.0).cos(), 0.0);
        let sin = Complex::new(0.0, -(theta / 2.0).sin());
        Matrix2::new(cos, sin, sin, cos)
    }

    /// Ry(θ) = exp(-iθY/2)
    pub fn ry(theta: f64) -> Matrix2<Complex> {
        let cos = Complex::new((theta / 2.0).cos(), 0.0);
        let sin = Complex::new((theta / 2.0).sin(), 0.0);
        Matrix2::new(cos, -sin, sin, cos)
    }

    /// Rz(θ) = exp(-iθZ/2)
    pub fn rz(theta: f64) -> Matrix2<Complex> {
        let neg = Complex::from_polar(1.0, -theta / 2.0);
        let pos = Complex::from_polar(1.0, theta / 2.0);
        Matrix2::new(neg, ZERO, ZERO, pos)
    }
}

// ==================== State vector ====================

/// Dense state vector over `2^n` amplitudes
#[derive(Debug, Clone)]
pub struct StateVector {
    num_qubits: usize,
    amps: Vec<Complex>,
}

impl StateVector {
    /// Initialize to |0...0⟩
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut amps = vec![ZERO; dim];
        amps[0] = ONE;
        Self { num_qubits, amps }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dimension(&self) -> usize {
        self.amps.len()
    }

    /// Probability distribution over basis states
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }

    fn apply_single(&mut self, m: &Matrix2<Complex>, qubit: usize) {
        let stride = 1usize << qubit;
        let (m00, m01, m10, m11) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
        let block = move |chunk: &mut [Complex]| {
            for k in 0..stride {
                let a = chunk[k];
                let b = chunk[k + stride];
                chunk[k] = m00 * a + m01 * b;
                chunk[k + stride] = m10 * a + m11 * b;
            }
        };
        if self.amps.len() >= PARALLEL_THRESHOLD {
            self.amps.par_chunks_mut(stride * 2).for_each(block);
        } else {
            self.amps.chunks_mut(stride * 2).for_each(block);
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let c_mask = 1usize << control;
        let t_mask = 1usize << target;
        for i in 0..self.amps.len() {
            if i & c_mask != 0 && i & t_mask == 0 {
                self.amps.swap(i, i | t_mask);
            }
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let a_mask = 1usize << a;
        let b_mask = 1usize << b;
        for i in 0..self.amps.len() {
            if i & a_mask != 0 && i & b_mask == 0 {
                self.amps.swap(i, (i & !a_mask) | b_mask);
            }
        }
    }

    /// Apply one gate op; measurements are a no-op at the state level
    pub fn apply_op(&mut self, op: &Op) -> Result<()> {
        let angle = |p: Param| -> Result<f64> {
            match p {
                Param::Value(v) => Ok(v),
                Param::Theta { .. } => Err(SolverError::InvalidProgram(
                    vqo_circuits::CircuitError::UnboundParameter(p.to_string()),
                )),
            }
        };
        match *op {
            Op::H(q) => self.apply_single(&matrices::h(), q),
            Op::X(q) => self.apply_single(&matrices::x(), q),
            Op::Sdg(q) => self.apply_single(&matrices::sdg(), q),
            Op::Rx(p, q) => self.apply_single(&matrices::rx(angle(p)?), q),
            Op::Ry(p, q) => self.apply_single(&matrices::ry(angle(p)?), q),
            Op::Rz(p, q) => self.apply_single(&matrices::rz(angle(p)?), q),
            Op::Cx(c, t) => self.apply_cx(c, t),
            Op::Swap(a, b) => self.apply_swap(a, b),
            Op::Measure { .. } => {}
        }
        Ok(())
    }
}

// ==================== Simulator device ====================

/// Local dense-state simulator backend
///
/// Implements [`QuantumDevice`] and returns counts keyed most-significant
/// classical bit first, like the remote devices it stands in for; the
/// adapters reverse to the little-endian convention.
pub struct LocalSimulator {
    name: String,
    max_qubits: usize,
    rng: Mutex<StdRng>,
}

impl LocalSimulator {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create with a fixed sampling seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "simulator".to_string(),
            max_qubits: 26,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Run a fully bound circuit and sample the classical register
    pub fn sample(&self, circuit: &Circuit, shots: u64) -> Result<Counts> {
        let mut state = StateVector::new(circuit.num_qubits);
        let mut measures: Vec<(usize, usize)> = Vec::new();
        for op in circuit.ops() {
            if let Op::Measure { qubit, clbit } = *op {
                measures.push((qubit, clbit));
            }
            state.apply_op(op)?;
        }

        let probs = state.probabilities();
        let cumulative: Vec<f64> = probs
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        let total = cumulative.last().copied().unwrap_or(0.0);

        let mut rng = self.rng.lock().expect("simulator rng");
        let mut counts = Counts::new();
        for _ in 0..shots {
            let r = rng.gen::<f64>() * total;
            let index = cumulative.partition_point(|&c| c < r).min(probs.len() - 1);
            let mut bits = vec![b'0'; circuit.num_clbits];
            for &(qubit, clbit) in &measures {
                if (index >> qubit) & 1 == 1 {
                    bits[clbit] = b'1';
                }
            }
            // Most-significant classical bit first
            bits.reverse();
            let key = String::from_utf8(bits).expect("ascii bits");
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl Default for LocalSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumDevice for LocalSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.max_qubits
    }

    fn native_gates(&self) -> &[&'static str] {
        &["h", "x", "sdg", "rx", "ry", "rz", "cx", "swap", "measure"]
    }

    fn run(&self, circuit: &Circuit, shots: u64) -> Result<Counts> {
        if circuit.num_qubits > self.max_qubits {
            return Err(SolverError::BackendExecutionError(format!(
                "{} qubits exceed simulator capacity of {}",
                circuit.num_qubits, self.max_qubits
            )));
        }
        self.sample(circuit, shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vqo_circuits::Circuit;

    #[test]
    fn test_hadamard_superposition() {
        let mut state = StateVector::new(1);
        state.apply_op(&Op::H(0)).unwrap();
        let probs = state.probabilities();
        assert_relative_eq!(probs[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(probs[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_bell_state() {
        let mut state = StateVector::new(2);
        state.apply_op(&Op::H(0)).unwrap();
        state.apply_op(&Op::Cx(0, 1)).unwrap();
        let probs = state.probabilities();
        assert_relative_eq!(probs[0b00], 0.5, epsilon = 1e-12);
        assert_relative_eq!(probs[0b11], 0.5, epsilon = 1e-12);
        assert_relative_eq!(probs[0b01], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_flips() {
        let circuit = Circuit::new(2).x(1).measure_all();
        let sim = LocalSimulator::with_seed(1);
        let counts = sim.sample(&circuit, 100).unwrap();
        // Vendor order: c[1] printed first
        assert_eq!(counts.get("10"), Some(&100));
    }

    #[test]
    fn test_swap_moves_excitation() {
        let circuit = Circuit::new(2).x(0).swap(0, 1).measure_all();
        let sim = LocalSimulator::with_seed(1);
        let counts = sim.sample(&circuit, 50).unwrap();
        assert_eq!(counts.get("10"), Some(&50));
    }

    #[test]
    fn test_ry_rotation_probability() {
        use vqo_circuits::Param;
        // Ry(π) maps |0> to |1>
        let circuit = Circuit::new(1)
            .ry(Param::Value(std::f64::consts::PI), 0)
            .measure_all();
        let sim = LocalSimulator::with_seed(3);
        let counts = sim.sample(&circuit, 64).unwrap();
        assert_eq!(counts.get("1"), Some(&64));
    }

    #[test]
    fn test_unbound_param_rejected() {
        use vqo_circuits::Param;
        let circuit = Circuit::new(1).rz(Param::theta(0), 0).measure_all();
        let sim = LocalSimulator::with_seed(1);
        assert!(sim.sample(&circuit, 10).is_err());
    }
}
