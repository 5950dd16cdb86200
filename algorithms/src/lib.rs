//! # VQO Algorithms
//!
//! Gate-based variational algorithms for combinatorial optimization.
//!
//! ## Implemented
//!
//! - **QAOA**: alternating cost and mixing unitaries with `2p` parameters;
//!   the mixer is pluggable (`qao-ansatz` selects it from the model's
//!   constraint pattern)
//! - **VQE**: hardware-efficient Ry/CX ansatz with `n + 4(n-1)*layers`
//!   parameters
//! - **Mixers**: standard X, cardinality (XY), partition (SWAP),
//!   inequality (chain), composite
//! - **Expectation**: Pauli-basis rotations and parity-weighted averages
//!
//! ## Example
//!
//! ```rust
//! use vqo_algorithms::{Algorithm, AlgorithmConfig, AlgorithmFactory};
//! use vqo_model::problems;
//!
//! let model = problems::knapsack("k", &[3.0, 5.0], &[2.0, 3.0], 4.0).unwrap();
//! let mut algorithm =
//!     AlgorithmFactory::build(&model, AlgorithmConfig::default()).unwrap();
//! let start = algorithm.starting_point();
//! assert_eq!(start.len(), algorithm.num_params());
//! ```

pub mod algorithm;
pub mod error;
pub mod expectation;
pub mod factory;
pub mod mixers;
pub mod qaoa;
pub mod vqe;

pub use algorithm::Algorithm;
pub use error::{AlgorithmError, Result};
pub use factory::{AlgorithmConfig, AlgorithmFactory, AlgorithmType};
pub use qaoa::Qaoa;
pub use vqe::{AnsatzKind, Vqe};

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
