//! # VQO Solvers
//!
//! Provider adapters and local samplers.
//!
//! ## Features
//!
//! - **Solver**: gate-based adapter interface (parse, select, transpile,
//!   execute, normalize) with IBM-style and Braket-style implementations
//! - **Simulator**: local dense-state sampler implementing the backend
//!   device trait
//! - **Session**: transpile-once, bind-per-iteration sampling sessions
//! - **Annealing**: direct model translation to constrained/discrete/binary
//!   quadratic models, hybrid/QPU selection with fallback, feasibility
//!   filtering, local Metropolis sampler
//! - **Factory**: provider keyed construction with typed option records and
//!   credential checks
//!
//! ## Example
//!
//! ```rust
//! use vqo_solvers::{IbmqSolver, Solver};
//!
//! let solver = IbmqSolver::new("token".into(), 128, "simulator".into(), 1);
//! let program = "qreg q[1];\ncreg c[1];\nx q[0];\nmeasure q[0] -> c[0];\n";
//! let counts = solver.solve(program).unwrap();
//! assert_eq!(counts.get("1"), Some(&128));
//! ```

pub mod annealer;
pub mod braket;
pub mod credentials;
pub mod device;
pub mod dwave;
pub mod error;
pub mod factory;
pub mod ibm;
pub mod quadratic;
pub mod session;
pub mod simulator;
pub mod solver;
pub mod transpile;

pub use annealer::{AnnealingSampler, LocalAnnealingSampler, SampleParams};
pub use braket::BraketSolver;
pub use credentials::Credentials;
pub use device::{DeviceRegistry, LocalRegistry, QuantumDevice};
pub use dwave::{AnnealerSolution, DwaveConfig, DwaveSolver, ParsedModel};
pub use error::{Result, SolverError};
pub use factory::{AnySolver, ProviderConfig, ProviderOptions, ProviderType, SolverFactory};
pub use ibm::IbmqSolver;
pub use quadratic::{
    BinaryQuadraticModel, ConstrainedQuadraticModel, DiscreteQuadraticModel, QuadraticModel,
    SampleRow, SampleSet, Vartype,
};
pub use session::SamplerSession;
pub use simulator::{LocalSimulator, StateVector};
pub use solver::Solver;
pub use transpile::transpile;

use std::collections::HashMap;

/// Measurement histogram: bitstring to count
///
/// Bitstrings are little-endian with respect to the classical register
/// index; every adapter normalizes to this convention.
pub type Counts = HashMap<String, u64>;

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
