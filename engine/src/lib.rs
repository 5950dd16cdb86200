//! # VQO Engine
//!
//! The outer execution loop for variational quantum optimization.
//!
//! ## Features
//!
//! - **ExecutionConfig**: TOML-loadable configuration with validation
//! - **Optimizers**: derivative-free classical minimizers (COBYLA-style
//!   trust region, Nelder-Mead, SPSA) plus user-supplied implementations
//! - **GGAEM**: the default workflow coupling the optimizer to a gate
//!   adapter, and the IBM-session variant (transpile once, bind per
//!   iteration)
//! - **Extraction**: deterministic best-sample decoding and true-objective
//!   evaluation
//! - **solve**: method/provider dispatch attaching one `ModelSolution` to
//!   the model
//!
//! ## Example
//!
//! ```rust,no_run
//! use vqo_engine::{solve, ExecutionConfig, Method};
//! use vqo_model::problems;
//!
//! let mut model = problems::knapsack(
//!     "knapsack",
//!     &[10.0, 5.0, 18.0],
//!     &[4.0, 2.0, 5.0],
//!     9.0,
//! ).unwrap();
//! let config = ExecutionConfig {
//!     method: Method::Quantum,
//!     provider: Some("ibmq".to_string()),
//!     backend: "simulator".to_string(),
//!     ..Default::default()
//! };
//! let solution = solve(&mut model, config).unwrap();
//! println!("{}", solution.report(&model));
//! ```

pub mod config;
pub mod energy;
pub mod error;
pub mod extract;
pub mod ggaem;
pub mod optimize;
pub mod session;
pub mod solve;

pub use config::{Callback, ExecutionConfig, Method, Workflow};
pub use energy::calculate_energy;
pub use error::{EngineError, Result};
pub use extract::{best_bitstring, extract_solution, ExtractedSolution};
pub use ggaem::{run_ggaem, WorkflowRun};
pub use optimize::{Optimizer, OptimizerKind, OptimizeResult, ALLOWED_OPTIMIZERS};
pub use session::run_ibm_session;
pub use solve::{solve, solve_quantum, solve_with_credentials};

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
