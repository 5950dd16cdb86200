//! # VQO Model
//!
//! Algebraic optimization models and their QUBO lowering.
//!
//! ## Features
//!
//! - **Model**: ordered variables (binary, bounded integer, continuous),
//!   label-unique linear constraints, linear/quadratic objective, min/max
//!   sense
//! - **Analysis**: constraint-pattern classification (cardinality,
//!   partition, inequality, multiple, unconstrained) feeding mixer selection
//! - **QUBO**: penalty-method encoding with slack and integer bit expansion,
//!   plus an interpreter that maps expanded bits back to model variables
//! - **Problems**: knapsack and max-cut builders
//!
//! ## Example
//!
//! ```rust
//! use vqo_model::{problems, QuboEncoder};
//!
//! let model = problems::knapsack("k", &[10.0, 5.0], &[4.0, 2.0], 5.0).unwrap();
//! let (qubo, interpreter) = QuboEncoder::new().encode(&model).unwrap();
//! assert_eq!(qubo.num_vars(), 2 + 3); // 2 items + 3 slack bits
//! assert_eq!(interpreter.interpret(&[1, 0, 0, 0, 0]), vec![1.0, 0.0]);
//! ```

pub mod analysis;
pub mod classical;
pub mod constraint;
pub mod error;
pub mod expr;
pub mod model;
pub mod problems;
pub mod qubo;
pub mod solution;
pub mod variable;

pub use analysis::{analyze, ConstraintInfo, ConstraintType};
pub use classical::ClassicalSolve;
pub use constraint::{Comparator, Constraint};
pub use error::{ModelError, Result};
pub use expr::{linear_sum, Expression};
pub use model::{Model, Sense};
pub use qubo::{Qubo, QuboEncoder, QuboInterpreter};
pub use solution::{ModelSolution, SolveMethod};
pub use variable::{VarKind, Variable};

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
