//! # VQO Circuits
//!
//! Parameterized gate-level circuit IR for variational algorithms.
//!
//! ## Features
//!
//! - **Op**: the dialect gate set (`h`, `x`, `rx`, `ry`, `rz`, `cx`, `swap`,
//!   `sdg`, `measure`) with numeric or placeholder angles
//! - **Circuit**: ordered op list over quantum/classical registers with a
//!   compile-time parameter count and IR-level binding
//! - **qasm**: OpenQASM 3.0 serialization, parsing (`cnot` alias included)
//!   and word-boundary text substitution for `theta<k>` placeholders
//!
//! ## Example
//!
//! ```rust
//! use vqo_circuits::{qasm, Circuit, Param};
//!
//! let template = Circuit::new(2)
//!     .h_all()
//!     .rz(Param::theta(0), 0)
//!     .rx(Param::scaled(2.0, 1), 1)
//!     .measure_all();
//! assert_eq!(template.num_params(), 2);
//!
//! let bound = template.bind(&[0.5, 0.25]).unwrap();
//! assert!(!bound.has_unbound_params());
//! let text = qasm::serialize(&bound, qasm::ParamDecls::Omit);
//! qasm::ensure_bound(&text).unwrap();
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod param;
pub mod qasm;

pub use circuit::Circuit;
pub use error::{CircuitError, Result};
pub use gate::Op;
pub use param::Param;

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
