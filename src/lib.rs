//! rust_optim — gradient-based optimizers for fitting parametric models.
//!
//! Purpose
//! -------
//! Serve as the crate root for the optimizer core: L-BFGS with backtracking
//! or bracketing line searches, mini-batch SGD, and greedy L1 coordinate
//! descent, all driven by a caller-supplied loss function over dense
//! in-memory data.
//!
//! Key behaviors
//! -------------
//! - Re-export the optimizer stack (`optimization`) and the shared data
//!   helpers (`utils`) as the public crate surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Execution is single-threaded and synchronous; each `optimize` call
//!   owns its parameter vector, history and RNG for the duration of the run.
//! - The crate never installs a logger; progress records go through the
//!   `log` facade and are dropped unless the application sets one up.
//!
//! Downstream usage
//! ----------------
//! ```ignore
//! use rust_optim::optimization::prelude::*;
//!
//! let opts = OptimizerOptions::default();
//! let lbfgs = Lbfgs::new(x0, LogLoss::new(), opts, LbfgsOptions::default())?;
//! let out = lbfgs.optimize(&x, &y)?;
//! println!("{} after {} iterations: f = {}", out.status, out.iterations, out.value);
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside the code; end-to-end scenarios live under
//!   `tests/`.

pub mod optimization;
pub mod utils;
