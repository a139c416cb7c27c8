//! lbfgs — limited-memory BFGS with pluggable line searches.
//!
//! Purpose
//! -------
//! Minimize a smooth loss over `w` using curvature information gathered from
//! the last `m` steps, without ever forming a Hessian or its inverse.
//!
//! Key behaviors
//! -------------
//! - [`LbfgsHistory`] stores up to `mem_size` correction pairs and computes
//!   `d = −H·g` with the two-loop recursion (newest pairs first, then
//!   oldest first).
//! - [`PastObjectiveWindow`] holds the last `past` objective values for the
//!   relative-decrease stopping test.
//! - [`Lbfgs`] runs the outer loop: convergence checks, direction, line
//!   search, history update.
//!
//! Invariants & assumptions
//! ------------------------
//! - The history holds at most `mem_size` pairs, all with `y·s > 0`.
//! - The line-search strategy is fixed when [`Lbfgs::new`] returns; a bad
//!   policy name never reaches `optimize`.
//! - Line-search failures end the run and are returned unchanged.
//!
//! Conventions
//! -----------
//! - With an empty history the direction is `−g` and the first trial step is
//!   `1/‖g‖` (a unit-length move); with history the recursion is seeded with
//!   `γ = (s·y)/(y·y)` from the newest pair and the first trial step is `1`.
//!
//! Testing notes
//! -------------
//! - `history` and `window` are unit-tested directly; `solver` tests run
//!   small least-squares problems; end-to-end scenarios live in
//!   `tests/integration_optimizers.rs`.

pub mod history;
pub mod options;
pub mod solver;
pub mod window;

pub use self::history::{CorrectionPair, LbfgsHistory};
pub use self::options::LbfgsOptions;
pub use self::solver::Lbfgs;
pub use self::window::PastObjectiveWindow;
