//! L-BFGS specific options.
use crate::optimization::{
    errors::{OptError, OptResult},
    line_search::{LineSearchParams, LineSearchPolicy},
    types::{DEFAULT_DELTA, DEFAULT_LBFGS_MEM, DEFAULT_PAST},
};

/// Options consumed by [`crate::optimization::lbfgs::Lbfgs`] on top of the
/// shared [`crate::optimization::base::OptimizerOptions`].
///
/// Fields:
/// - `mem_size`: number of correction pairs kept (`m > 0`).
/// - `past`: look-back distance for the relative-decrease test; `0`
///   disables the test.
/// - `delta`: relative-decrease threshold, finite and `>= 0`.
/// - `line_search`: strategy used at every iteration.
/// - `params`: numeric line-search parameters.
///
/// Default:
/// `mem_size = 8`, `past = 3`, `delta = 1e-6`, backtracking with
/// [`LineSearchParams::default`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LbfgsOptions {
    pub mem_size: usize,
    pub past: usize,
    pub delta: f64,
    pub line_search: LineSearchPolicy,
    pub params: LineSearchParams,
}

impl LbfgsOptions {
    /// Create validated options, parsing the line-search policy by name
    /// (`"backtracking"` or `"bracketing"`, case-insensitive).
    ///
    /// # Errors
    /// - `InvalidLBFGSMem` if `mem_size == 0`.
    /// - `InvalidDelta` if `delta` is negative or non-finite.
    /// - `InvalidLineSearch` for an unknown policy name.
    /// - `InvalidLineSearchParam` for out-of-range numeric parameters.
    pub fn new(
        mem_size: usize, past: usize, delta: f64, line_search: &str, params: LineSearchParams,
    ) -> OptResult<Self> {
        let line_search: LineSearchPolicy = line_search.parse()?;
        let opts = Self { mem_size, past, delta, line_search, params };
        opts.validate()?;
        Ok(opts)
    }

    /// Check every field; used again when the solver is built so options
    /// assembled by struct literal are covered too.
    pub fn validate(&self) -> OptResult<()> {
        if self.mem_size == 0 {
            return Err(OptError::InvalidLBFGSMem {
                mem: self.mem_size,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        if !(self.delta.is_finite() && self.delta >= 0.0) {
            return Err(OptError::InvalidDelta {
                delta: self.delta,
                reason: "Relative decrease threshold must be finite and non-negative.",
            });
        }
        self.params.validate()
    }
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            mem_size: DEFAULT_LBFGS_MEM,
            past: DEFAULT_PAST,
            delta: DEFAULT_DELTA,
            line_search: LineSearchPolicy::Backtracking,
            params: LineSearchParams::default(),
        }
    }
}
