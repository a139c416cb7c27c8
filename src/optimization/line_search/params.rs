//! Line-search configuration: acceptance condition and numeric parameters.
use std::str::FromStr;

use crate::optimization::errors::{OptError, OptResult};

/// Acceptance test applied to a trial step.
///
/// Variants:
/// - `Armijo`: sufficient decrease only,
///   `f(x + αd) ≤ f(x) + ftol·α·(d·g₀)`.
/// - `Wolfe`: Armijo plus the curvature test `d·g(α) ≥ wolfe·(d·g₀)`.
/// - `StrongWolfe`: Armijo plus `|d·g(α)| ≤ wolfe·|d·g₀|`.
///
/// Parsing:
/// Case-insensitive `"armijo"`, `"wolfe"`, `"strong_wolfe"` (also
/// `"strongwolfe"` / `"strong-wolfe"`). Unknown names return
/// `OptError::InvalidLineSearchCondition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearchCondition {
    #[default]
    Armijo,
    Wolfe,
    StrongWolfe,
}

impl FromStr for LineSearchCondition {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "armijo" => Ok(LineSearchCondition::Armijo),
            "wolfe" => Ok(LineSearchCondition::Wolfe),
            "strongwolfe" => Ok(LineSearchCondition::StrongWolfe),
            _ => Err(OptError::InvalidLineSearchCondition {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'ARMIJO', 'WOLFE' or 'STRONG_WOLFE'.",
            }),
        }
    }
}

/// Numeric parameters shared by every line-search strategy.
///
/// Fields:
/// - `ftol`: Armijo coefficient, `0 < ftol < wolfe`.
/// - `wolfe`: curvature coefficient, `ftol < wolfe < 1`.
/// - `min_step` / `max_step`: admissible step range, `0 < min_step < max_step`.
/// - `decrease_factor`: shrink multiplier, in `(0, 1)`.
/// - `increase_factor`: growth multiplier, `> 1`.
/// - `condition`: acceptance test (see [`LineSearchCondition`]).
/// - `max_linesearch`: maximum number of trial steps per search, `> 0`.
///
/// Default:
/// `ftol = 1e-4`, `wolfe = 0.9`, `min_step = 1e-20`, `max_step = 1e20`,
/// `decrease_factor = 0.5`, `increase_factor = 2.1`, `condition = Armijo`,
/// `max_linesearch = 20`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchParams {
    pub ftol: f64,
    pub wolfe: f64,
    pub min_step: f64,
    pub max_step: f64,
    pub decrease_factor: f64,
    pub increase_factor: f64,
    pub condition: LineSearchCondition,
    pub max_linesearch: usize,
}

impl Default for LineSearchParams {
    fn default() -> Self {
        Self {
            ftol: 1e-4,
            wolfe: 0.9,
            min_step: 1e-20,
            max_step: 1e20,
            decrease_factor: 0.5,
            increase_factor: 2.1,
            condition: LineSearchCondition::Armijo,
            max_linesearch: 20,
        }
    }
}

impl LineSearchParams {
    /// Default parameters with the given acceptance condition.
    pub fn with_condition(condition: LineSearchCondition) -> Self {
        Self { condition, ..Self::default() }
    }

    /// Check every field against its admissible range.
    ///
    /// # Errors
    /// - [`OptError::InvalidLineSearchParam`] naming the first offending field.
    pub fn validate(&self) -> OptResult<()> {
        let invalid = |param: &'static str, value: f64, reason: &'static str| {
            Err(OptError::InvalidLineSearchParam { param, value, reason })
        };
        if !(self.ftol > 0.0 && self.ftol < 1.0) {
            return invalid("ftol", self.ftol, "Armijo coefficient must lie in (0, 1).");
        }
        if !(self.wolfe > self.ftol && self.wolfe < 1.0) {
            return invalid("wolfe", self.wolfe, "Curvature coefficient must lie in (ftol, 1).");
        }
        if !(self.min_step > 0.0 && self.min_step.is_finite()) {
            return invalid("min_step", self.min_step, "Minimum step must be finite and positive.");
        }
        if !(self.max_step > self.min_step) {
            return invalid("max_step", self.max_step, "Maximum step must exceed the minimum step.");
        }
        if !(self.decrease_factor > 0.0 && self.decrease_factor < 1.0) {
            return invalid("decrease_factor", self.decrease_factor, "Must lie in (0, 1).");
        }
        if !(self.increase_factor > 1.0 && self.increase_factor.is_finite()) {
            return invalid("increase_factor", self.increase_factor, "Must be finite and > 1.");
        }
        if self.max_linesearch == 0 {
            return invalid(
                "max_linesearch",
                self.max_linesearch as f64,
                "At least one trial step is required.",
            );
        }
        Ok(())
    }
}
