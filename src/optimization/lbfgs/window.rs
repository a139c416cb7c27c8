//! Look-back window of past objective values for the relative-decrease test.
use std::collections::VecDeque;

/// The last `past` objective values, oldest first.
///
/// Once `past` values are stored, [`PastObjectiveWindow::relative_decrease`]
/// compares a new value `f_k` with `f_{k−past}`:
/// `|f_{k−past} − f_k| / max(|f_k|, 1)`. A window with `past = 0` is
/// disabled and never reports a decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct PastObjectiveWindow {
    values: VecDeque<f64>,
    past: usize,
}

impl PastObjectiveWindow {
    pub fn new(past: usize) -> Self {
        Self { values: VecDeque::with_capacity(past), past }
    }

    pub fn is_enabled(&self) -> bool {
        self.past > 0
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record `fx`, dropping the oldest value once `past` are held.
    pub fn push(&mut self, fx: f64) {
        if !self.is_enabled() {
            return;
        }
        if self.values.len() == self.past {
            self.values.pop_front();
        }
        self.values.push_back(fx);
    }

    /// Relative decrease of `fx` against the value recorded `past` pushes
    /// ago, or `None` until the window is full.
    pub fn relative_decrease(&self, fx: f64) -> Option<f64> {
        if !self.is_enabled() || self.values.len() < self.past {
            return None;
        }
        let oldest = self.values.front()?;
        Some((oldest - fx).abs() / fx.abs().max(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // The decrease is reported only once `past` values are held and always
    // against the value from exactly `past` pushes earlier.
    //
    // Given
    // -----
    // - `past = 2`, pushes 10.0 then 8.0, then queries at 4.0; push 4.0 and
    //   query at 3.0.
    //
    // Expect
    // ------
    // - `None` after one push; `(10 − 4)/4 = 1.5`; then `(8 − 3)/3`.
    fn compares_against_value_past_iterations_ago() {
        // Arrange
        let mut window = PastObjectiveWindow::new(2);

        // Act / Assert
        window.push(10.0);
        assert_eq!(window.relative_decrease(9.0), None);
        window.push(8.0);
        assert_relative_eq!(window.relative_decrease(4.0).unwrap(), 1.5);
        window.push(4.0);
        assert_eq!(window.len(), 2);
        assert_relative_eq!(window.relative_decrease(3.0).unwrap(), 5.0 / 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Small objective values are compared on an absolute scale, and a
    // disabled window stays silent.
    fn small_values_and_disabled_window() {
        let mut window = PastObjectiveWindow::new(1);
        window.push(1e-3);
        assert_relative_eq!(window.relative_decrease(0.0).unwrap(), 1e-3);

        let mut disabled = PastObjectiveWindow::new(0);
        disabled.push(5.0);
        assert!(disabled.is_empty());
        assert_eq!(disabled.relative_decrease(1.0), None);
    }
}
