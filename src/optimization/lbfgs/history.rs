//! Bounded correction-pair history and the two-loop recursion.
//!
//! [`LbfgsHistory`] keeps the last `m` pairs `(s_k, y_k)` with
//! `s_k = x_{k+1} − x_k`, `y_k = g_{k+1} − g_k` and `ρ_k = 1/(y_k·s_k)`,
//! oldest at the front. Pushing into a full history evicts the oldest pair.
//! Pairs with `y_k·s_k ≤ 0` are refused so the implicit inverse-Hessian
//! approximation stays positive definite.
use std::collections::VecDeque;

use crate::optimization::types::Grad;

/// One stored correction pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionPair {
    pub s: Grad,
    pub y: Grad,
    /// `1 / (y·s)`, always finite and positive.
    pub rho: f64,
}

/// Ring buffer of at most `capacity` correction pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsHistory {
    pairs: VecDeque<CorrectionPair>,
    capacity: usize,
}

impl LbfgsHistory {
    /// Empty history holding at most `capacity` pairs.
    ///
    /// `capacity` is validated by [`crate::optimization::lbfgs::LbfgsOptions`];
    /// a zero capacity stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self { pairs: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored pairs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CorrectionPair> {
        self.pairs.iter()
    }

    /// Store `(s, y)`, evicting the oldest pair when full.
    ///
    /// Returns `false` (and stores nothing) when `y·s` is not strictly
    /// positive or not finite.
    pub fn push(&mut self, s: Grad, y: Grad) -> bool {
        let ys = y.dot(&s);
        if !(ys > 0.0 && ys.is_finite()) || self.capacity == 0 {
            return false;
        }
        if self.pairs.len() == self.capacity {
            self.pairs.pop_front();
        }
        self.pairs.push_back(CorrectionPair { s, y, rho: 1.0 / ys });
        true
    }

    /// Search direction `d = −H_k·g` by the two-loop recursion.
    ///
    /// The initial matrix is `H_0 = γI` with `γ = (s·y)/(y·y)` from the newest
    /// pair. With no stored pairs this is plain steepest descent, `d = −g`.
    pub fn direction(&self, g: &Grad) -> Grad {
        let Some(newest) = self.pairs.back() else {
            return -g;
        };

        let mut q = g.clone();
        let mut alphas = vec![0.0; self.pairs.len()];
        for (pair, alpha) in self.pairs.iter().zip(alphas.iter_mut()).rev() {
            *alpha = pair.rho * pair.s.dot(&q);
            q.scaled_add(-*alpha, &pair.y);
        }

        let gamma = 1.0 / (newest.rho * newest.y.dot(&newest.y));
        q *= gamma;

        for (pair, alpha) in self.pairs.iter().zip(alphas.iter()) {
            let beta = pair.rho * pair.y.dot(&q);
            q.scaled_add(alpha - beta, &pair.s);
        }
        -q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Capacity and oldest-first eviction.
    // - Rejection of pairs that fail the curvature condition.
    // - The two-loop recursion on a quadratic whose curvature is fully
    //   captured by the stored pairs.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The history never exceeds its capacity and evicts the oldest pair.
    //
    // Given
    // -----
    // - Capacity 2 and three valid pairs `s = k·e₁`, `y = e₁` for k = 1, 2, 3.
    //
    // Expect
    // ------
    // - Length stays at 2 and the remaining pairs are k = 2, 3 in order.
    fn push_evicts_oldest_when_full() {
        // Arrange
        let mut history = LbfgsHistory::new(2);

        // Act
        for k in 1..=3 {
            assert!(history.push(array![k as f64, 0.0], array![1.0, 0.0]));
            assert!(history.len() <= history.capacity());
        }

        // Assert
        let firsts: Vec<f64> = history.iter().map(|p| p.s[0]).collect();
        assert_eq!(history.len(), 2);
        assert_eq!(firsts, vec![2.0, 3.0]);
        assert_abs_diff_eq!(history.iter().last().unwrap().rho, 1.0 / 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Pairs with non-positive curvature are skipped.
    fn push_skips_non_positive_curvature() {
        let mut history = LbfgsHistory::new(3);

        assert!(!history.push(array![1.0, 0.0], array![-1.0, 0.0]));
        assert!(!history.push(array![1.0, 0.0], array![0.0, 1.0]));
        assert!(history.is_empty());
        assert_eq!(history.direction(&array![2.0, -1.0]), array![-2.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // With pairs spanning the space of a quadratic the recursion reproduces
    // the Newton direction.
    //
    // Given
    // -----
    // - `f = ½(x₁² + 4x₂²)`, pairs `(e₁, e₁)` and `(e₂, 4e₂)`.
    // - Gradient `g = (1, 1)`.
    //
    // Expect
    // ------
    // - `d = −H⁻¹g = (−1, −0.25)`.
    fn direction_matches_newton_on_quadratic() {
        // Arrange
        let mut history = LbfgsHistory::new(5);
        history.push(array![1.0, 0.0], array![1.0, 0.0]);
        history.push(array![0.0, 1.0], array![0.0, 4.0]);

        // Act
        let d = history.direction(&array![1.0, 1.0]);

        // Assert
        assert_abs_diff_eq!(d[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d[1], -0.25, epsilon = 1e-12);
    }
}
