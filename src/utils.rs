//! utils — data helpers shared by the stochastic optimizers.
//!
//! - [`shuffle_data`] applies one random row permutation to `X` and `y`
//!   together, so `y_shuffled[i]` always belongs to `X_shuffled[i, ..]`.
use ndarray::{ArrayView1, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Features, Targets},
};

/// Jointly permute the rows of `x` and the entries of `y`.
///
/// Returns owned copies; the inputs are left untouched.
///
/// # Errors
/// `DimensionMismatch { what: "targets" }` if `y.len() != x.nrows()`.
pub fn shuffle_data<R: Rng + ?Sized>(
    x: ArrayView2<f64>, y: ArrayView1<f64>, rng: &mut R,
) -> OptResult<(Features, Targets)> {
    if y.len() != x.nrows() {
        return Err(OptError::DimensionMismatch {
            what: "targets",
            expected: x.nrows(),
            found: y.len(),
        });
    }
    let mut perm: Vec<usize> = (0..x.nrows()).collect();
    perm.shuffle(rng);
    Ok((x.select(Axis(0), &perm), y.select(Axis(0), &perm)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // Shuffling keeps every target attached to its feature row.
    //
    // Given
    // -----
    // - 50 rows where row `i` is `(i, −i)` and `y_i = 10·i`.
    // - Several seeded permutations.
    //
    // Expect
    // ------
    // - For every output row, `x[i, 0] = −x[i, 1] = y[i] / 10`.
    // - The multiset of targets is preserved and at least one permutation
    //   moves a row.
    fn shuffle_preserves_row_correspondence() {
        // Arrange
        let n = 50;
        let x = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { i as f64 } else { -(i as f64) });
        let y = Array1::from_shape_fn(n, |i| 10.0 * i as f64);
        let mut rng = StdRng::seed_from_u64(42);
        let mut moved = false;

        for _ in 0..5 {
            // Act
            let (xs, ys) = shuffle_data(x.view(), y.view(), &mut rng).unwrap();

            // Assert
            for i in 0..n {
                assert_eq!(xs[[i, 0]], ys[i] / 10.0);
                assert_eq!(xs[[i, 1]], -xs[[i, 0]]);
            }
            let mut sorted = ys.to_vec();
            sorted.sort_by(f64::total_cmp);
            assert_eq!(sorted, y.to_vec());
            moved |= ys != y;
        }
        assert!(moved);
    }

    #[test]
    // Purpose
    // -------
    // Mismatched lengths are reported instead of panicking.
    fn shuffle_rejects_mismatched_lengths() {
        let x = Array2::<f64>::zeros((3, 2));
        let y = Array1::<f64>::zeros(4);
        let mut rng = StdRng::seed_from_u64(0);

        let err = shuffle_data(x.view(), y.view(), &mut rng).unwrap_err();

        assert_eq!(err, OptError::DimensionMismatch { what: "targets", expected: 3, found: 4 });
    }
}
