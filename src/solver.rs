use ndarray::{Array1, Array2};
use thiserror::Error;

/// Default pivot tolerance for elimination and back substitution.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-10;

/// A pivot or final diagonal entry was zero within tolerance.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("linear system is singular or nearly singular")]
pub struct SingularSystem;

/// Solve an n x (n+1) augmented system by forward elimination and back
/// substitution, writing the result into `solution`.
///
/// The augmented matrix is overwritten by the elimination, so every solve
/// needs a fresh copy. When a diagonal entry falls below `tol` during
/// elimination that pivot row is skipped rather than swapped; this is not
/// partial pivoting and can mishandle ill-conditioned systems that a row
/// exchange would rescue.
///
/// On `SingularSystem` the solution vector may hold partially computed
/// values for the rows reached before the failure.
pub fn solve_in_place(
    aug: &mut Array2<f64>,
    solution: &mut Array1<f64>,
    tol: f64,
) -> Result<(), SingularSystem> {
    let n = solution.len();
    assert!(n > 0, "empty system");
    assert_eq!(aug.nrows(), n);
    assert_eq!(aug.ncols(), n + 1);

    for i in 0..n - 1 {
        if aug[[i, i]].abs() < tol {
            continue;
        }
        for j in (i + 1)..n {
            let factor = aug[[j, i]];
            if factor.abs() < tol {
                continue;
            }
            for k in i..=n {
                aug[[j, k]] -= factor * aug[[i, k]] / aug[[i, i]];
            }
        }
    }

    if aug[[n - 1, n - 1]].abs() < tol {
        return Err(SingularSystem);
    }
    solution[n - 1] = aug[[n - 1, n]] / aug[[n - 1, n - 1]];
    for i in (0..n - 1).rev() {
        let mut sum = aug[[i, n]];
        for k in (i + 1)..n {
            sum -= solution[k] * aug[[i, k]];
        }
        if aug[[i, i]].abs() < tol {
            return Err(SingularSystem);
        }
        solution[i] = sum / aug[[i, i]];
    }
    Ok(())
}
