use std::fmt;

use log::warn;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use thiserror::Error;

use crate::element::ElementKind;
use crate::solver::{self, DEFAULT_TOLERANCE};

/// Node table does not match the element's fixed layout.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisError {
    #[error(
        "{element:?} expects {expected_nodes} nodes of dimension {expected_dim}, \
         got {got_nodes} of dimension {got_dim}"
    )]
    ShapeMismatch {
        element: ElementKind,
        expected_nodes: usize,
        expected_dim: usize,
        got_nodes: usize,
        got_dim: usize,
    },
}

/// Coefficient matrix of an element's shape functions.
///
/// Row `i` holds the coefficients of shape function `i` against the
/// element's monomial terms, so that shape function `i` evaluates to 1 at
/// node `i` and 0 at every other node of the element.
pub struct ShapeFunctionBasis {
    pub element: ElementKind,
    pub coefficients: Array2<f64>,
    /// Node indices whose interpolation system was singular. The matching
    /// coefficient rows hold whatever values the solve reached and must
    /// not be trusted.
    pub singular_rows: Vec<usize>,
}

impl ShapeFunctionBasis {
    /// Build the coefficient matrix from a `num_nodes x dim` node table.
    ///
    /// A geometrically degenerate node table is not an error: the affected
    /// rows are recorded in `singular_rows` and the remaining rows are
    /// still computed.
    pub fn new(element: ElementKind, nodes: ArrayView2<f64>) -> Result<Self, BasisError> {
        Self::with_tolerance(element, nodes, DEFAULT_TOLERANCE)
    }

    /// Same as [`new`](Self::new) with an explicit pivot tolerance.
    pub fn with_tolerance(
        element: ElementKind,
        nodes: ArrayView2<f64>,
        tol: f64,
    ) -> Result<Self, BasisError> {
        let size = element.num_nodes();
        let dim = element.dim();
        if nodes.nrows() != size || nodes.ncols() != dim {
            return Err(BasisError::ShapeMismatch {
                element,
                expected_nodes: size,
                expected_dim: dim,
                got_nodes: nodes.nrows(),
                got_dim: nodes.ncols(),
            });
        }

        // Term matrix: entry (j, k) is basis term k at node j. The RHS
        // column is filled per solve below.
        let mut terms = Array2::<f64>::zeros((size, size + 1));
        for j in 0..size {
            for k in 0..size {
                terms[[j, k]] = element.term_value(nodes.row(j), k);
            }
        }

        let mut coefficients = Array2::<f64>::zeros((size, size));
        let mut singular_rows = Vec::new();
        let mut solution = Array1::<f64>::zeros(size);
        for i in 0..size {
            // Elimination consumes the augmented matrix, so each unit RHS
            // gets its own copy of the term block.
            let mut aug = terms.clone();
            for j in 0..size {
                aug[[j, size]] = if j == i { 1.0 } else { 0.0 };
            }
            if solver::solve_in_place(&mut aug, &mut solution, tol).is_err() {
                warn!("degenerate element geometry: interpolation system for node {i} is singular");
                singular_rows.push(i);
            }
            coefficients.row_mut(i).assign(&solution);
        }

        Ok(Self {
            element,
            coefficients,
            singular_rows,
        })
    }

    /// Evaluate shape function `i` at a point: coefficient row `i` dotted
    /// with the term values at `point`.
    pub fn evaluate(&self, i: usize, point: ArrayView1<f64>) -> f64 {
        assert_eq!(point.len(), self.element.dim());
        let size = self.element.num_nodes();
        let mut value = 0.0;
        for k in 0..size {
            value += self.coefficients[[i, k]] * self.element.term_value(point, k);
        }
        value
    }

    /// Whether any node's interpolation system was singular.
    pub fn is_degenerate(&self) -> bool {
        !self.singular_rows.is_empty()
    }
}

impl fmt::Display for ShapeFunctionBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.coefficients.rows() {
            for (k, value) in row.iter().enumerate() {
                if k > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn assert_kronecker(basis: &ShapeFunctionBasis, nodes: ArrayView2<f64>) {
        for i in 0..nodes.nrows() {
            for k in 0..nodes.nrows() {
                let expected = if i == k { 1.0 } else { 0.0 };
                assert_relative_eq!(
                    basis.evaluate(i, nodes.row(k)),
                    expected,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_triangle_kronecker_delta() {
        let nodes = array![[0.0, 2.0], [2.0, 0.0], [2.0, 2.0]];
        let basis = ShapeFunctionBasis::new(ElementKind::Triangle, nodes.view()).unwrap();
        assert!(!basis.is_degenerate());
        assert_kronecker(&basis, nodes.view());
    }

    #[test]
    fn test_quadrangle_corner_shape_function() {
        let nodes = array![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
        let basis = ShapeFunctionBasis::new(ElementKind::Quadrangle, nodes.view()).unwrap();
        assert!(!basis.is_degenerate());

        // Shape function of the corner at the origin: 1 there, 0 at the
        // other three corners.
        assert_relative_eq!(basis.evaluate(0, nodes.row(0)), 1.0, epsilon = 1e-12);
        for k in 1..4 {
            assert_relative_eq!(basis.evaluate(0, nodes.row(k)), 0.0, epsilon = 1e-12);
        }
        assert_kronecker(&basis, nodes.view());
    }

    #[test]
    fn test_tetrahedron_kronecker_delta() {
        let nodes = array![
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 2.0, 0.0],
            [0.0, 2.0, 2.0]
        ];
        let basis = ShapeFunctionBasis::new(ElementKind::Tetrahedron, nodes.view()).unwrap();
        assert!(!basis.is_degenerate());
        assert_kronecker(&basis, nodes.view());
    }

    #[test]
    fn test_cube_kronecker_delta() {
        // Generic, non-axis-aligned hexahedron.
        let nodes = array![
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 2.0, 0.0],
            [0.0, 2.0, 2.0],
            [2.0, 3.0, 6.0],
            [3.0, 6.0, 4.0],
            [4.0, 2.0, 0.0],
            [5.0, 3.0, 1.0]
        ];
        let basis = ShapeFunctionBasis::new(ElementKind::Cube, nodes.view()).unwrap();
        assert!(!basis.is_degenerate());
        assert_kronecker(&basis, nodes.view());
    }

    #[test]
    fn test_partition_of_unity() {
        // The interpolant of the constant 1 is exact, so the shape
        // functions sum to 1 anywhere, not just at the nodes.
        let nodes = array![[0.0, 2.0], [2.0, 0.0], [2.0, 2.0]];
        let basis = ShapeFunctionBasis::new(ElementKind::Triangle, nodes.view()).unwrap();
        let points = array![[1.5, 1.2], [0.5, 1.8], [2.0, 1.0]];
        for p in points.rows() {
            let sum: f64 = (0..3).map(|i| basis.evaluate(i, p)).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_coincident_nodes_marked_singular() {
        // Two coincident nodes repeat a row of the term matrix.
        let nodes = array![[0.0, 2.0], [0.0, 2.0], [2.0, 2.0]];
        let basis = ShapeFunctionBasis::new(ElementKind::Triangle, nodes.view()).unwrap();
        assert!(basis.is_degenerate());
        assert!(!basis.singular_rows.is_empty());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let too_many = array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let result = ShapeFunctionBasis::new(ElementKind::Triangle, too_many.view());
        assert_eq!(
            result.err(),
            Some(BasisError::ShapeMismatch {
                element: ElementKind::Triangle,
                expected_nodes: 3,
                expected_dim: 2,
                got_nodes: 4,
                got_dim: 2,
            })
        );

        let wrong_dim = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        assert!(ShapeFunctionBasis::new(ElementKind::Triangle, wrong_dim.view()).is_err());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let nodes = array![
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 2.0, 0.0],
            [0.0, 2.0, 2.0],
            [2.0, 3.0, 6.0],
            [3.0, 6.0, 4.0],
            [4.0, 2.0, 0.0],
            [5.0, 3.0, 1.0]
        ];
        let first = ShapeFunctionBasis::new(ElementKind::Cube, nodes.view()).unwrap();
        let second = ShapeFunctionBasis::new(ElementKind::Cube, nodes.view()).unwrap();
        assert_eq!(first.coefficients, second.coefficients);
    }
}
