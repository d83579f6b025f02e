use ndarray::ArrayView1;

/// Supported element topologies, each with a fixed node count and a fixed
/// monomial interpolation basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Triangle,
    Quadrangle,
    Tetrahedron,
    Cube,
}

impl ElementKind {
    /// Number of nodes, which is also the number of basis terms.
    pub const fn num_nodes(self) -> usize {
        match self {
            ElementKind::Triangle => 3,
            ElementKind::Quadrangle | ElementKind::Tetrahedron => 4,
            ElementKind::Cube => 8,
        }
    }

    /// Spatial dimension of the node coordinates.
    pub const fn dim(self) -> usize {
        match self {
            ElementKind::Triangle | ElementKind::Quadrangle => 2,
            ElementKind::Tetrahedron | ElementKind::Cube => 3,
        }
    }

    /// Evaluate monomial term `k` of this element's basis at `coords`.
    ///
    /// The term order is fixed; coefficient rows produced elsewhere in the
    /// crate are expressed against it.
    pub fn term_value(self, coords: ArrayView1<f64>, k: usize) -> f64 {
        let (x, y) = (coords[0], coords[1]);
        match self {
            ElementKind::Triangle => match k {
                0 => 1.0,
                1 => x,
                2 => y,
                _ => panic!("term index {k} out of range for {self:?}"),
            },
            ElementKind::Quadrangle => match k {
                0 => 1.0,
                1 => x,
                2 => y,
                3 => x * y,
                _ => panic!("term index {k} out of range for {self:?}"),
            },
            ElementKind::Tetrahedron => {
                let z = coords[2];
                match k {
                    0 => 1.0,
                    1 => x,
                    2 => y,
                    3 => z,
                    _ => panic!("term index {k} out of range for {self:?}"),
                }
            }
            ElementKind::Cube => {
                let z = coords[2];
                match k {
                    0 => 1.0,
                    1 => x,
                    2 => y,
                    3 => z,
                    4 => x * y,
                    5 => y * z,
                    6 => z * x,
                    7 => x * y * z,
                    _ => panic!("term index {k} out of range for {self:?}"),
                }
            }
        }
    }
}
