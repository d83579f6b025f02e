pub mod basis;
pub mod element;
pub mod solver;

pub use basis::{BasisError, ShapeFunctionBasis};
pub use element::ElementKind;
pub use solver::SingularSystem;
