use element_basis::{ElementKind, ShapeFunctionBasis};
use ndarray::{ArrayView2, array};

fn report(name: &str, element: ElementKind, nodes: ArrayView2<f64>) {
    println!("{name} nodes:\n{nodes}");
    match ShapeFunctionBasis::new(element, nodes) {
        Ok(basis) => {
            if basis.is_degenerate() {
                println!("singular rows: {:?}", basis.singular_rows);
            }
            println!("coefficients:\n{basis}");
        }
        Err(err) => eprintln!("{name}: {err}"),
    }
}

fn main() {
    env_logger::init();

    let triangle = array![[0.0, 2.0], [2.0, 0.0], [2.0, 2.0]];
    report("triangle", ElementKind::Triangle, triangle.view());

    let quadrangle = array![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
    report("quadrangle", ElementKind::Quadrangle, quadrangle.view());

    let tetrahedron = array![
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [2.0, 2.0, 0.0],
        [0.0, 2.0, 2.0]
    ];
    report("tetrahedron", ElementKind::Tetrahedron, tetrahedron.view());

    let cube = array![
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [2.0, 2.0, 0.0],
        [0.0, 2.0, 2.0],
        [2.0, 3.0, 6.0],
        [3.0, 6.0, 4.0],
        [4.0, 2.0, 0.0],
        [5.0, 3.0, 1.0]
    ];
    report("cube", ElementKind::Cube, cube.view());
}
