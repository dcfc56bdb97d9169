#![allow(non_snake_case)]

use clarabel_model::prelude::*;

fn identity(n: usize) -> SparseMatrix {
    SparseMatrix::new(n, n, (0..=n).collect(), (0..n).collect(), vec![1.; n]).unwrap()
}

fn eq_constrained_A1() -> SparseMatrix {
    // A =
    //[ 0. 1.  1.;
    //  0. 1. -1.]
    SparseMatrix::new(
        2,                     // m
        3,                     // n
        vec![0, 0, 2, 4],      //colptr
        vec![0, 1, 0, 1],      //rowval
        vec![1., 1., 1., -1.], //nzval
    )
    .unwrap()
}

fn eq_constrained_A2() -> SparseMatrix {
    // A = [
    // 0    1.0   1.0;
    // 0    1.0  -1.0;
    //1.0   2.0  -1.0l
    //2.0  -1.0   3.0l
    //]
    SparseMatrix::new(
        4,                                               // m
        3,                                               // n
        vec![0, 2, 6, 10],                               //colptr
        vec![2, 3, 0, 1, 2, 3, 0, 1, 2, 3],              //rowval
        vec![1., 2., 1., 1., 2., -1., 1., -1., -1., 3.], //nzval
    )
    .unwrap()
}

#[test]
fn test_eq_constrained_feasible() {
    let P = identity(3);
    let A = eq_constrained_A1(); // <- two constraints
    let b = [2., 0.];
    let cones = [ZeroConeT(2)];

    let mut model = Model::new();
    model.setup_without_linear_cost(&P, &A, &b, &cones).unwrap();

    assert_eq!(model.optimize().unwrap(), SolverStatus::Solved);

    let refsol = [0., 1., 1.];
    let x = model.x().unwrap();
    assert!(x.iter().zip(refsol).all(|(a, b)| (a - b).abs() <= 1e-6));
}

#[test]
fn test_eq_constrained_primal_infeasible() {
    let P = identity(3);
    let A = eq_constrained_A2(); // <- 4 constraints, 3 vars
    let b = [1.; 4];
    let cones = [ZeroConeT(4)];

    let mut model = Model::new();
    model.setup_without_linear_cost(&P, &A, &b, &cones).unwrap();

    assert_eq!(model.optimize().unwrap(), SolverStatus::PrimalInfeasible);
}
