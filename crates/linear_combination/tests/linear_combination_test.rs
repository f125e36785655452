// This code is part of Qiskit.
//
// (C) Copyright IBM 2025
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

use approx::AbsDiffEq;
use itertools::Itertools;
use lincomb_linear_combination::*;
use lincomb_observables::{Observable, PauliWord, Wires};
use ndarray::prelude::*;
use ndarray::Data;
use num_complex::Complex64;

const TOL: f64 = 1e-8;

trait AllClose {
    fn all_close<S2>(&self, rhs: &ArrayBase<S2, Ix2>, tol: f64) -> bool
    where
        S2: Data<Elem = Complex64>;
}

impl<S> AllClose for ArrayBase<S, Ix2>
where
    S: Data<Elem = Complex64>,
{
    fn all_close<S2>(&self, rhs: &ArrayBase<S2, Ix2>, tol: f64) -> bool
    where
        S2: Data<Elem = Complex64>,
    {
        self.view().abs_diff_eq(&rhs.view(), tol)
    }
}

fn x(wire: i64) -> Observable {
    Observable::pauli_x(wire)
}
fn y(wire: i64) -> Observable {
    Observable::pauli_y(wire)
}
fn z(wire: i64) -> Observable {
    Observable::pauli_z(wire)
}

/// The two-qubit H2 Hamiltonian in the STO-3G basis at the equilibrium bond length.
fn h2() -> LinearCombination {
    LinearCombination::dot(
        [
            -0.04207897647782277,
            0.17771287465139946,
            0.17771287465139946,
            -0.2427428051314046,
            0.17059738328801055,
            0.17059738328801055,
        ],
        [
            Observable::identity(0),
            z(0),
            z(1),
            z(0).tensor(&z(1)),
            x(0).tensor(&x(1)),
            y(0).tensor(&y(1)),
        ],
    )
    .unwrap()
}

#[test]
fn terms_and_rendering() {
    let lc = LinearCombination::dot(
        [0.2, -0.543],
        [
            x(0).tensor(&z(1)),
            z(0).tensor(&Observable::hadamard(2)),
        ],
    )
    .unwrap();
    let (coeffs, ops) = lc.terms();
    assert_eq!(coeffs, &[Coefficient::from(0.2), Coefficient::from(-0.543)]);
    assert_eq!(ops, &[x(0).tensor(&z(1)), z(0).tensor(&Observable::hadamard(2))]);
    assert_eq!(lc.to_string(), "  (-0.543) [Z0 H2]\n+ (0.2) [X0 Z1]");
}

#[test]
fn simplify_merges_and_prunes() {
    let mut lc = LinearCombination::dot(
        [1, 1, -2],
        [y(2), x(0).tensor(&Observable::identity(1)), x(0)],
    )
    .unwrap();
    lc.simplify();
    assert_eq!(lc.num_terms(), 2);
    assert_eq!(lc.ops(), &[y(2), x(0)]);
    assert_eq!(lc.coeffs(), &[Coefficient::from(1), Coefficient::from(-1)]);
    assert_eq!(lc.wires(), &Wires::new([0, 2]));
}

#[test]
fn qwc_grouping_at_construction() {
    let lc = LinearCombination::with_options(
        vec![1.0.into(), 2.0.into(), 3.0.into()],
        vec![x(0), x(1), z(0)],
        &BuildOptions {
            grouping: Some(("qwc".parse().unwrap(), GroupingMethod::default())),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(lc.grouping_indices(), Some(&[vec![0, 1], vec![2]][..]));
}

#[test]
fn tensor_with_shared_wire_fails() {
    let left = LinearCombination::dot([1], [x(0)]).unwrap();
    let right = LinearCombination::dot([1], [z(0)]).unwrap();
    assert!(matches!(
        apply(BinaryOp::MatMul, (&left).into(), (&right).into()),
        Err(LinearCombinationError::IncompatibleWires { .. })
    ));
}

#[test]
fn sparse_matches_dense() {
    let lc = LinearCombination::dot([1., -0.45], [z(0).tensor(&z(1)), y(0).tensor(&z(1))])
        .unwrap();
    let sparse = lc.sparse_matrix(None).unwrap();
    assert_eq!(sparse.shape(), (4, 4));
    assert!(sparse.to_dense().all_close(&lc.matrix(None).unwrap(), TOL));
}

#[test]
fn h2_matrix_entries() {
    let matrix = h2().matrix(None).unwrap();
    assert!(matrix.all_close(&matrix.t().mapv(|v| v.conj()), TOL));
    let expected_00 =
        -0.04207897647782277 + 2. * 0.17771287465139946 - 0.2427428051314046;
    assert!((matrix[[0, 0]] - Complex64::new(expected_00, 0.)).norm() < TOL);
    // XX and YY add on the single-excitation block and cancel between |00> and |11>.
    assert!((matrix[[1, 2]] - Complex64::new(2. * 0.17059738328801055, 0.)).norm() < TOL);
    assert!(matrix[[0, 3]].norm() < TOL);
    let trace = matrix.diag().sum();
    assert!((trace - Complex64::new(4. * -0.04207897647782277, 0.)).norm() < TOL);
    assert!(h2().is_hermitian());
}

#[test]
fn h2_groupings() {
    let mut lc = h2();
    lc.compute_grouping(GroupingType::Commuting, GroupingMethod::Rlf)
        .unwrap();
    assert_eq!(
        lc.grouping_indices(),
        Some(&[vec![0, 1, 2, 3], vec![4, 5]][..])
    );
    for method in [GroupingMethod::Lf, GroupingMethod::Rlf] {
        lc.compute_grouping(GroupingType::Qwc, method).unwrap();
        let groups = lc.grouping_indices().unwrap().to_vec();
        assert_eq!(groups.len(), 3);
        for group in &groups {
            for (a, b) in group.iter().tuple_combinations() {
                let left = PauliWord::from_observable(&lc.ops()[*a]).unwrap();
                let right = PauliWord::from_observable(&lc.ops()[*b]).unwrap();
                assert!(left.qubit_wise_commutes(&right));
            }
        }
    }
}

#[test]
fn h2_sparse_agrees_with_dense_under_any_order() {
    let lc = h2();
    for order in [Wires::new([0, 1]), Wires::new([1, 0])] {
        let dense = lc.matrix(Some(&order)).unwrap();
        let sparse = lc.sparse_matrix_with_batch_size(Some(&order), 2).unwrap();
        assert!(sparse.to_dense().all_close(&dense, TOL));
    }
}

#[test]
fn arithmetic_round_trip() {
    let lc = h2();
    let doubled = apply(BinaryOp::Add, (&lc).into(), (&lc).into()).unwrap();
    assert!(doubled.compare((&(&lc * 2.)).into()).unwrap());
    let nothing = apply(BinaryOp::Sub, (&lc).into(), (&lc).into()).unwrap();
    assert!(nothing.is_empty());
    let negated = -&lc;
    assert!((&negated + &lc).is_empty());
}

#[test]
fn tensor_with_an_ancilla() {
    let ancilla = LinearCombination::dot([0.5], [x(2)]).unwrap();
    let product = apply(BinaryOp::MatMul, (&h2()).into(), (&ancilla).into()).unwrap();
    assert_eq!(product.num_terms(), 6);
    assert_eq!(product.wires(), &Wires::new([0, 1, 2]));
    let expected = ndarray::linalg::kron(
        &h2().matrix(None).unwrap(),
        &ancilla.matrix(None).unwrap(),
    );
    assert!(product.matrix(None).unwrap().all_close(&expected, TOL));
}

#[test]
fn repr_and_labels() {
    let lc = LinearCombination::dot([1., 1.], [x(0), Observable::pauli_z("a")]).unwrap();
    assert_eq!(lc.repr(), "<LinearCombination: terms=2, wires=[0, 'a']>");
}
