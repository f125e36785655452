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

use std::collections::BTreeMap;
use std::ops::Add;

use lincomb_observables::util::C_ONE;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use num_traits::Zero;

/// A complex matrix in compressed sparse row format.
///
/// Within each row the column indices are strictly increasing.  Explicit zeros are never created
/// by [add][Self::add] or [scale][Self::scale], though [kron][Self::kron] of operands that contain
/// them will carry them along.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<Complex64>,
}

impl SparseMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            shape: (rows, cols),
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn identity(dim: usize) -> Self {
        Self {
            shape: (dim, dim),
            indptr: (0..=dim).collect(),
            indices: (0..dim).collect(),
            data: vec![C_ONE; dim],
        }
    }

    /// Compress a dense matrix, skipping exact zeros.
    pub fn from_dense(matrix: ArrayView2<Complex64>) -> Self {
        let (rows, cols) = matrix.dim();
        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for row in matrix.rows() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_zero() {
                    indices.push(col);
                    data.push(*value);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            shape: (rows, cols),
            indptr,
            indices,
            data,
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    /// The stored `(column, value)` pairs of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, Complex64)> + '_ {
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        self.indices[start..end]
            .iter()
            .copied()
            .zip(self.data[start..end].iter().copied())
    }

    /// The entry at `(row, col)`, zero if it is not stored.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        match self.indices[start..end].binary_search(&col) {
            Ok(offset) => self.data[start + offset],
            Err(_) => Complex64::zero(),
        }
    }

    /// The Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &SparseMatrix) -> SparseMatrix {
        let (rows_a, cols_a) = self.shape;
        let (rows_b, cols_b) = other.shape;
        let nnz = self.nnz() * other.nnz();
        let mut indptr = Vec::with_capacity(rows_a * rows_b + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0);
        for row_a in 0..rows_a {
            for row_b in 0..rows_b {
                for (col_a, value_a) in self.row(row_a) {
                    for (col_b, value_b) in other.row(row_b) {
                        indices.push(col_a * cols_b + col_b);
                        data.push(value_a * value_b);
                    }
                }
                indptr.push(indices.len());
            }
        }
        SparseMatrix {
            shape: (rows_a * rows_b, cols_a * cols_b),
            indptr,
            indices,
            data,
        }
    }

    /// Multiply every entry by `factor`.
    pub fn scale(&self, factor: Complex64) -> SparseMatrix {
        if factor.is_zero() {
            return SparseMatrix::zeros(self.shape.0, self.shape.1);
        }
        SparseMatrix {
            shape: self.shape,
            indptr: self.indptr.clone(),
            indices: self.indices.clone(),
            data: self.data.iter().map(|value| value * factor).collect(),
        }
    }

    /// Entrywise sum.  Entries that cancel exactly are not stored.
    ///
    /// # Panics
    ///
    /// If the shapes differ.
    pub fn add(&self, other: &SparseMatrix) -> SparseMatrix {
        if self.shape != other.shape {
            panic!(
                "attempt to add matrices of shape {:?} and {:?}",
                self.shape, other.shape
            );
        }
        let mut indptr = Vec::with_capacity(self.shape.0 + 1);
        let mut indices = Vec::with_capacity(self.nnz() + other.nnz());
        let mut data = Vec::with_capacity(self.nnz() + other.nnz());
        indptr.push(0);
        for row in 0..self.shape.0 {
            let mut push = |col: usize, value: Complex64| {
                if !value.is_zero() {
                    indices.push(col);
                    data.push(value);
                }
            };
            let mut left = self.row(row).peekable();
            let mut right = other.row(row).peekable();
            loop {
                match (left.peek().copied(), right.peek().copied()) {
                    (Some((lc, lv)), Some((rc, rv))) => {
                        if lc < rc {
                            push(lc, lv);
                            left.next();
                        } else if rc < lc {
                            push(rc, rv);
                            right.next();
                        } else {
                            push(lc, lv + rv);
                            left.next();
                            right.next();
                        }
                    }
                    (Some((lc, lv)), None) => {
                        push(lc, lv);
                        left.next();
                    }
                    (None, Some((rc, rv))) => {
                        push(rc, rv);
                        right.next();
                    }
                    (None, None) => break,
                }
            }
            indptr.push(indices.len());
        }
        SparseMatrix {
            shape: self.shape,
            indptr,
            indices,
            data,
        }
    }

    /// The matrix product `self · other`.
    ///
    /// # Panics
    ///
    /// If the inner dimensions differ.
    pub fn matmul(&self, other: &SparseMatrix) -> SparseMatrix {
        if self.shape.1 != other.shape.0 {
            panic!(
                "attempt to multiply matrices of shape {:?} and {:?}",
                self.shape, other.shape
            );
        }
        let mut indptr = Vec::with_capacity(self.shape.0 + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for row in 0..self.shape.0 {
            let mut accumulated = BTreeMap::<usize, Complex64>::new();
            for (inner, left) in self.row(row) {
                for (col, right) in other.row(inner) {
                    *accumulated.entry(col).or_insert_with(Complex64::zero) += left * right;
                }
            }
            for (col, value) in accumulated {
                if !value.is_zero() {
                    indices.push(col);
                    data.push(value);
                }
            }
            indptr.push(indices.len());
        }
        SparseMatrix {
            shape: (self.shape.0, other.shape.1),
            indptr,
            indices,
            data,
        }
    }

    pub fn to_dense(&self) -> Array2<Complex64> {
        let mut out = Array2::zeros(self.shape);
        for row in 0..self.shape.0 {
            for (col, value) in self.row(row) {
                out[[row, col]] = value;
            }
        }
        out
    }
}

impl Add for &SparseMatrix {
    type Output = SparseMatrix;

    fn add(self, rhs: &SparseMatrix) -> SparseMatrix {
        SparseMatrix::add(self, rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lincomb_observables::gate_matrix::{to_array, PAULI_X, PAULI_Y, PAULI_Z};
    use lincomb_observables::util::{c64, IM};
    use ndarray::linalg::kron;

    #[test]
    fn dense_round_trip() {
        let y = to_array(&PAULI_Y);
        let sparse = SparseMatrix::from_dense(y.view());
        assert_eq!(sparse.nnz(), 2);
        assert_eq!(sparse.indptr(), &[0, 1, 2]);
        assert_eq!(sparse.indices(), &[1, 0]);
        assert_eq!(sparse.get(1, 0), IM);
        assert_eq!(sparse.get(0, 0), Complex64::zero());
        assert_eq!(sparse.to_dense(), y);
    }

    #[test]
    fn kron_matches_dense() {
        let x = to_array(&PAULI_X);
        let z = to_array(&PAULI_Z);
        let sparse = SparseMatrix::from_dense(x.view())
            .kron(&SparseMatrix::identity(2))
            .kron(&SparseMatrix::from_dense(z.view()));
        assert_eq!(sparse.shape(), (8, 8));
        assert_eq!(sparse.nnz(), 8);
        assert_eq!(
            sparse.to_dense(),
            kron(&kron(&x, &Array2::eye(2)), &z)
        );
    }

    #[test]
    fn addition_drops_cancelled_entries() {
        let z = SparseMatrix::from_dense(to_array(&PAULI_Z).view());
        let id = SparseMatrix::identity(2);
        let sum = &z + &id;
        assert_eq!(sum.nnz(), 1);
        assert_eq!(sum.get(0, 0), c64(2., 0.));
        assert_eq!(z.add(&z.scale(c64(-1., 0.))).nnz(), 0);
    }

    #[test]
    fn product_of_paulis() {
        let x = SparseMatrix::from_dense(to_array(&PAULI_X).view());
        let y = SparseMatrix::from_dense(to_array(&PAULI_Y).view());
        // XY = iZ
        let xy = x.matmul(&y);
        assert_eq!(xy.to_dense(), to_array(&PAULI_Z).mapv(|v| v * IM));
        assert_eq!(x.matmul(&x), SparseMatrix::identity(2));
    }

    #[test]
    fn scaling_by_zero_empties() {
        let id = SparseMatrix::identity(4);
        assert_eq!(id.scale(Complex64::zero()), SparseMatrix::zeros(4, 4));
        assert_eq!(id.scale(c64(0.5, 0.)).get(3, 3), c64(0.5, 0.));
    }

    #[test]
    #[should_panic(expected = "attempt to add matrices")]
    fn mismatched_addition() {
        let _ = SparseMatrix::identity(2).add(&SparseMatrix::identity(4));
    }
}
