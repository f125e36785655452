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

use hashbrown::HashMap;
use lincomb_observables::expand::{expand_by_positions, wire_positions};
use lincomb_observables::{Observable, Wire, Wires};
use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::LinearCombinationError;
use crate::sparse::SparseMatrix;
use crate::store::LinearCombination;
use crate::{getenv_use_multiple_threads, DEFAULT_SPARSE_BATCH_SIZE, PARALLEL_THRESHOLD};

impl LinearCombination {
    /// The dense `2^n x 2^n` matrix of the sum over `wire_order` (default: [wires][Self::wires]).
    /// The first wire of the order is the most significant bit of the matrix index.
    pub fn matrix(
        &self,
        wire_order: Option<&Wires>,
    ) -> Result<Array2<Complex64>, LinearCombinationError> {
        let wire_order = self.resolve_wire_order(wire_order)?;
        let coeffs = self.concrete_coeffs()?;
        let num_wires = wire_order.len();
        let dim = 1usize << num_wires;
        let term_matrix = |(coeff, op): (&Complex64, &Observable)| {
            let positions = wire_positions(&op.wires(), &wire_order)?;
            Ok::<_, LinearCombinationError>(
                expand_by_positions(op.matrix().view(), &positions, num_wires)
                    .mapv_into(|value| value * coeff),
            )
        };
        let parallel = self.num_terms() >= PARALLEL_THRESHOLD && getenv_use_multiple_threads();
        debug!(
            num_terms = self.num_terms(),
            num_wires, parallel, "assembling dense matrix"
        );
        if parallel {
            coeffs
                .par_iter()
                .zip(self.ops().par_iter())
                .map(term_matrix)
                .try_reduce(|| Array2::zeros((dim, dim)), |acc, next| Ok(acc + next))
        } else {
            coeffs
                .iter()
                .zip(self.ops())
                .map(term_matrix)
                .try_fold(Array2::zeros((dim, dim)), |acc, next| Ok(acc + next?))
        }
    }

    /// The sparse matrix of the sum, using the default batch size.
    pub fn sparse_matrix(
        &self,
        wire_order: Option<&Wires>,
    ) -> Result<SparseMatrix, LinearCombinationError> {
        self.sparse_matrix_with_batch_size(wire_order, DEFAULT_SPARSE_BATCH_SIZE)
    }

    /// The sparse matrix of the sum, summing the per-term matrices `batch_size` at a time.
    ///
    /// Every operand must be a product of single-wire factors.  Identity factors are treated as
    /// absent, and each maximal run of wires without a factor is filled by a single identity block.
    pub fn sparse_matrix_with_batch_size(
        &self,
        wire_order: Option<&Wires>,
        batch_size: usize,
    ) -> Result<SparseMatrix, LinearCombinationError> {
        let wire_order = self.resolve_wire_order(wire_order)?;
        let coeffs = self.concrete_coeffs()?;
        let batch_size = batch_size.max(1);
        let dim = 1usize << wire_order.len();
        debug!(
            num_terms = self.num_terms(),
            num_wires = wire_order.len(),
            batch_size,
            "assembling sparse matrix"
        );
        let mut total = SparseMatrix::zeros(dim, dim);
        let mut batch = Vec::with_capacity(batch_size.min(self.num_terms()));
        for (index, (coeff, op)) in coeffs.iter().zip(self.ops()).enumerate() {
            batch.push(term_sparse_matrix(index, op, &wire_order)?.scale(*coeff));
            if batch.len() == batch_size {
                total = flush(total, &mut batch);
                trace!(terms_done = index + 1, nnz = total.nnz(), "flushed sparse batch");
            }
        }
        Ok(flush(total, &mut batch))
    }

    fn resolve_wire_order(
        &self,
        wire_order: Option<&Wires>,
    ) -> Result<Wires, LinearCombinationError> {
        let Some(wire_order) = wire_order else {
            return Ok(self.wires().clone());
        };
        if wire_order.has_duplicates() {
            return Err(LinearCombinationError::DuplicateWireOrder(
                wire_order.clone(),
            ));
        }
        let missing = self.wires().difference(wire_order);
        if !missing.is_empty() {
            return Err(LinearCombinationError::IncompleteWireOrder {
                wire_order: wire_order.clone(),
                missing,
            });
        }
        Ok(wire_order.clone())
    }

    fn concrete_coeffs(&self) -> Result<Vec<Complex64>, LinearCombinationError> {
        self.coeffs()
            .iter()
            .enumerate()
            .map(|(index, coeff)| {
                coeff
                    .value()
                    .ok_or_else(|| LinearCombinationError::UnboundParameter {
                        index,
                        expr: coeff.to_string(),
                    })
            })
            .collect()
    }
}

fn flush(total: SparseMatrix, batch: &mut Vec<SparseMatrix>) -> SparseMatrix {
    batch
        .drain(..)
        .fold(total, |acc, next| acc.add(&next))
}

/// The sparse matrix of a single operand over the whole of `wire_order`.
fn term_sparse_matrix(
    index: usize,
    op: &Observable,
    wire_order: &Wires,
) -> Result<SparseMatrix, LinearCombinationError> {
    let mut per_wire: HashMap<&Wire, SparseMatrix> = HashMap::new();
    for factor in op.factors() {
        let wire = match factor.wires().as_slice() {
            [wire] => wire,
            _ => {
                return Err(LinearCombinationError::SparseUnsupported {
                    index,
                    operand: op.to_string(),
                })
            }
        };
        if factor.is_identity() {
            continue;
        }
        let local = SparseMatrix::from_dense(factor.matrix().view());
        let combined = match per_wire.remove(wire) {
            Some(previous) => previous.matmul(&local),
            None => local,
        };
        per_wire.insert(wire, combined);
    }
    let mut blocks = Vec::new();
    let mut identity_run = 0;
    for wire in wire_order {
        match per_wire.remove(wire) {
            Some(local) => {
                if identity_run > 0 {
                    blocks.push(SparseMatrix::identity(1 << identity_run));
                    identity_run = 0;
                }
                blocks.push(local);
            }
            None => identity_run += 1,
        }
    }
    if identity_run > 0 {
        blocks.push(SparseMatrix::identity(1 << identity_run));
    }
    Ok(blocks
        .into_iter()
        .reduce(|acc, next| acc.kron(&next))
        .unwrap_or_else(|| SparseMatrix::identity(1)))
}
