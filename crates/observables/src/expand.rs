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

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use num_traits::Zero;

use crate::error::ObservableError;
use crate::wires::Wires;

/// Find the position of each of `wires` inside `wire_order`.
pub fn wire_positions(wires: &Wires, wire_order: &Wires) -> Result<Vec<usize>, ObservableError> {
    if wire_order.has_duplicates() {
        return Err(ObservableError::DuplicateWireOrder(wire_order.clone()));
    }
    wires
        .iter()
        .map(|wire| {
            wire_order
                .index_of(wire)
                .ok_or_else(|| ObservableError::MissingWire {
                    wire: wire.clone(),
                    wire_order: wire_order.clone(),
                })
        })
        .collect()
}

/// Embed `matrix`, which acts on `wires`, into the full space spanned by `wire_order`.
///
/// The first wire of either sequence is the most significant bit of the corresponding matrix
/// index.  Wires of `wire_order` not in `wires` get the identity.
pub fn expand_matrix(
    matrix: ArrayView2<Complex64>,
    wires: &Wires,
    wire_order: &Wires,
) -> Result<Array2<Complex64>, ObservableError> {
    let positions = wire_positions(wires, wire_order)?;
    Ok(expand_by_positions(matrix, &positions, wire_order.len()))
}

/// Embed `matrix` so that its `j`th wire lands on wire number `positions[j]` of a `num_wires`-wire
/// register.  The positions must be distinct and less than `num_wires`.
pub fn expand_by_positions(
    matrix: ArrayView2<Complex64>,
    positions: &[usize],
    num_wires: usize,
) -> Array2<Complex64> {
    let num_local = positions.len();
    if num_local == num_wires && positions.iter().enumerate().all(|(i, &p)| i == p) {
        return matrix.to_owned();
    }
    let dim = 1usize << num_wires;
    let local_dim = 1usize << num_local;
    let shifts = positions
        .iter()
        .map(|position| num_wires - 1 - position)
        .collect::<Vec<_>>();
    let mask = shifts.iter().fold(0usize, |acc, shift| acc | (1 << shift));
    // `scatter[local]` is the global bit pattern of the local index `local`.
    let scatter = (0..local_dim)
        .map(|local| {
            shifts
                .iter()
                .enumerate()
                .filter(|(j, _)| local & (1 << (num_local - 1 - j)) != 0)
                .fold(0usize, |acc, (_, shift)| acc | (1 << shift))
        })
        .collect::<Vec<_>>();
    let mut out = Array2::zeros((dim, dim));
    for row in 0..dim {
        let rest = row & !mask;
        let local_row = shifts
            .iter()
            .fold(0usize, |acc, shift| (acc << 1) | ((row >> shift) & 1));
        for (local_col, &col_bits) in scatter.iter().enumerate() {
            let value = matrix[[local_row, local_col]];
            if !value.is_zero() {
                out[[row, rest | col_bits]] = value;
            }
        }
    }
    out
}
