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

use thiserror::Error;

use crate::wires::{Wire, Wires};

/// Errors from constructing or validating an observable, or from placing it on a wire order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservableError {
    #[error("`{name}` must act on at least one wire")]
    NoWires { name: &'static str },
    #[error("`{name}` acts on repeated wires [{wires}]")]
    DuplicateWires { name: &'static str, wires: Wires },
    #[error("`{name}` acts on exactly {expected} wire(s), but {got} were given")]
    WrongWireCount {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("a matrix on {wires} wire(s) must have shape ({dim}, {dim}), not ({rows}, {cols})")]
    BadMatrixShape {
        wires: usize,
        dim: usize,
        rows: usize,
        cols: usize,
    },
    #[error("the supplied matrix is not Hermitian")]
    NotHermitian,
    #[error("a tensor product must have at least one factor")]
    EmptyTensor,
    #[error("wire {wire} is not present in the wire order [{wire_order}]")]
    MissingWire { wire: Wire, wire_order: Wires },
    #[error("the wire order [{0}] contains repeated wires")]
    DuplicateWireOrder(Wires),
}
