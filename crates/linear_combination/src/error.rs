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

use lincomb_observables::{ObservableError, Wires};
use thiserror::Error;

/// Validation failures of a linear combination.  None of these are transient; each is raised at
/// the point the violated precondition is detected, before any in-place state is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearCombinationError {
    #[error("number of coefficients ({coeffs}) and number of operands ({operands}) must match")]
    ShapeMismatch { coeffs: usize, operands: usize },
    #[error("operand {index} is not a valid observable: {source}")]
    InvalidOperand {
        index: usize,
        #[source]
        source: ObservableError,
    },
    #[error(
        "linear combinations can only be tensored together if they act on different sets of wires; both act on [{shared}]"
    )]
    IncompatibleWires { shared: Wires },
    #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    UnsupportedOperandType {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error(
        "can only sparsify linear combinations whose operands are tensor products of single-wire observables; term {index} is {operand}"
    )]
    SparseUnsupported { index: usize, operand: String },
    #[error("the wire order [{wire_order}] does not contain the wires [{missing}]")]
    IncompleteWireOrder { wire_order: Wires, missing: Wires },
    #[error("the wire order [{0}] contains repeated wires")]
    DuplicateWireOrder(Wires),
    #[error(
        "grouping index {index} is out of range; indices must be between 0 and the number of terms ({num_terms})"
    )]
    GroupingIndexOutOfRange { index: usize, num_terms: usize },
    #[error(
        "can only compare a linear combination against a linear combination or an observable, not '{0}'"
    )]
    UnsupportedComparisonType(&'static str),
    #[error("term {index} is not a Pauli word and cannot be grouped: {operand}")]
    NonPauliWord { index: usize, operand: String },
    #[error("coefficient {index} depends on unbound parameters: {expr}")]
    UnboundParameter { index: usize, expr: String },
    #[error(transparent)]
    Observable(#[from] ObservableError),
}
