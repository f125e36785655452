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

use ahash::RandomState;
use indexmap::{map::Entry, IndexMap};
use lincomb_observables::{identity_key, Observable, ObservableKey};
use tracing::debug;

use crate::coefficient::Coefficient;
use crate::store::LinearCombination;
use crate::DEFAULT_ATOL;

/// Combine terms whose operands are structurally equal (ignoring identity factors), summing their
/// coefficients and dropping every concrete coefficient within `atol` of zero.
///
/// The output keeps the order in which each distinct operand first appeared.  The representative
/// operand of each group is the pruned form of its first occurrence.
pub fn simplify_terms(
    coeffs: &[Coefficient],
    ops: &[Observable],
    atol: f64,
) -> (Vec<Coefficient>, Vec<Observable>) {
    let mut table: IndexMap<ObservableKey, (Coefficient, Observable), RandomState> =
        IndexMap::with_capacity_and_hasher(ops.len(), RandomState::default());
    for (coeff, op) in coeffs.iter().zip(ops) {
        match table.entry(identity_key(op)) {
            Entry::Occupied(mut entry) => {
                let slot = &mut entry.get_mut().0;
                *slot = &*slot + coeff;
            }
            Entry::Vacant(entry) => {
                entry.insert((coeff.clone(), op.prune()));
            }
        }
    }
    table
        .into_values()
        .filter(|(coeff, _)| !coeff.is_close_to_zero(atol))
        .unzip()
}

impl LinearCombination {
    /// Combine like terms in place.  This always discards the grouping cache.
    pub fn simplify(&mut self) -> &mut Self {
        let before = self.num_terms();
        let (coeffs, ops) = simplify_terms(self.coeffs(), self.ops(), DEFAULT_ATOL);
        debug!(before, after = coeffs.len(), "simplified linear combination");
        self.replace_terms(coeffs, ops);
        self
    }

    /// A simplified copy, leaving `self` untouched.
    pub fn simplified(&self) -> LinearCombination {
        let mut out = self.clone();
        out.simplify();
        out
    }
}
