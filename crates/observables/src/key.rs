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

//! Order-independent identity keys for operands.
//!
//! Two operands are structurally equal when the multisets of their non-identity factors agree,
//! where each factor is identified by its name, its wires and its stringified parameters.  The
//! order in which the factors of a tensor product were written does not matter, and an atomic
//! observable is interchangeable with a tensor product holding only that factor.

use smallvec::SmallVec;

use crate::observable::{AtomicObservable, Observable};
use crate::wires::Wires;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomicKey {
    pub name: &'static str,
    pub wires: Wires,
    pub parameters: Vec<String>,
}

impl From<&AtomicObservable> for AtomicKey {
    fn from(value: &AtomicObservable) -> Self {
        Self {
            name: value.name(),
            wires: value.wires().clone(),
            parameters: value.parameters(),
        }
    }
}

/// Sorted multiset of the [AtomicKey]s of an operand's non-identity factors.
///
/// Every pure-identity operand has the empty key, whatever wires it was written on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservableKey(SmallVec<[AtomicKey; 4]>);

impl ObservableKey {
    #[inline]
    pub fn factors(&self) -> &[AtomicKey] {
        &self.0
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn identity_key(operand: &Observable) -> ObservableKey {
    let mut keys = operand
        .non_identity_factors()
        .map(AtomicKey::from)
        .collect::<SmallVec<[_; 4]>>();
    keys.sort_unstable();
    ObservableKey(keys)
}

#[inline]
pub fn structurally_equal(left: &Observable, right: &Observable) -> bool {
    identity_key(left) == identity_key(right)
}
