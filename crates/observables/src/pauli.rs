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
use std::fmt;

use itertools::{EitherOrBoth, Itertools};

use crate::observable::{Observable, ObservableKind};
use crate::wires::Wire;

/// A non-identity single-wire Pauli letter.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    /// Symplectic `(x, z)` components.
    #[inline]
    pub fn xz(self) -> (bool, bool) {
        match self {
            Self::X => (true, false),
            Self::Y => (true, true),
            Self::Z => (false, true),
        }
    }

    #[inline]
    pub fn from_xz(x: bool, z: bool) -> Option<Self> {
        match (x, z) {
            (false, false) => None,
            (true, false) => Some(Self::X),
            (true, true) => Some(Self::Y),
            (false, true) => Some(Self::Z),
        }
    }

    /// Product of two letters on the same wire, dropping the phase.
    #[inline]
    pub fn compose(self, other: Option<Self>) -> Option<Self> {
        let (x, z) = self.xz();
        let (ox, oz) = other.map(Pauli::xz).unwrap_or((false, false));
        Self::from_xz(x ^ ox, z ^ oz)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// A Pauli string stored sparsely by wire; wires carrying the identity are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PauliWord(BTreeMap<Wire, Pauli>);

impl PauliWord {
    /// Convert an operand into a phaseless Pauli word.  Factors on the same wire are composed.
    ///
    /// Returns `None` if any factor is not a Pauli or an identity.
    pub fn from_observable(operand: &Observable) -> Option<PauliWord> {
        let mut letters = BTreeMap::new();
        for factor in operand.factors() {
            let pauli = match factor.kind() {
                ObservableKind::Identity => continue,
                ObservableKind::PauliX => Pauli::X,
                ObservableKind::PauliY => Pauli::Y,
                ObservableKind::PauliZ => Pauli::Z,
                ObservableKind::Hadamard | ObservableKind::Hermitian(_) => return None,
            };
            let wire = factor.wires().first()?.clone();
            match pauli.compose(letters.get(&wire).copied()) {
                Some(letter) => letters.insert(wire, letter),
                None => letters.remove(&wire),
            };
        }
        Some(PauliWord(letters))
    }

    #[inline]
    pub fn get(&self, wire: &Wire) -> Option<Pauli> {
        self.0.get(wire).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Wire, Pauli)> + '_ {
        self.0.iter().map(|(wire, pauli)| (wire, *pauli))
    }

    /// The number of wires on which both words carry different non-identity letters.
    fn num_anticommuting_positions(&self, other: &PauliWord) -> usize {
        self.0
            .iter()
            .merge_join_by(other.0.iter(), |(left, _), (right, _)| left.cmp(right))
            .filter(|pair| match pair {
                EitherOrBoth::Both((_, left), (_, right)) => left != right,
                _ => false,
            })
            .count()
    }

    /// Whether the two words commute letter by letter on every shared wire.
    pub fn qubit_wise_commutes(&self, other: &PauliWord) -> bool {
        self.num_anticommuting_positions(other) == 0
    }

    pub fn commutes(&self, other: &PauliWord) -> bool {
        self.num_anticommuting_positions(other) % 2 == 0
    }

    pub fn anticommutes(&self, other: &PauliWord) -> bool {
        !self.commutes(other)
    }
}

impl fmt::Display for PauliWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "I");
        }
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|(wire, pauli)| format!("{}{}", pauli.label(), wire))
                .join(" ")
        )
    }
}
