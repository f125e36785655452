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

use std::fmt;
use std::sync::Arc;

use approx::AbsDiffEq;
use hashbrown::HashMap;
use itertools::Itertools;
use ndarray::linalg::kron;
use ndarray::Array2;
use num_complex::Complex64;
use smallvec::SmallVec;

use crate::error::ObservableError;
use crate::expand::expand_by_positions;
use crate::gate_matrix::{self, HADAMARD, PAULI_X, PAULI_Y, PAULI_Z};
use crate::util::{GateArray1Q, HERMITIAN_ATOL};
use crate::wires::{Wire, Wires};

/// The type of a single (non-composite) observable.
#[derive(Clone, Debug, PartialEq)]
pub enum ObservableKind {
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    /// The identity on any number of wires.
    Identity,
    /// A user-supplied Hermitian matrix on `k` wires, of shape `(2^k, 2^k)`.
    Hermitian(Arc<Array2<Complex64>>),
}

impl ObservableKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PauliX => "PauliX",
            Self::PauliY => "PauliY",
            Self::PauliZ => "PauliZ",
            Self::Hadamard => "Hadamard",
            Self::Identity => "Identity",
            Self::Hermitian(_) => "Hermitian",
        }
    }

    /// Short label used in the string rendering of a linear combination.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PauliX => "X",
            Self::PauliY => "Y",
            Self::PauliZ => "Z",
            Self::Hadamard => "H",
            Self::Identity => "I",
            Self::Hermitian(_) => "Hermitian",
        }
    }

    /// The number of wires this kind must act on, if it is fixed.
    pub fn num_wires(&self) -> Option<usize> {
        match self {
            Self::PauliX | Self::PauliY | Self::PauliZ | Self::Hadamard => Some(1),
            Self::Identity | Self::Hermitian(_) => None,
        }
    }

    /// The fixed single-wire matrix of this kind, if it has one.
    pub fn gate_array(&self) -> Option<&'static GateArray1Q> {
        match self {
            Self::PauliX => Some(&PAULI_X),
            Self::PauliY => Some(&PAULI_Y),
            Self::PauliZ => Some(&PAULI_Z),
            Self::Hadamard => Some(&HADAMARD),
            Self::Identity | Self::Hermitian(_) => None,
        }
    }

    /// Immutable, stringified parameters.  Only `Hermitian` carries any.
    pub fn parameters(&self) -> Vec<String> {
        match self {
            Self::Hermitian(matrix) => vec![format!(
                "[{}]",
                matrix
                    .rows()
                    .into_iter()
                    .map(|row| row.iter().map(|value| format!("{}", value)).join(" "))
                    .join("; ")
            )],
            _ => Vec::new(),
        }
    }
}

/// A single named observable acting on an ordered list of wires.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomicObservable {
    kind: ObservableKind,
    wires: Wires,
}

impl AtomicObservable {
    /// Create a new observable, checking that the wires and any matrix are consistent.
    pub fn new(kind: ObservableKind, wires: Wires) -> Result<Self, ObservableError> {
        let out = Self::new_unchecked(kind, wires);
        out.validate()?;
        Ok(out)
    }

    /// Create a new observable without any checks.  Call [validate][Self::validate] before
    /// relying on the result.
    #[inline]
    pub fn new_unchecked(kind: ObservableKind, wires: Wires) -> Self {
        Self { kind, wires }
    }

    pub fn validate(&self) -> Result<(), ObservableError> {
        let name = self.kind.name();
        if self.wires.is_empty() {
            return Err(ObservableError::NoWires { name });
        }
        if self.wires.has_duplicates() {
            return Err(ObservableError::DuplicateWires {
                name,
                wires: self.wires.clone(),
            });
        }
        if let Some(expected) = self.kind.num_wires() {
            if expected != self.wires.len() {
                return Err(ObservableError::WrongWireCount {
                    name,
                    expected,
                    got: self.wires.len(),
                });
            }
        }
        if let ObservableKind::Hermitian(matrix) = &self.kind {
            let dim = 1usize << self.wires.len();
            let (rows, cols) = matrix.dim();
            if rows != dim || cols != dim {
                return Err(ObservableError::BadMatrixShape {
                    wires: self.wires.len(),
                    dim,
                    rows,
                    cols,
                });
            }
            let adjoint = matrix.t().mapv(|value| value.conj());
            if !matrix.abs_diff_eq(&adjoint, HERMITIAN_ATOL) {
                return Err(ObservableError::NotHermitian);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn kind(&self) -> &ObservableKind {
        &self.kind
    }

    #[inline]
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self.kind, ObservableKind::Identity)
    }

    pub fn parameters(&self) -> Vec<String> {
        self.kind.parameters()
    }

    /// Dense matrix of this observable on its own wires.
    pub fn matrix(&self) -> Array2<Complex64> {
        match &self.kind {
            ObservableKind::Identity => gate_matrix::identity(self.wires.len()),
            ObservableKind::Hermitian(matrix) => matrix.as_ref().clone(),
            kind => kind
                .gate_array()
                .map(gate_matrix::to_array)
                .unwrap_or_else(|| gate_matrix::identity(self.wires.len())),
        }
    }

    pub fn map_wires(&self, wire_map: &HashMap<Wire, Wire>) -> Self {
        Self {
            kind: self.kind.clone(),
            wires: self.wires.map(wire_map),
        }
    }
}

impl fmt::Display for AtomicObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.label(), self.wires)
    }
}

/// A tensor product of atomic observables.  Factors may act on overlapping wires, in which case
/// the product is the ordinary operator product taken left to right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tensor {
    factors: SmallVec<[AtomicObservable; 4]>,
}

impl Tensor {
    pub fn new<I>(factors: I) -> Result<Self, ObservableError>
    where
        I: IntoIterator<Item = AtomicObservable>,
    {
        let out = Self::new_unchecked(factors);
        out.validate()?;
        Ok(out)
    }

    pub fn new_unchecked<I>(factors: I) -> Self
    where
        I: IntoIterator<Item = AtomicObservable>,
    {
        Self {
            factors: factors.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ObservableError> {
        if self.factors.is_empty() {
            return Err(ObservableError::EmptyTensor);
        }
        self.factors.iter().try_for_each(AtomicObservable::validate)
    }

    #[inline]
    pub fn factors(&self) -> &[AtomicObservable] {
        &self.factors
    }
}

/// An operand of a linear combination: either a single observable or a tensor product of them.
#[derive(Clone, Debug, PartialEq)]
pub enum Observable {
    Atomic(AtomicObservable),
    Tensor(Tensor),
}

impl Observable {
    #[inline]
    fn single(kind: ObservableKind, wire: Wire) -> Self {
        Self::Atomic(AtomicObservable::new_unchecked(kind, Wires::new([wire])))
    }

    pub fn pauli_x(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::PauliX, wire.into())
    }

    pub fn pauli_y(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::PauliY, wire.into())
    }

    pub fn pauli_z(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::PauliZ, wire.into())
    }

    pub fn hadamard(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::Hadamard, wire.into())
    }

    pub fn identity(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::Identity, wire.into())
    }

    /// A Hermitian observable given by an explicit matrix.  The matrix is checked for shape and
    /// Hermiticity.
    pub fn hermitian(matrix: Array2<Complex64>, wires: Wires) -> Result<Self, ObservableError> {
        AtomicObservable::new(ObservableKind::Hermitian(Arc::new(matrix)), wires).map(Self::Atomic)
    }

    /// Build a tensor product from explicit factors.
    pub fn from_factors<I>(factors: I) -> Result<Self, ObservableError>
    where
        I: IntoIterator<Item = AtomicObservable>,
    {
        Tensor::new(factors).map(Self::Tensor)
    }

    /// The tensor product `self @ other`.  Nested products are flattened.
    pub fn tensor(&self, other: &Observable) -> Observable {
        Observable::Tensor(Tensor::new_unchecked(
            self.factors().iter().chain(other.factors()).cloned(),
        ))
    }

    /// The atomic constituents, in order.  An atomic observable is its own single factor.
    pub fn factors(&self) -> &[AtomicObservable] {
        match self {
            Self::Atomic(atomic) => ::std::slice::from_ref(atomic),
            Self::Tensor(tensor) => tensor.factors(),
        }
    }

    pub fn non_identity_factors(&self) -> impl Iterator<Item = &AtomicObservable> + '_ {
        self.factors().iter().filter(|factor| !factor.is_identity())
    }

    pub fn name(&self) -> String {
        match self {
            Self::Atomic(atomic) => atomic.name().to_owned(),
            Self::Tensor(tensor) => tensor.factors().iter().map(|f| f.name()).join(" @ "),
        }
    }

    /// The order-preserving union of the wires of every factor.
    pub fn wires(&self) -> Wires {
        match self {
            Self::Atomic(atomic) => atomic.wires().clone(),
            Self::Tensor(tensor) => {
                Wires::all_wires(tensor.factors().iter().map(AtomicObservable::wires), false)
            }
        }
    }

    pub fn parameters(&self) -> Vec<String> {
        self.factors()
            .iter()
            .flat_map(AtomicObservable::parameters)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ObservableError> {
        match self {
            Self::Atomic(atomic) => atomic.validate(),
            Self::Tensor(tensor) => tensor.validate(),
        }
    }

    /// Whether no two factors share a wire.
    pub fn has_disjoint_factors(&self) -> bool {
        let total: usize = self.factors().iter().map(|f| f.wires().len()).sum();
        total == self.wires().len()
    }

    /// Dense matrix of this observable on its own [wires][Self::wires].
    pub fn matrix(&self) -> Array2<Complex64> {
        match self {
            Self::Atomic(atomic) => atomic.matrix(),
            Self::Tensor(tensor) => {
                if self.has_disjoint_factors() {
                    return tensor
                        .factors()
                        .iter()
                        .map(AtomicObservable::matrix)
                        .reduce(|acc, next| kron(&acc, &next))
                        .unwrap_or_else(|| gate_matrix::identity(0));
                }
                let wires = self.wires();
                tensor
                    .factors()
                    .iter()
                    .map(|factor| {
                        let positions = factor
                            .wires()
                            .iter()
                            .filter_map(|wire| wires.index_of(wire))
                            .collect::<Vec<_>>();
                        expand_by_positions(factor.matrix().view(), &positions, wires.len())
                    })
                    .reduce(|acc, next| acc.dot(&next))
                    .unwrap_or_else(|| gate_matrix::identity(wires.len()))
            }
        }
    }

    pub fn is_hermitian(&self) -> bool {
        if self.has_disjoint_factors() {
            return true;
        }
        let matrix = self.matrix();
        let adjoint = matrix.t().mapv(|value| value.conj());
        matrix.abs_diff_eq(&adjoint, HERMITIAN_ATOL)
    }

    /// Remove identity factors.
    ///
    /// A product of identities prunes to the identity on its first wire, and a product with a
    /// single remaining factor prunes to that factor.
    pub fn prune(&self) -> Observable {
        let Self::Tensor(tensor) = self else {
            return self.clone();
        };
        let mut kept = self.non_identity_factors().cloned().collect::<SmallVec<[_; 4]>>();
        match kept.len() {
            0 => match tensor.factors().first() {
                Some(first) => {
                    let wire = first.wires().first().cloned();
                    match wire {
                        Some(wire) => Self::identity(wire),
                        None => self.clone(),
                    }
                }
                None => self.clone(),
            },
            1 => Self::Atomic(kept.remove(0)),
            _ => Self::Tensor(Tensor { factors: kept }),
        }
    }

    pub fn map_wires(&self, wire_map: &HashMap<Wire, Wire>) -> Observable {
        match self {
            Self::Atomic(atomic) => Self::Atomic(atomic.map_wires(wire_map)),
            Self::Tensor(tensor) => Self::Tensor(Tensor {
                factors: tensor
                    .factors()
                    .iter()
                    .map(|factor| factor.map_wires(wire_map))
                    .collect(),
            }),
        }
    }
}

impl From<AtomicObservable> for Observable {
    fn from(value: AtomicObservable) -> Self {
        Self::Atomic(value)
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.factors().iter().join(" "))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::{C_ONE, C_ZERO, IM};
    use approx::abs_diff_eq;
    use ndarray::array;

    #[test]
    fn display_matches_term_rendering() {
        let op = Observable::pauli_z(0).tensor(&Observable::hadamard(2));
        assert_eq!(op.to_string(), "Z0 H2");
        let herm = Observable::hermitian(
            array![
                [C_ONE, C_ZERO, C_ZERO, C_ZERO],
                [C_ZERO, C_ONE, C_ZERO, C_ZERO],
                [C_ZERO, C_ZERO, C_ONE, C_ZERO],
                [C_ZERO, C_ZERO, C_ZERO, C_ONE],
            ],
            Wires::new([0, 1]),
        )
        .unwrap();
        assert_eq!(herm.to_string(), "Hermitian0,1");
    }

    #[test]
    fn tensor_flattens_and_unions_wires() {
        let op = Observable::pauli_x(0)
            .tensor(&Observable::pauli_z(1))
            .tensor(&Observable::pauli_y(0));
        assert_eq!(op.factors().len(), 3);
        assert_eq!(op.wires(), Wires::new([0, 1]));
        assert!(!op.has_disjoint_factors());
    }

    #[test]
    fn overlapping_factors_multiply() {
        // X Y = i Z on the same wire.
        let op = Observable::pauli_x(0).tensor(&Observable::pauli_y(0));
        let expected = gate_matrix::to_array(&PAULI_Z).mapv(|v| v * IM);
        assert!(abs_diff_eq!(op.matrix(), expected, epsilon = 1e-12));
        assert!(!op.is_hermitian());
    }

    #[test]
    fn prune_drops_identities() {
        let op = Observable::pauli_x(0).tensor(&Observable::identity(1));
        assert_eq!(op.prune(), Observable::pauli_x(0));
        let all_id = Observable::identity(3).tensor(&Observable::identity(1));
        assert_eq!(all_id.prune(), Observable::identity(3));
        let two = Observable::pauli_x(0)
            .tensor(&Observable::identity(1))
            .tensor(&Observable::pauli_z(2));
        assert_eq!(two.prune().factors().len(), 2);
    }

    #[test]
    fn validation_failures() {
        let bad = Observable::Atomic(AtomicObservable::new_unchecked(
            ObservableKind::PauliX,
            Wires::new([0, 1]),
        ));
        assert!(matches!(
            bad.validate(),
            Err(ObservableError::WrongWireCount { expected: 1, got: 2, .. })
        ));
        assert_eq!(
            Observable::Tensor(Tensor::default()).validate(),
            Err(ObservableError::EmptyTensor)
        );
        assert_eq!(
            Observable::hermitian(array![[C_ZERO, C_ONE], [C_ZERO, C_ZERO]], Wires::new([0])),
            Err(ObservableError::NotHermitian)
        );
        assert!(matches!(
            Observable::hermitian(array![[C_ONE]], Wires::new([0])),
            Err(ObservableError::BadMatrixShape { .. })
        ));
    }
}
