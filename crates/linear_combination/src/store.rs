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

use hashbrown::HashMap;
use itertools::Itertools;
use lincomb_observables::{Observable, Wire, Wires};

use crate::coefficient::Coefficient;
use crate::error::LinearCombinationError;
use crate::grouping::{GroupingMethod, GroupingType};
use crate::symbol_expr::Value;

/// Optional behaviour at construction time.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Combine like terms immediately.
    pub simplify: bool,
    /// Compute the grouping cache immediately (after simplification, if requested).
    pub grouping: Option<(GroupingType, GroupingMethod)>,
    /// A user-facing name for this instance.
    pub id: Option<String>,
}

/// A weighted sum of observables, `sum_k c_k O_k`.
///
/// # Data coherence
///
/// * `coeffs` and `ops` always have the same length.
/// * `wires` is the sorted union of the wires of every operand.
/// * `grouping_indices`, when present, partitions `0..num_terms()` and refers to the current
///   operands.  Anything that replaces the operands goes through [replace_terms][Self::replace_terms],
///   which drops it; only coefficient-only updates are allowed to keep it.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearCombination {
    coeffs: Vec<Coefficient>,
    ops: Vec<Observable>,
    wires: Wires,
    grouping_indices: Option<Vec<Vec<usize>>>,
    id: Option<String>,
}

impl LinearCombination {
    /// Create a new linear combination, checking that the lengths match and that every operand is
    /// a valid observable.
    pub fn new(
        coeffs: Vec<Coefficient>,
        ops: Vec<Observable>,
    ) -> Result<Self, LinearCombinationError> {
        Self::with_options(coeffs, ops, &BuildOptions::default())
    }

    /// Convenience constructor accepting anything convertible to [Coefficient].
    pub fn dot<C, I, J>(coeffs: I, ops: J) -> Result<Self, LinearCombinationError>
    where
        C: Into<Coefficient>,
        I: IntoIterator<Item = C>,
        J: IntoIterator<Item = Observable>,
    {
        Self::new(
            coeffs.into_iter().map(Into::into).collect(),
            ops.into_iter().collect(),
        )
    }

    pub fn with_options(
        coeffs: Vec<Coefficient>,
        ops: Vec<Observable>,
        options: &BuildOptions,
    ) -> Result<Self, LinearCombinationError> {
        if coeffs.len() != ops.len() {
            return Err(LinearCombinationError::ShapeMismatch {
                coeffs: coeffs.len(),
                operands: ops.len(),
            });
        }
        validate_operands(&ops, 0)?;
        let mut out = Self::new_unchecked(coeffs, ops);
        out.id.clone_from(&options.id);
        if options.simplify {
            out.simplify();
        }
        if let Some((grouping_type, method)) = options.grouping {
            out.compute_grouping(grouping_type, method)?;
        }
        Ok(out)
    }

    /// Create a new linear combination without checking the operands.
    ///
    /// The caller must pass sequences of equal length whose operands all validate.
    pub(crate) fn new_unchecked(coeffs: Vec<Coefficient>, ops: Vec<Observable>) -> Self {
        let wires = sorted_wires(&ops);
        Self {
            coeffs,
            ops,
            wires,
            grouping_indices: None,
            id: None,
        }
    }

    /// The empty sum.
    pub fn zero() -> Self {
        Self::new_unchecked(Vec::new(), Vec::new())
    }

    #[inline]
    pub fn coeffs(&self) -> &[Coefficient] {
        &self.coeffs
    }

    #[inline]
    pub fn ops(&self) -> &[Observable] {
        &self.ops
    }

    /// The coefficients and operands as parallel slices.
    #[inline]
    pub fn terms(&self) -> (&[Coefficient], &[Observable]) {
        (&self.coeffs, &self.ops)
    }

    #[inline]
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    #[inline]
    pub fn num_terms(&self) -> usize {
        self.coeffs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        "LinearCombination"
    }

    #[inline]
    pub fn grouping_indices(&self) -> Option<&[Vec<usize>]> {
        self.grouping_indices.as_deref()
    }

    /// Set the grouping directly, for example when it was computed elsewhere.
    ///
    /// Only the index range is checked; whether the members of each group really are compatible
    /// is the caller's responsibility.
    pub fn set_grouping_indices<I, G>(&mut self, groups: I) -> Result<(), LinearCombinationError>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = usize>,
    {
        let num_terms = self.num_terms();
        let groups = groups
            .into_iter()
            .map(|group| group.into_iter().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if let Some(&index) = groups.iter().flatten().find(|&&index| index >= num_terms) {
            return Err(LinearCombinationError::GroupingIndexOutOfRange { index, num_terms });
        }
        self.grouping_indices = Some(groups);
        Ok(())
    }

    pub(crate) fn store_grouping(&mut self, groups: Vec<Vec<usize>>) {
        self.grouping_indices = Some(groups);
    }

    /// Replace both term sequences at once.  This is the only way the operands change after
    /// construction, and it always drops the grouping cache.
    pub(crate) fn replace_terms(&mut self, coeffs: Vec<Coefficient>, ops: Vec<Observable>) {
        debug_assert_eq!(coeffs.len(), ops.len());
        self.wires = sorted_wires(&ops);
        self.coeffs = coeffs;
        self.ops = ops;
        self.grouping_indices = None;
    }

    /// Multiply every coefficient by `factor`.  The operands are untouched, so the grouping cache
    /// stays valid.
    pub(crate) fn scale_in_place(&mut self, factor: f64) {
        self.coeffs
            .iter_mut()
            .for_each(|coeff| *coeff = &*coeff * factor);
    }

    /// Whether the operator is Hermitian: every operand is, and no coefficient has an imaginary
    /// part.  Abstract coefficients are assumed real.
    pub fn is_hermitian(&self) -> bool {
        !self.coeffs.iter().any(Coefficient::is_complex)
            && self.ops.iter().all(Observable::is_hermitian)
    }

    /// A copy acting on relabelled wires.  The wire order is mapped as-is rather than re-sorted,
    /// and the grouping cache and id carry over since the terms are unchanged.
    pub fn map_wires(&self, wire_map: &HashMap<Wire, Wire>) -> LinearCombination {
        LinearCombination {
            coeffs: self.coeffs.clone(),
            ops: self.ops.iter().map(|op| op.map_wires(wire_map)).collect(),
            wires: self.wires.map(wire_map),
            grouping_indices: self.grouping_indices.clone(),
            id: self.id.clone(),
        }
    }

    /// A copy with the given parameter values substituted into every symbolic coefficient.
    pub fn bind_parameters(&self, values: &HashMap<&str, Value>) -> LinearCombination {
        let mut out = self.clone();
        out.coeffs
            .iter_mut()
            .for_each(|coeff| *coeff = coeff.bind(values));
        out
    }

    /// Constructor-like summary, e.g. `<LinearCombination: terms=2, wires=[0, 1]>`.
    pub fn repr(&self) -> String {
        format!(
            "<LinearCombination: terms={}, wires={}>",
            self.num_terms(),
            self.wires.repr()
        )
    }
}

impl Default for LinearCombination {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for LinearCombination {
    /// One `(coeff) [factors]` line per term, ordered by the number of wires and then by the real
    /// part of the coefficient.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paired = self
            .coeffs
            .iter()
            .zip(&self.ops)
            .map(|(coeff, op)| (op.wires().len(), coeff, op))
            .collect::<Vec<_>>();
        paired.sort_by(|(len_a, coeff_a, _), (len_b, coeff_b, _)| {
            len_a
                .cmp(len_b)
                .then_with(|| coeff_a.real().total_cmp(&coeff_b.real()))
        });
        write!(
            f,
            "  {}",
            paired
                .into_iter()
                .map(|(_, coeff, op)| format!("({}) [{}]", coeff, op))
                .join("\n+ ")
        )
    }
}

pub(crate) fn sorted_wires(ops: &[Observable]) -> Wires {
    let wires = ops.iter().map(Observable::wires).collect::<Vec<_>>();
    Wires::all_wires(wires.iter(), true)
}

/// Check every operand, reporting positions offset by `first_index`.
pub(crate) fn validate_operands(
    ops: &[Observable],
    first_index: usize,
) -> Result<(), LinearCombinationError> {
    ops.iter().enumerate().try_for_each(|(index, op)| {
        op.validate()
            .map_err(|source| LinearCombinationError::InvalidOperand {
                index: first_index + index,
                source,
            })
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use lincomb_observables::{AtomicObservable, ObservableError, ObservableKind};
    use num_complex::Complex64;

    fn scenario_one() -> LinearCombination {
        LinearCombination::dot(
            [0.2, -0.543],
            [
                Observable::pauli_x(0).tensor(&Observable::pauli_z(1)),
                Observable::pauli_z(0).tensor(&Observable::hadamard(2)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn terms_are_returned_unchanged() {
        let lc = scenario_one();
        let (coeffs, ops) = lc.terms();
        assert_eq!(coeffs, &[Coefficient::from(0.2), Coefficient::from(-0.543)]);
        assert_eq!(ops[0].to_string(), "X0 Z1");
        assert_eq!(ops[1].to_string(), "Z0 H2");
        assert_eq!(lc.wires(), &Wires::new([0, 1, 2]));
        assert!(lc.grouping_indices().is_none());
    }

    #[test]
    fn rendering_sorts_by_wire_count_then_coefficient() {
        assert_eq!(
            scenario_one().to_string(),
            "  (-0.543) [Z0 H2]\n+ (0.2) [X0 Z1]"
        );
        assert_eq!(
            scenario_one().repr(),
            "<LinearCombination: terms=2, wires=[0, 1, 2]>"
        );
    }

    #[test]
    fn shape_mismatch() {
        assert_eq!(
            LinearCombination::dot([1., 2.], [Observable::pauli_x(0)]),
            Err(LinearCombinationError::ShapeMismatch {
                coeffs: 2,
                operands: 1
            })
        );
    }

    #[test]
    fn invalid_operand() {
        let bad = Observable::Atomic(AtomicObservable::new_unchecked(
            ObservableKind::PauliZ,
            Wires::default(),
        ));
        assert_eq!(
            LinearCombination::dot([1., 2.], [Observable::pauli_x(0), bad]),
            Err(LinearCombinationError::InvalidOperand {
                index: 1,
                source: ObservableError::NoWires { name: "PauliZ" }
            })
        );
    }

    #[test]
    fn manual_grouping_is_range_checked() {
        let mut lc = LinearCombination::dot(
            [1., 1., 1.],
            [
                Observable::pauli_x("a"),
                Observable::pauli_x("b"),
                Observable::pauli_y("b"),
            ],
        )
        .unwrap();
        lc.set_grouping_indices([vec![0, 2], vec![1]]).unwrap();
        assert_eq!(lc.grouping_indices(), Some(&[vec![0, 2], vec![1]][..]));
        assert_eq!(
            lc.set_grouping_indices([vec![0, 3]]),
            Err(LinearCombinationError::GroupingIndexOutOfRange {
                index: 3,
                num_terms: 3
            })
        );
        // A failed set leaves the previous grouping alone.
        assert_eq!(lc.grouping_indices(), Some(&[vec![0, 2], vec![1]][..]));
    }

    #[test]
    fn scaling_keeps_grouping_but_replacing_drops_it() {
        let mut lc = scenario_one();
        lc.set_grouping_indices([vec![0], vec![1]]).unwrap();
        lc.scale_in_place(2.);
        assert!(lc.grouping_indices().is_some());
        let (coeffs, ops) = (lc.coeffs().to_vec(), lc.ops().to_vec());
        lc.replace_terms(coeffs, ops);
        assert!(lc.grouping_indices().is_none());
    }

    #[test]
    fn hermiticity_follows_coefficients() {
        assert!(scenario_one().is_hermitian());
        let complex = LinearCombination::dot(
            [Complex64::new(1., 1.)],
            [Observable::pauli_x(0)],
        )
        .unwrap();
        assert!(!complex.is_hermitian());
    }

    #[test]
    fn map_wires_keeps_everything_else() {
        let mut lc = LinearCombination::with_options(
            vec![1.0.into()],
            vec![Observable::pauli_x(0)],
            &BuildOptions {
                id: Some("h".to_owned()),
                ..Default::default()
            },
        )
        .unwrap();
        lc.set_grouping_indices([vec![0]]).unwrap();
        let mut map = HashMap::new();
        map.insert(Wire::from(0), Wire::from("q0"));
        let mapped = lc.map_wires(&map);
        assert_eq!(mapped.wires(), &Wires::new(["q0"]));
        assert_eq!(mapped.ops()[0], Observable::pauli_x("q0"));
        assert_eq!(mapped.id(), Some("h"));
        assert_eq!(mapped.grouping_indices(), lc.grouping_indices());
    }

    #[test]
    fn bind_substitutes_symbols() {
        let lc = LinearCombination::dot(
            [Coefficient::symbol("t"), Coefficient::from(1.)],
            [Observable::pauli_x(0), Observable::pauli_z(0)],
        )
        .unwrap();
        let mut values = HashMap::new();
        values.insert("t", Value::Real(0.5));
        let bound = lc.bind_parameters(&values);
        assert_eq!(bound.coeffs()[0], Coefficient::from(0.5));
        assert!(lc.coeffs()[0].is_abstract());
    }

    #[test]
    fn empty_combination() {
        let lc = LinearCombination::zero();
        assert!(lc.is_empty());
        assert!(lc.wires().is_empty());
        assert_eq!(lc.to_string(), "  ");
    }
}
