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

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use itertools::iproduct;
use lincomb_observables::{identity_key, Observable};
use num_complex::Complex64;
use num_traits::Zero;

use crate::coefficient::{kron, Coefficient};
use crate::error::LinearCombinationError;
use crate::store::{validate_operands, LinearCombination};

/// A plain number on one side of a binary operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Complex(Complex64),
}

impl Scalar {
    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Float(value) => *value == 0.,
            Self::Complex(value) => value.is_zero(),
        }
    }

    /// The value as a real scale factor.  Complex scalars are not accepted as factors.
    #[inline]
    fn as_real(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Complex(_) => None,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Complex(_) => "complex",
        }
    }
}

/// The closed set of things that can appear opposite a [LinearCombination] in an arithmetic
/// expression.  Anything else is `Unsupported`, carrying its type name for error messages.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Combination(&'a LinearCombination),
    Observable(&'a Observable),
    Scalar(Scalar),
    Unsupported(&'static str),
}

impl Operand<'_> {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Combination(_) => "LinearCombination",
            Self::Observable(_) => "Observable",
            Self::Scalar(scalar) => scalar.type_name(),
            Self::Unsupported(name) => *name,
        }
    }
}

impl<'a> From<&'a LinearCombination> for Operand<'a> {
    fn from(value: &'a LinearCombination) -> Self {
        Self::Combination(value)
    }
}
impl<'a> From<&'a Observable> for Operand<'a> {
    fn from(value: &'a Observable) -> Self {
        Self::Observable(value)
    }
}
impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }
}
impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Int(value.into()))
    }
}
impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}
impl From<Complex64> for Operand<'_> {
    fn from(value: Complex64) -> Self {
        Self::Scalar(Scalar::Complex(value))
    }
}

/// The outcome of one side of a binary operation.  `NotImplemented` is not an error: it tells
/// the caller to try the reflected operation on the other operand before giving up.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch<T> {
    Done(T),
    NotImplemented,
}

impl<T> Dispatch<T> {
    #[inline]
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::NotImplemented => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    MatMul,
}

impl BinaryOp {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::MatMul => "@",
        }
    }
}

/// Evaluate `lhs <op> rhs`, trying the left operand's forward method first and then the right
/// operand's reflected method.
pub fn apply(
    op: BinaryOp,
    lhs: Operand,
    rhs: Operand,
) -> Result<LinearCombination, LinearCombinationError> {
    if let Operand::Combination(left) = lhs {
        let forward = match op {
            BinaryOp::Add => left.try_add(rhs)?,
            BinaryOp::Sub => left.try_sub(rhs)?,
            BinaryOp::Mul => left.try_mul(rhs),
            BinaryOp::MatMul => left.try_matmul(rhs)?,
        };
        if let Dispatch::Done(out) = forward {
            return Ok(out);
        }
    }
    if let Operand::Combination(right) = rhs {
        let reflected = match op {
            BinaryOp::Add => right.try_radd(lhs)?,
            BinaryOp::Sub => right.try_rsub(lhs)?,
            BinaryOp::Mul => right.try_rmul(lhs),
            BinaryOp::MatMul => right.try_rmatmul(lhs)?,
        };
        if let Dispatch::Done(out) = reflected {
            return Ok(out);
        }
    }
    Err(LinearCombinationError::UnsupportedOperandType {
        op: op.symbol(),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    })
}

impl LinearCombination {
    /// A new, simplified combination holding the terms of `self` followed by the extra terms.
    /// The extra operands must already be valid.
    fn extended(&self, coeffs: &[Coefficient], ops: &[Observable]) -> LinearCombination {
        let mut out = LinearCombination::new_unchecked(
            self.coeffs().iter().chain(coeffs).cloned().collect(),
            self.ops().iter().chain(ops).cloned().collect(),
        );
        out.simplify();
        out
    }

    /// Append terms in place and simplify.  The extra operands must already be valid.
    fn extend_in_place(&mut self, coeffs: &[Coefficient], ops: &[Observable]) {
        let mut all_coeffs = self.coeffs().to_vec();
        let mut all_ops = self.ops().to_vec();
        all_coeffs.extend_from_slice(coeffs);
        all_ops.extend_from_slice(ops);
        self.replace_terms(all_coeffs, all_ops);
        self.simplify();
    }

    fn negated_coeffs(&self) -> Vec<Coefficient> {
        self.coeffs().iter().map(|coeff| -coeff).collect()
    }

    /// A copy with every coefficient multiplied by `factor`, without simplification.
    fn scaled(&self, factor: f64) -> LinearCombination {
        LinearCombination::new_unchecked(
            self.coeffs().iter().map(|coeff| coeff * factor).collect(),
            self.ops().to_vec(),
        )
    }

    /// `self + rhs`.  Adding the number zero returns an unchanged copy.
    pub fn try_add(
        &self,
        rhs: Operand,
    ) -> Result<Dispatch<LinearCombination>, LinearCombinationError> {
        match rhs {
            Operand::Scalar(scalar) if scalar.is_zero() => Ok(Dispatch::Done(self.clone())),
            Operand::Combination(other) => {
                Ok(Dispatch::Done(self.extended(other.coeffs(), other.ops())))
            }
            Operand::Observable(op) => {
                let ops = ::std::slice::from_ref(op);
                validate_operands(ops, self.num_terms())?;
                Ok(Dispatch::Done(
                    self.extended(&[Coefficient::Real(1.)], ops),
                ))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// `lhs + self`.  Addition is commutative, so this is [try_add][Self::try_add].
    #[inline]
    pub fn try_radd(
        &self,
        lhs: Operand,
    ) -> Result<Dispatch<LinearCombination>, LinearCombinationError> {
        self.try_add(lhs)
    }

    /// `self - rhs`, defined as `self + (-1) * rhs`.
    pub fn try_sub(
        &self,
        rhs: Operand,
    ) -> Result<Dispatch<LinearCombination>, LinearCombinationError> {
        match rhs {
            Operand::Combination(other) => Ok(Dispatch::Done(
                self.extended(&other.negated_coeffs(), other.ops()),
            )),
            Operand::Observable(op) => {
                let ops = ::std::slice::from_ref(op);
                validate_operands(ops, self.num_terms())?;
                Ok(Dispatch::Done(
                    self.extended(&[Coefficient::Real(-1.)], ops),
                ))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// `lhs - self`.
    pub fn try_rsub(
        &self,
        lhs: Operand,
    ) -> Result<Dispatch<LinearCombination>, LinearCombinationError> {
        match lhs {
            Operand::Combination(other) => other.try_sub(Operand::Combination(self)),
            Operand::Observable(op) => {
                let ops = ::std::slice::from_ref(op);
                validate_operands(ops, 0)?;
                let lhs = LinearCombination::new_unchecked(vec![Coefficient::Real(1.)], ops.to_vec());
                Ok(Dispatch::Done(
                    lhs.extended(&self.negated_coeffs(), self.ops()),
                ))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// `self * rhs` for a real (integer or float) scalar.  The result is not simplified and does
    /// not carry the grouping over.
    pub fn try_mul(&self, rhs: Operand) -> Dispatch<LinearCombination> {
        match rhs {
            Operand::Scalar(scalar) => match scalar.as_real() {
                Some(factor) => Dispatch::Done(self.scaled(factor)),
                None => Dispatch::NotImplemented,
            },
            _ => Dispatch::NotImplemented,
        }
    }

    /// `lhs * self`.  Scaling is commutative, so this is [try_mul][Self::try_mul].
    #[inline]
    pub fn try_rmul(&self, lhs: Operand) -> Dispatch<LinearCombination> {
        self.try_mul(lhs)
    }

    /// `self @ rhs`: the tensor product with another combination, or every operand tensored on
    /// the right by a single observable.
    pub fn try_matmul(
        &self,
        rhs: Operand,
    ) -> Result<Dispatch<LinearCombination>, LinearCombinationError> {
        match rhs {
            Operand::Combination(other) => self.tensor(other).map(Dispatch::Done),
            Operand::Observable(op) => {
                validate_operands(::std::slice::from_ref(op), 0)?;
                let ops = self.ops().iter().map(|own| own.tensor(op)).collect();
                let mut out = LinearCombination::new_unchecked(self.coeffs().to_vec(), ops);
                out.simplify();
                Ok(Dispatch::Done(out))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// `lhs @ self`.
    pub fn try_rmatmul(
        &self,
        lhs: Operand,
    ) -> Result<Dispatch<LinearCombination>, LinearCombinationError> {
        match lhs {
            Operand::Combination(other) => other.tensor(self).map(Dispatch::Done),
            Operand::Observable(op) => {
                validate_operands(::std::slice::from_ref(op), 0)?;
                let ops = self.ops().iter().map(|own| op.tensor(own)).collect();
                let mut out = LinearCombination::new_unchecked(self.coeffs().to_vec(), ops);
                out.simplify();
                Ok(Dispatch::Done(out))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// The tensor product of two combinations acting on disjoint wires.  Terms are ordered with
    /// the index into `self` varying slowest, then simplified.
    pub fn tensor(
        &self,
        other: &LinearCombination,
    ) -> Result<LinearCombination, LinearCombinationError> {
        let shared = self.wires().shared_wires(other.wires());
        if !shared.is_empty() {
            return Err(LinearCombinationError::IncompatibleWires { shared });
        }
        let coeffs = kron(self.coeffs(), other.coeffs());
        let ops = iproduct!(self.ops(), other.ops())
            .map(|(left, right)| left.tensor(right))
            .collect();
        let mut out = LinearCombination::new_unchecked(coeffs, ops);
        out.simplify();
        Ok(out)
    }

    /// `self += rhs`.  The operand is validated before anything is modified.
    pub fn try_add_assign(
        &mut self,
        rhs: Operand,
    ) -> Result<Dispatch<()>, LinearCombinationError> {
        match rhs {
            Operand::Scalar(scalar) if scalar.is_zero() => Ok(Dispatch::Done(())),
            Operand::Combination(other) => {
                self.extend_in_place(other.coeffs(), other.ops());
                Ok(Dispatch::Done(()))
            }
            Operand::Observable(op) => {
                let ops = ::std::slice::from_ref(op);
                validate_operands(ops, self.num_terms())?;
                self.extend_in_place(&[Coefficient::Real(1.)], ops);
                Ok(Dispatch::Done(()))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// `self -= rhs`.  The operand is validated before anything is modified.
    pub fn try_sub_assign(
        &mut self,
        rhs: Operand,
    ) -> Result<Dispatch<()>, LinearCombinationError> {
        match rhs {
            Operand::Combination(other) => {
                self.extend_in_place(&other.negated_coeffs(), other.ops());
                Ok(Dispatch::Done(()))
            }
            Operand::Observable(op) => {
                let ops = ::std::slice::from_ref(op);
                validate_operands(ops, self.num_terms())?;
                self.extend_in_place(&[Coefficient::Real(-1.)], ops);
                Ok(Dispatch::Done(()))
            }
            _ => Ok(Dispatch::NotImplemented),
        }
    }

    /// `self *= rhs` for a real scalar.  Only the coefficients change, so the grouping is kept.
    pub fn try_mul_assign(&mut self, rhs: Operand) -> Dispatch<()> {
        match rhs {
            Operand::Scalar(scalar) => match scalar.as_real() {
                Some(factor) => {
                    self.scale_in_place(factor);
                    Dispatch::Done(())
                }
                None => Dispatch::NotImplemented,
            },
            _ => Dispatch::NotImplemented,
        }
    }

    /// Whether `self` and `other` represent the same operator, up to term order, merging of like
    /// terms and floating-point tolerance in the coefficients.  Neither side is modified.
    pub fn compare(&self, other: Operand) -> Result<bool, LinearCombinationError> {
        match other {
            Operand::Combination(other) => Ok(same_terms(self, other)),
            Operand::Observable(op) => Ok(same_terms(
                self,
                &LinearCombination::new_unchecked(vec![Coefficient::Real(1.)], vec![op.clone()]),
            )),
            Operand::Scalar(scalar) => Err(LinearCombinationError::UnsupportedComparisonType(
                scalar.type_name(),
            )),
            Operand::Unsupported(name) => {
                Err(LinearCombinationError::UnsupportedComparisonType(name))
            }
        }
    }
}

fn same_terms(left: &LinearCombination, right: &LinearCombination) -> bool {
    let keyed = |lc: &LinearCombination| {
        let simplified = lc.simplified();
        let mut pairs = simplified
            .coeffs()
            .iter()
            .zip(simplified.ops())
            .map(|(coeff, op)| (identity_key(op), coeff.clone()))
            .collect::<Vec<_>>();
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
        pairs
    };
    let (left, right) = (keyed(left), keyed(right));
    left.len() == right.len()
        && left
            .iter()
            .zip(&right)
            .all(|((key_l, coeff_l), (key_r, coeff_r))| {
                key_l == key_r && coeff_l.approx_eq(coeff_r)
            })
}

// Infallible operator sugar for the combination-with-combination and real-scalar cases.

impl Add<&LinearCombination> for &LinearCombination {
    type Output = LinearCombination;
    fn add(self, rhs: &LinearCombination) -> LinearCombination {
        self.extended(rhs.coeffs(), rhs.ops())
    }
}
impl Add<&LinearCombination> for LinearCombination {
    type Output = LinearCombination;
    fn add(self, rhs: &LinearCombination) -> LinearCombination {
        &self + rhs
    }
}
impl Add for LinearCombination {
    type Output = LinearCombination;
    fn add(self, rhs: LinearCombination) -> LinearCombination {
        &self + &rhs
    }
}

impl Sub<&LinearCombination> for &LinearCombination {
    type Output = LinearCombination;
    fn sub(self, rhs: &LinearCombination) -> LinearCombination {
        self.extended(&rhs.negated_coeffs(), rhs.ops())
    }
}
impl Sub<&LinearCombination> for LinearCombination {
    type Output = LinearCombination;
    fn sub(self, rhs: &LinearCombination) -> LinearCombination {
        &self - rhs
    }
}
impl Sub for LinearCombination {
    type Output = LinearCombination;
    fn sub(self, rhs: LinearCombination) -> LinearCombination {
        &self - &rhs
    }
}

impl Neg for &LinearCombination {
    type Output = LinearCombination;
    fn neg(self) -> LinearCombination {
        self.scaled(-1.)
    }
}
impl Neg for LinearCombination {
    type Output = LinearCombination;
    fn neg(self) -> LinearCombination {
        -&self
    }
}

impl Mul<f64> for &LinearCombination {
    type Output = LinearCombination;
    fn mul(self, rhs: f64) -> LinearCombination {
        self.scaled(rhs)
    }
}
impl Mul<f64> for LinearCombination {
    type Output = LinearCombination;
    fn mul(self, rhs: f64) -> LinearCombination {
        &self * rhs
    }
}
impl Mul<&LinearCombination> for f64 {
    type Output = LinearCombination;
    fn mul(self, rhs: &LinearCombination) -> LinearCombination {
        rhs.scaled(self)
    }
}
impl Mul<LinearCombination> for f64 {
    type Output = LinearCombination;
    fn mul(self, rhs: LinearCombination) -> LinearCombination {
        rhs.scaled(self)
    }
}

impl AddAssign<&LinearCombination> for LinearCombination {
    fn add_assign(&mut self, rhs: &LinearCombination) {
        self.extend_in_place(rhs.coeffs(), rhs.ops());
    }
}
impl SubAssign<&LinearCombination> for LinearCombination {
    fn sub_assign(&mut self, rhs: &LinearCombination) {
        self.extend_in_place(&rhs.negated_coeffs(), rhs.ops());
    }
}
impl MulAssign<f64> for LinearCombination {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_in_place(rhs);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grouping::{GroupingMethod, GroupingType};
    use lincomb_observables::{AtomicObservable, ObservableKind, Wires};

    fn x0() -> LinearCombination {
        LinearCombination::dot([1.], [Observable::pauli_x(0)]).unwrap()
    }

    fn z0() -> LinearCombination {
        LinearCombination::dot([1.], [Observable::pauli_z(0)]).unwrap()
    }

    fn z1() -> LinearCombination {
        LinearCombination::dot([2.], [Observable::pauli_z(1)]).unwrap()
    }

    #[test]
    fn tensor_requires_disjoint_wires() {
        assert_eq!(
            apply(BinaryOp::MatMul, (&x0()).into(), (&z0()).into()),
            Err(LinearCombinationError::IncompatibleWires {
                shared: Wires::new([0])
            })
        );
    }

    #[test]
    fn tensor_of_disjoint_combinations() {
        let left = LinearCombination::dot(
            [1., 2.],
            [Observable::pauli_x(0), Observable::pauli_z(0)],
        )
        .unwrap();
        let right = LinearCombination::dot(
            [3., 5.],
            [Observable::pauli_y(1), Observable::identity(1)],
        )
        .unwrap();
        let product = left.tensor(&right).unwrap();
        assert_eq!(
            product.coeffs(),
            &[3., 5., 6., 10.].map(Coefficient::from)
        );
        assert_eq!(product.ops()[0].to_string(), "X0 Y1");
        // The identity factor is pruned away by simplification.
        assert_eq!(product.ops()[1], Observable::pauli_x(0));
        assert_eq!(product.wires(), &Wires::new([0, 1]));
    }

    #[test]
    fn adding_zero_returns_a_copy() {
        let mut lc = x0();
        lc.compute_grouping(GroupingType::Qwc, GroupingMethod::Lf)
            .unwrap();
        for zero in [Operand::from(0), Operand::from(0.), Operand::from(Complex64::zero())] {
            let sum = apply(BinaryOp::Add, (&lc).into(), zero).unwrap();
            assert_eq!(sum, lc);
            let sum = apply(BinaryOp::Add, zero, (&lc).into()).unwrap();
            assert_eq!(sum, lc);
        }
    }

    #[test]
    fn addition_merges_terms() {
        let sum = apply(BinaryOp::Add, (&x0()).into(), (&x0()).into()).unwrap();
        assert_eq!(sum.coeffs(), &[Coefficient::from(2.)]);
        let op = Observable::pauli_z(1);
        let sum = apply(BinaryOp::Add, (&x0()).into(), (&op).into()).unwrap();
        assert_eq!(sum.num_terms(), 2);
        let sum = apply(BinaryOp::Add, (&op).into(), (&x0()).into()).unwrap();
        let expected = &x0() + &LinearCombination::dot([1.], [op.clone()]).unwrap();
        assert!(sum.compare((&expected).into()).unwrap());
    }

    #[test]
    fn subtraction() {
        let difference = &x0() - &x0();
        assert!(difference.is_empty());
        let op = Observable::pauli_x(0);
        let difference = apply(BinaryOp::Sub, (&op).into(), (&z0()).into()).unwrap();
        assert_eq!(difference.ops(), &[Observable::pauli_x(0), Observable::pauli_z(0)]);
        assert_eq!(
            difference.coeffs(),
            &[Coefficient::from(1.), Coefficient::from(-1.)]
        );
        let difference = apply(BinaryOp::Sub, (&z0()).into(), (&op).into()).unwrap();
        assert_eq!(
            difference.coeffs(),
            &[Coefficient::from(1.), Coefficient::from(-1.)]
        );
    }

    #[test]
    fn scaling() {
        let lc = &z1() * 3.;
        assert_eq!(lc.coeffs(), &[Coefficient::from(6.)]);
        let lc = apply(BinaryOp::Mul, Operand::from(2), (&z1()).into()).unwrap();
        assert_eq!(lc.coeffs(), &[Coefficient::from(4.)]);
        // Scaling by zero keeps the terms until the next simplification.
        let lc = 0. * &z1();
        assert_eq!(lc.num_terms(), 1);
        assert_eq!(lc.simplified().num_terms(), 0);
    }

    #[test]
    fn unsupported_operands() {
        assert_eq!(
            apply(
                BinaryOp::Mul,
                (&z1()).into(),
                Operand::from(Complex64::new(0., 1.))
            ),
            Err(LinearCombinationError::UnsupportedOperandType {
                op: "*",
                lhs: "LinearCombination",
                rhs: "complex"
            })
        );
        assert_eq!(
            apply(BinaryOp::Add, (&z1()).into(), Operand::from(3)),
            Err(LinearCombinationError::UnsupportedOperandType {
                op: "+",
                lhs: "LinearCombination",
                rhs: "int"
            })
        );
        assert!(matches!(
            apply(BinaryOp::MatMul, Operand::Unsupported("str"), (&z1()).into()),
            Err(LinearCombinationError::UnsupportedOperandType { lhs: "str", .. })
        ));
        assert_eq!(
            z1().try_mul(Operand::Unsupported("str")),
            Dispatch::NotImplemented
        );
    }

    #[test]
    fn in_place_add_validates_first() {
        let mut lc = x0();
        let bad = Observable::Atomic(AtomicObservable::new_unchecked(
            ObservableKind::PauliX,
            Wires::new([0, 1]),
        ));
        let before = lc.clone();
        assert!(matches!(
            lc.try_add_assign((&bad).into()),
            Err(LinearCombinationError::InvalidOperand { index: 1, .. })
        ));
        assert_eq!(lc, before);
    }

    #[test]
    fn in_place_operations_and_the_grouping_cache() {
        let mut lc = LinearCombination::dot(
            [1., 2.],
            [Observable::pauli_x(0), Observable::pauli_z(1)],
        )
        .unwrap();
        lc.compute_grouping(GroupingType::Qwc, GroupingMethod::Rlf)
            .unwrap();
        lc *= 2.;
        assert!(lc.grouping_indices().is_some());
        assert_eq!(lc.coeffs()[1], Coefficient::from(4.));
        lc += &z0();
        assert!(lc.grouping_indices().is_none());
        assert_eq!(lc.num_terms(), 3);
        lc -= &z0();
        assert_eq!(lc.num_terms(), 2);
        assert!(lc
            .try_sub_assign(Operand::from(1.))
            .unwrap()
            .into_option()
            .is_none());
    }

    #[test]
    fn comparison_ignores_order_and_representation() {
        let left = LinearCombination::dot(
            [1., 2.],
            [
                Observable::pauli_x(0).tensor(&Observable::identity(1)),
                Observable::pauli_z(1),
            ],
        )
        .unwrap();
        let right = LinearCombination::dot(
            [2., 0.5, 0.5],
            [
                Observable::pauli_z(1),
                Observable::pauli_x(0),
                Observable::pauli_x(0),
            ],
        )
        .unwrap();
        assert!(left.compare((&right).into()).unwrap());
        // Neither side was simplified in place.
        assert_eq!(right.num_terms(), 3);
        let scaled = &right * 1.0000000000001;
        assert!(left.compare((&scaled).into()).unwrap());
        assert!(!left.compare((&(&right * 2.)).into()).unwrap());
    }

    #[test]
    fn comparison_against_an_observable() {
        let op = Observable::pauli_x(0);
        assert!(x0().compare((&op).into()).unwrap());
        assert!(!z1().compare((&op).into()).unwrap());
        assert_eq!(
            x0().compare(Operand::from(1.)),
            Err(LinearCombinationError::UnsupportedComparisonType("float"))
        );
    }
}
