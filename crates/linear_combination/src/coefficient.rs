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
use std::ops::{Add, Mul, Neg, Sub};

use approx::relative_eq;
use hashbrown::HashMap;
use num_complex::Complex64;
use num_traits::Zero;

use crate::symbol_expr::{SymbolExpr, Value};

/// Absolute tolerance when comparing two concrete coefficients for equality.
pub const COMPARE_ATOL: f64 = 1e-12;
/// Relative tolerance when comparing two concrete coefficients for equality.
pub const COMPARE_RTOL: f64 = 1e-10;

/// The weight of a single term.
///
/// Arithmetic promotes `Real` to `Complex` and either to `Expr`.  An expression that loses all of
/// its free symbols (for example after binding) collapses back to a number.
#[derive(Clone, Debug)]
pub enum Coefficient {
    Real(f64),
    Complex(Complex64),
    /// A symbolic value whose concrete value is not known yet.
    Expr(SymbolExpr),
}

impl Coefficient {
    pub fn symbol(name: &str) -> Self {
        Coefficient::Expr(SymbolExpr::symbol(name))
    }

    pub fn from_expr(expr: SymbolExpr) -> Self {
        match expr.eval() {
            Some(Value::Real(r)) => Coefficient::Real(r),
            Some(Value::Complex(c)) => Coefficient::Complex(c),
            None => Coefficient::Expr(expr),
        }
    }

    pub fn to_expr(&self) -> SymbolExpr {
        match self {
            Coefficient::Real(r) => SymbolExpr::Value(Value::Real(*r)),
            Coefficient::Complex(c) => SymbolExpr::Value(Value::Complex(*c)),
            Coefficient::Expr(expr) => expr.clone(),
        }
    }

    /// Whether the value cannot be known until its symbols are bound.
    #[inline]
    pub fn is_abstract(&self) -> bool {
        matches!(self, Coefficient::Expr(_))
    }

    /// Whether the coefficient has a non-zero imaginary part.  Abstract coefficients are not
    /// considered complex.
    #[inline]
    pub fn is_complex(&self) -> bool {
        match self {
            Coefficient::Complex(c) => c.im != 0.,
            _ => false,
        }
    }

    /// The concrete value, if there is one.
    #[inline]
    pub fn value(&self) -> Option<Complex64> {
        match self {
            Coefficient::Real(r) => Some(Complex64::new(*r, 0.)),
            Coefficient::Complex(c) => Some(*c),
            Coefficient::Expr(_) => None,
        }
    }

    /// The real part, used as a sort key.  Abstract coefficients give NaN.
    #[inline]
    pub fn real(&self) -> f64 {
        match self {
            Coefficient::Real(r) => *r,
            Coefficient::Complex(c) => c.re,
            Coefficient::Expr(_) => f64::NAN,
        }
    }

    /// Whether this is a concrete value within `atol` of zero.
    pub fn is_close_to_zero(&self, atol: f64) -> bool {
        self.value().map(|v| v.norm() <= atol).unwrap_or(false)
    }

    /// Whether this is exactly the number zero.
    pub fn is_zero(&self) -> bool {
        self.value().map(|v| v.is_zero()).unwrap_or(false)
    }

    pub fn bind(&self, values: &HashMap<&str, Value>) -> Coefficient {
        match self {
            Coefficient::Expr(expr) => Coefficient::from_expr(expr.bind(values)),
            _ => self.clone(),
        }
    }

    /// Tolerant equality: concrete values are compared with [COMPARE_ATOL] and [COMPARE_RTOL]
    /// after promotion to complex, abstract values structurally.
    pub fn approx_eq(&self, other: &Coefficient) -> bool {
        match (self.value(), other.value()) {
            (Some(left), Some(right)) => relative_eq!(
                left,
                right,
                epsilon = COMPARE_ATOL,
                max_relative = COMPARE_RTOL
            ),
            (None, None) => self.to_expr() == other.to_expr(),
            _ => false,
        }
    }

    fn binary(
        &self,
        rhs: &Coefficient,
        real: fn(f64, f64) -> f64,
        complex: fn(Complex64, Complex64) -> Complex64,
        expr: fn(SymbolExpr, SymbolExpr) -> SymbolExpr,
    ) -> Coefficient {
        match (self, rhs) {
            (Coefficient::Real(l), Coefficient::Real(r)) => Coefficient::Real(real(*l, *r)),
            (Coefficient::Expr(_), _) | (_, Coefficient::Expr(_)) => {
                Coefficient::from_expr(expr(self.to_expr(), rhs.to_expr()))
            }
            _ => match (self.value(), rhs.value()) {
                (Some(l), Some(r)) => Coefficient::Complex(complex(l, r)),
                _ => Coefficient::from_expr(expr(self.to_expr(), rhs.to_expr())),
            },
        }
    }
}

/// Outer (Kronecker) product of two coefficient vectors, `left`-major.
pub fn kron(left: &[Coefficient], right: &[Coefficient]) -> Vec<Coefficient> {
    left.iter()
        .flat_map(|l| right.iter().map(move |r| l * r))
        .collect()
}

impl Default for Coefficient {
    fn default() -> Self {
        Coefficient::Real(0.)
    }
}

impl PartialEq for Coefficient {
    /// Exact equality after promotion, so that `Real(1.0) == Complex(1 + 0j)`.
    fn eq(&self, other: &Coefficient) -> bool {
        match (self.value(), other.value()) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.to_expr() == other.to_expr(),
            _ => false,
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Real(r) => write!(f, "{}", r),
            Coefficient::Complex(c) => {
                if c.im < 0. {
                    write!(f, "{}-{}j", c.re, -c.im)
                } else {
                    write!(f, "{}+{}j", c.re, c.im)
                }
            }
            Coefficient::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient::Real(value)
    }
}
impl From<i32> for Coefficient {
    fn from(value: i32) -> Self {
        Coefficient::Real(value.into())
    }
}
impl From<i64> for Coefficient {
    fn from(value: i64) -> Self {
        Coefficient::Real(value as f64)
    }
}
impl From<Complex64> for Coefficient {
    fn from(value: Complex64) -> Self {
        Coefficient::Complex(value)
    }
}
impl From<SymbolExpr> for Coefficient {
    fn from(value: SymbolExpr) -> Self {
        Coefficient::from_expr(value)
    }
}

impl Add for &Coefficient {
    type Output = Coefficient;
    fn add(self, rhs: &Coefficient) -> Coefficient {
        self.binary(rhs, |l, r| l + r, |l, r| l + r, |l, r| l + r)
    }
}
impl Add for Coefficient {
    type Output = Coefficient;
    fn add(self, rhs: Coefficient) -> Coefficient {
        &self + &rhs
    }
}

impl Sub for &Coefficient {
    type Output = Coefficient;
    fn sub(self, rhs: &Coefficient) -> Coefficient {
        self.binary(rhs, |l, r| l - r, |l, r| l - r, |l, r| l - r)
    }
}
impl Sub for Coefficient {
    type Output = Coefficient;
    fn sub(self, rhs: Coefficient) -> Coefficient {
        &self - &rhs
    }
}

impl Mul for &Coefficient {
    type Output = Coefficient;
    fn mul(self, rhs: &Coefficient) -> Coefficient {
        self.binary(rhs, |l, r| l * r, |l, r| l * r, |l, r| l * r)
    }
}
impl Mul for Coefficient {
    type Output = Coefficient;
    fn mul(self, rhs: Coefficient) -> Coefficient {
        &self * &rhs
    }
}
impl Mul<f64> for &Coefficient {
    type Output = Coefficient;
    fn mul(self, rhs: f64) -> Coefficient {
        self * &Coefficient::Real(rhs)
    }
}

impl Neg for &Coefficient {
    type Output = Coefficient;
    fn neg(self) -> Coefficient {
        match self {
            Coefficient::Real(r) => Coefficient::Real(-r),
            Coefficient::Complex(c) => Coefficient::Complex(-c),
            Coefficient::Expr(expr) => Coefficient::Expr(-expr.clone()),
        }
    }
}
impl Neg for Coefficient {
    type Output = Coefficient;
    fn neg(self) -> Coefficient {
        -&self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rendering() {
        assert_eq!(Coefficient::from(-0.543).to_string(), "-0.543");
        assert_eq!(Coefficient::from(-1).to_string(), "-1");
        assert_eq!(
            Coefficient::from(Complex64::new(1., 2.)).to_string(),
            "1+2j"
        );
        assert_eq!(
            Coefficient::from(Complex64::new(0.5, -1.5)).to_string(),
            "0.5-1.5j"
        );
        assert_eq!(
            Coefficient::from(Complex64::new(f64::INFINITY, 0.)).to_string(),
            "inf+0j"
        );
        assert_eq!(
            Coefficient::from(Complex64::new(f64::NAN, f64::NEG_INFINITY)).to_string(),
            "NaN-infj"
        );
        assert_eq!(
            (Coefficient::from(2.) * Coefficient::symbol("w")).to_string(),
            "2*w"
        );
    }

    #[test]
    fn promotion() {
        let sum = Coefficient::from(1.) + Coefficient::from(Complex64::new(0., 1.));
        assert!(matches!(sum, Coefficient::Complex(_)));
        assert!(sum.is_complex());
        let sym = Coefficient::from(1.) + Coefficient::symbol("a");
        assert!(sym.is_abstract());
        assert!(sym.real().is_nan());
        assert_eq!(Coefficient::from(1.), Coefficient::from(Complex64::new(1., 0.)));
    }

    #[test]
    fn binding_collapses_to_a_number() {
        let coeff = Coefficient::from(3.) * Coefficient::symbol("a");
        let mut values = HashMap::new();
        values.insert("a", Value::Real(0.5));
        let bound = coeff.bind(&values);
        assert!(matches!(bound, Coefficient::Real(r) if r == 1.5));
    }

    #[test]
    fn near_zero_only_for_concrete_values() {
        assert!(Coefficient::from(1e-14).is_close_to_zero(1e-12));
        assert!(!Coefficient::from(Complex64::new(0., 1e-3)).is_close_to_zero(1e-12));
        assert!(!Coefficient::symbol("a").is_close_to_zero(1e-12));
    }

    #[test]
    fn kron_is_left_major() {
        let left = [Coefficient::from(1.), Coefficient::from(2.)];
        let right = [Coefficient::from(3.), Coefficient::from(5.)];
        let out = kron(&left, &right)
            .into_iter()
            .map(|c| c.real())
            .collect::<Vec<_>>();
        assert_eq!(out, vec![3., 5., 6., 10.]);
    }

    #[test]
    fn approximate_equality() {
        assert!(Coefficient::from(0.1 + 0.2).approx_eq(&Coefficient::from(0.3)));
        assert!(!Coefficient::from(0.3).approx_eq(&Coefficient::from(0.30001)));
        assert!(Coefficient::symbol("a").approx_eq(&Coefficient::symbol("a")));
    }
}
