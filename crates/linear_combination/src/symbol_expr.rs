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

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use hashbrown::HashMap;
use num_complex::Complex64;

/// A free parameter of a symbolic coefficient.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: String,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Value type, either real or complex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Real(f64),
    Complex(Complex64),
}

impl Value {
    #[inline]
    pub fn as_complex(&self) -> Complex64 {
        match self {
            Value::Real(r) => Complex64::new(*r, 0.),
            Value::Complex(c) => *c,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Real(r) => *r == 0.,
            Value::Complex(c) => c.re == 0. && c.im == 0.,
        }
    }

    fn binary(
        self,
        rhs: Value,
        real: fn(f64, f64) -> f64,
        complex: fn(Complex64, Complex64) -> Complex64,
    ) -> Value {
        match (self, rhs) {
            (Value::Real(l), Value::Real(r)) => Value::Real(real(l, r)),
            (l, r) => Value::Complex(complex(l.as_complex(), r.as_complex())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(r) => write!(f, "{}", r),
            Value::Complex(c) => write!(f, "({})", format!("{}", c).replace('i', "j")),
        }
    }
}

impl Add for Value {
    type Output = Value;
    fn add(self, rhs: Value) -> Value {
        self.binary(rhs, |l, r| l + r, |l, r| l + r)
    }
}

impl Sub for Value {
    type Output = Value;
    fn sub(self, rhs: Value) -> Value {
        self.binary(rhs, |l, r| l - r, |l, r| l - r)
    }
}

impl Mul for Value {
    type Output = Value;
    fn mul(self, rhs: Value) -> Value {
        self.binary(rhs, |l, r| l * r, |l, r| l * r)
    }
}

impl Neg for Value {
    type Output = Value;
    fn neg(self) -> Value {
        match self {
            Value::Real(r) => Value::Real(-r),
            Value::Complex(c) => Value::Complex(-c),
        }
    }
}

/// definition of binary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

/// node types of expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolExpr {
    Symbol(Arc<Symbol>),
    Value(Value),
    Neg(Arc<SymbolExpr>),
    Binary {
        op: BinaryOp,
        lhs: Arc<SymbolExpr>,
        rhs: Arc<SymbolExpr>,
    },
}

impl SymbolExpr {
    pub fn symbol(name: &str) -> Self {
        SymbolExpr::Symbol(Arc::new(Symbol::new(name)))
    }

    /// bind values to symbol nodes; unknown symbols are left in place
    pub fn bind(&self, maps: &HashMap<&str, Value>) -> SymbolExpr {
        match self {
            SymbolExpr::Symbol(s) => match maps.get(s.name()) {
                Some(v) => SymbolExpr::Value(*v),
                None => self.clone(),
            },
            SymbolExpr::Value(v) => SymbolExpr::Value(*v),
            SymbolExpr::Neg(expr) => -expr.bind(maps),
            SymbolExpr::Binary { op, lhs, rhs } => {
                let lhs = lhs.bind(maps);
                let rhs = rhs.bind(maps);
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                }
            }
        }
    }

    /// evaluate the expression, if it has no free symbols
    pub fn eval(&self) -> Option<Value> {
        match self {
            SymbolExpr::Symbol(_) => None,
            SymbolExpr::Value(v) => Some(*v),
            SymbolExpr::Neg(expr) => expr.eval().map(|v| -v),
            SymbolExpr::Binary { op, lhs, rhs } => {
                let lval = lhs.eval();
                let rval = rhs.eval();
                // 0 * x is 0 whatever x turns out to be.
                if let BinaryOp::Mul = op {
                    if let Some(zero) = lval.filter(Value::is_zero).or(rval.filter(Value::is_zero)) {
                        return Some(zero);
                    }
                }
                let (l, r) = (lval?, rval?);
                Some(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                })
            }
        }
    }

    /// the set of free symbols
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<Symbol>) {
        match self {
            SymbolExpr::Symbol(s) => {
                out.insert(s.as_ref().clone());
            }
            SymbolExpr::Value(_) => {}
            SymbolExpr::Neg(expr) => expr.collect_symbols(out),
            SymbolExpr::Binary { lhs, rhs, .. } => {
                lhs.collect_symbols(out);
                rhs.collect_symbols(out);
            }
        }
    }

    fn needs_parens(&self) -> bool {
        matches!(
            self,
            SymbolExpr::Binary {
                op: BinaryOp::Add | BinaryOp::Sub,
                ..
            }
        )
    }
}

impl fmt::Display for SymbolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolExpr::Symbol(s) => write!(f, "{}", s.name()),
            SymbolExpr::Value(v) => write!(f, "{}", v),
            SymbolExpr::Neg(expr) => {
                if expr.needs_parens() {
                    write!(f, "-({})", expr)
                } else {
                    write!(f, "-{}", expr)
                }
            }
            SymbolExpr::Binary { op, lhs, rhs } => match op {
                BinaryOp::Add => write!(f, "{} + {}", lhs, rhs),
                BinaryOp::Sub => {
                    if rhs.needs_parens() {
                        write!(f, "{} - ({})", lhs, rhs)
                    } else {
                        write!(f, "{} - {}", lhs, rhs)
                    }
                }
                BinaryOp::Mul => {
                    let wrap = |e: &SymbolExpr| {
                        if e.needs_parens() {
                            format!("({})", e)
                        } else {
                            e.to_string()
                        }
                    };
                    write!(f, "{}*{}", wrap(lhs), wrap(rhs))
                }
            },
        }
    }
}

// Constant folding is applied whenever both sides are plain values.
impl Add for SymbolExpr {
    type Output = SymbolExpr;
    fn add(self, rhs: SymbolExpr) -> SymbolExpr {
        match (&self, &rhs) {
            (SymbolExpr::Value(l), SymbolExpr::Value(r)) => SymbolExpr::Value(*l + *r),
            (SymbolExpr::Value(l), _) if l.is_zero() => rhs,
            (_, SymbolExpr::Value(r)) if r.is_zero() => self,
            (_, SymbolExpr::Neg(inner)) => SymbolExpr::Binary {
                op: BinaryOp::Sub,
                lhs: Arc::new(self.clone()),
                rhs: inner.clone(),
            },
            _ => SymbolExpr::Binary {
                op: BinaryOp::Add,
                lhs: Arc::new(self),
                rhs: Arc::new(rhs),
            },
        }
    }
}

impl Sub for SymbolExpr {
    type Output = SymbolExpr;
    fn sub(self, rhs: SymbolExpr) -> SymbolExpr {
        match (&self, &rhs) {
            (SymbolExpr::Value(l), SymbolExpr::Value(r)) => SymbolExpr::Value(*l - *r),
            (SymbolExpr::Value(l), _) if l.is_zero() => -rhs,
            (_, SymbolExpr::Value(r)) if r.is_zero() => self,
            _ => SymbolExpr::Binary {
                op: BinaryOp::Sub,
                lhs: Arc::new(self),
                rhs: Arc::new(rhs),
            },
        }
    }
}

impl Mul for SymbolExpr {
    type Output = SymbolExpr;
    fn mul(self, rhs: SymbolExpr) -> SymbolExpr {
        match (&self, &rhs) {
            (SymbolExpr::Value(l), SymbolExpr::Value(r)) => SymbolExpr::Value(*l * *r),
            (SymbolExpr::Value(l), _) | (_, SymbolExpr::Value(l)) if l.is_zero() => {
                SymbolExpr::Value(Value::Real(0.))
            }
            (SymbolExpr::Value(Value::Real(l)), _) if *l == 1. => rhs,
            (_, SymbolExpr::Value(Value::Real(r))) if *r == 1. => self,
            _ => SymbolExpr::Binary {
                op: BinaryOp::Mul,
                lhs: Arc::new(self),
                rhs: Arc::new(rhs),
            },
        }
    }
}

impl Neg for SymbolExpr {
    type Output = SymbolExpr;
    fn neg(self) -> SymbolExpr {
        match self {
            SymbolExpr::Value(v) => SymbolExpr::Value(-v),
            SymbolExpr::Neg(inner) => inner.as_ref().clone(),
            _ => SymbolExpr::Neg(Arc::new(self)),
        }
    }
}
