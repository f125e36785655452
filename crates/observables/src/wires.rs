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

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use smallvec::SmallVec;

/// A single addressable degree of freedom.
///
/// Labels are either integers or strings.  The derived ordering puts every integer label before
/// every string label; integers compare numerically and strings compare lexicographically by byte.
/// This order is what `Wires::all_wires(.., true)` sorts by, so it fixes the reproducible wire
/// order of a whole linear combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wire {
    Int(i64),
    Label(Arc<str>),
}

impl Wire {
    /// Representation used in list-like output, where string labels are quoted.
    pub fn repr(&self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Label(label) => format!("'{}'", label),
        }
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<i64> for Wire {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<i32> for Wire {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}
impl From<u32> for Wire {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}
impl From<&str> for Wire {
    fn from(value: &str) -> Self {
        Self::Label(value.into())
    }
}
impl From<String> for Wire {
    fn from(value: String) -> Self {
        Self::Label(value.into())
    }
}

/// An ordered sequence of wire labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wires(SmallVec<[Wire; 4]>);

impl Wires {
    pub fn new<I, W>(wires: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<Wire>,
    {
        Self(wires.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Wire> + '_ {
        self.0.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Wire] {
        &self.0
    }

    #[inline]
    pub fn first(&self) -> Option<&Wire> {
        self.0.first()
    }

    pub fn contains(&self, wire: &Wire) -> bool {
        self.0.contains(wire)
    }

    pub fn index_of(&self, wire: &Wire) -> Option<usize> {
        self.0.iter().position(|w| w == wire)
    }

    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().any(|wire| !seen.insert(wire))
    }

    /// Order-preserving union of several wire sequences, optionally sorted.
    pub fn all_wires<'a, I>(wires: I, sort: bool) -> Self
    where
        I: IntoIterator<Item = &'a Wires>,
    {
        let mut out: SmallVec<[Wire; 4]> = wires
            .into_iter()
            .flat_map(|w| w.iter())
            .unique()
            .cloned()
            .collect();
        if sort {
            out.sort();
        }
        Self(out)
    }

    /// The wires present in both sequences, in the order they appear in `self`.
    pub fn shared_wires(&self, other: &Wires) -> Wires {
        Self(
            self.0
                .iter()
                .filter(|wire| other.contains(wire))
                .cloned()
                .collect(),
        )
    }

    /// The wires of `self` that are not present in `other`.
    pub fn difference(&self, other: &Wires) -> Wires {
        Self(
            self.0
                .iter()
                .filter(|wire| !other.contains(wire))
                .cloned()
                .collect(),
        )
    }

    /// Relabel according to `wire_map`; wires absent from the map are kept.
    pub fn map(&self, wire_map: &HashMap<Wire, Wire>) -> Wires {
        Self(
            self.0
                .iter()
                .map(|wire| wire_map.get(wire).unwrap_or(wire).clone())
                .collect(),
        )
    }

    /// List-like representation, e.g. `[0, 1, 'a']`.
    pub fn repr(&self) -> String {
        format!("[{}]", self.0.iter().map(Wire::repr).join(", "))
    }
}

impl fmt::Display for Wires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl<W: Into<Wire>> FromIterator<W> for Wires {
    fn from_iter<T: IntoIterator<Item = W>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Wires {
    type Item = &'a Wire;
    type IntoIter = std::slice::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
