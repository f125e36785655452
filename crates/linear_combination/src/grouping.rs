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

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use ahash::RandomState;
use hashbrown::HashSet;
use indexmap::IndexMap;
use itertools::Itertools;
use lincomb_observables::{Observable, PauliWord};
use rustworkx_core::coloring::{greedy_node_color_with_coloring_strategy, ColoringStrategy};
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};
use thiserror::Error;
use tracing::debug;

use crate::error::LinearCombinationError;
use crate::store::LinearCombination;

/// The relation that members of the same group must satisfy pairwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupingType {
    /// Letters commute on every shared wire.
    #[default]
    Qwc,
    /// The full words commute.
    Commuting,
    /// The full words anticommute.
    Anticommuting,
}

impl GroupingType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Qwc => "qwc",
            Self::Commuting => "commuting",
            Self::Anticommuting => "anticommuting",
        }
    }

    /// Whether a word is compatible with itself, so that repeats of one word may share a group.
    const fn is_reflexive(&self) -> bool {
        !matches!(self, Self::Anticommuting)
    }

    fn compatible(&self, left: &PauliWord, right: &PauliWord) -> bool {
        match self {
            Self::Qwc => left.qubit_wise_commutes(right),
            Self::Commuting => left.commutes(right),
            Self::Anticommuting => left.anticommutes(right),
        }
    }
}

/// The graph-colouring heuristic used to partition the terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupingMethod {
    /// Largest first.
    Lf,
    /// Recursive largest first.
    #[default]
    Rlf,
}

impl GroupingMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::Rlf => "rlf",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGroupingError {
    #[error("unknown grouping type '{0}'; expected one of 'qwc', 'commuting', 'anticommuting'")]
    Type(String),
    #[error("unknown grouping method '{0}'; expected one of 'lf', 'rlf'")]
    Method(String),
}

impl FromStr for GroupingType {
    type Err = ParseGroupingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qwc" => Ok(Self::Qwc),
            "commuting" => Ok(Self::Commuting),
            "anticommuting" => Ok(Self::Anticommuting),
            _ => Err(ParseGroupingError::Type(s.to_owned())),
        }
    }
}

impl FromStr for GroupingMethod {
    type Err = ParseGroupingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" => Ok(Self::Lf),
            "rlf" => Ok(Self::Rlf),
            _ => Err(ParseGroupingError::Method(s.to_owned())),
        }
    }
}

impl fmt::Display for GroupingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GroupingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partition the term indices of `ops` into groups whose members are pairwise compatible under
/// `grouping_type`.
///
/// Under a reflexive relation, duplicate Pauli words are coloured once and every position holding
/// a given word joins that word's group.  A word never anticommutes with itself, so under
/// [GroupingType::Anticommuting] each position is coloured as its own node.  Groups are ordered by
/// colour and, within a group, by the first position of each word followed by its repeats.
pub fn compute_grouping_indices(
    ops: &[Observable],
    grouping_type: GroupingType,
    method: GroupingMethod,
) -> Result<Vec<Vec<usize>>, LinearCombinationError> {
    let words = ops
        .iter()
        .enumerate()
        .map(|(index, op)| {
            PauliWord::from_observable(op).ok_or_else(|| LinearCombinationError::NonPauliWord {
                index,
                operand: op.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let nodes: Vec<(&PauliWord, Vec<usize>)> = if grouping_type.is_reflexive() {
        let mut positions: IndexMap<&PauliWord, Vec<usize>, RandomState> =
            IndexMap::with_capacity_and_hasher(words.len(), RandomState::default());
        for (index, word) in words.iter().enumerate() {
            positions.entry(word).or_default().push(index);
        }
        positions.into_iter().collect()
    } else {
        words
            .iter()
            .enumerate()
            .map(|(index, word)| (word, vec![index]))
            .collect()
    };
    let graph = complement_graph(&nodes, grouping_type);
    let colors = match method {
        GroupingMethod::Lf => largest_first(&graph),
        GroupingMethod::Rlf => recursive_largest_first(&graph),
    };
    let num_colors = colors.iter().max().map_or(0, |color| color + 1);
    let mut groups = vec![Vec::new(); num_colors];
    for ((_, indices), &color) in nodes.iter().zip(&colors) {
        groups[color].extend_from_slice(indices);
    }
    debug!(
        num_terms = ops.len(),
        num_nodes = nodes.len(),
        num_groups = groups.len(),
        %grouping_type,
        %method,
        "grouped observables"
    );
    Ok(groups)
}

/// The graph whose edges join words that may *not* share a group.
fn complement_graph(
    nodes: &[(&PauliWord, Vec<usize>)],
    grouping_type: GroupingType,
) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(nodes.len(), 0);
    for _ in nodes {
        graph.add_node(());
    }
    for (left, right) in (0..nodes.len()).tuple_combinations() {
        if !grouping_type.compatible(nodes[left].0, nodes[right].0) {
            graph.add_edge(NodeIndex::new(left), NodeIndex::new(right), ());
        }
    }
    graph
}

/// Greedy colouring visiting nodes by decreasing degree, each taking the smallest colour unused by
/// its neighbours.
fn largest_first(graph: &UnGraph<(), ()>) -> Vec<usize> {
    let callback = |_: NodeIndex| -> Result<Option<usize>, Infallible> { Ok(None) };
    let colors =
        match greedy_node_color_with_coloring_strategy(graph, callback, ColoringStrategy::Degree) {
            Ok(colors) => colors,
            Err(never) => match never {},
        };
    graph
        .node_indices()
        .map(|node| colors.get(&node).copied().unwrap_or(0))
        .collect()
}

/// Recursive-largest-first colouring.
///
/// Each colour class starts from the uncoloured node of highest degree within the uncoloured
/// subgraph.  It then repeatedly adds the candidate with the most neighbours among the nodes
/// already excluded from this class, breaking ties by fewest neighbours among the remaining
/// candidates and then by index.
fn recursive_largest_first(graph: &UnGraph<(), ()>) -> Vec<usize> {
    let adjacency = graph
        .node_indices()
        .map(|node| {
            graph
                .neighbors(node)
                .map(|neighbor| neighbor.index())
                .collect::<HashSet<_>>()
        })
        .collect::<Vec<_>>();
    let mut colors = vec![0; graph.node_count()];
    let mut uncolored = (0..graph.node_count()).collect::<BTreeSet<_>>();
    let mut color = 0;
    while !uncolored.is_empty() {
        let mut candidates = uncolored.clone();
        let mut excluded = BTreeSet::new();
        let mut next = uncolored.iter().copied().max_by_key(|&node| {
            let degree = adjacency[node]
                .iter()
                .filter(|&n| uncolored.contains(n))
                .count();
            (degree, Reverse(node))
        });
        while let Some(node) = next {
            colors[node] = color;
            candidates.remove(&node);
            uncolored.remove(&node);
            for neighbor in &adjacency[node] {
                if candidates.remove(neighbor) {
                    excluded.insert(*neighbor);
                }
            }
            next = candidates.iter().copied().max_by_key(|&candidate| {
                let into_excluded = adjacency[candidate]
                    .iter()
                    .filter(|&n| excluded.contains(n))
                    .count();
                let into_candidates = adjacency[candidate]
                    .iter()
                    .filter(|&n| candidates.contains(n))
                    .count();
                (into_excluded, Reverse(into_candidates), Reverse(candidate))
            });
        }
        color += 1;
    }
    colors
}

impl LinearCombination {
    /// Compute and cache a partition of the terms into compatible groups.
    pub fn compute_grouping(
        &mut self,
        grouping_type: GroupingType,
        method: GroupingMethod,
    ) -> Result<(), LinearCombinationError> {
        let groups = compute_grouping_indices(self.ops(), grouping_type, method)?;
        self.store_grouping(groups);
        Ok(())
    }
}
