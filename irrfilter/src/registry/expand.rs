// irrfilter: Generating BGP Prefix Filters from IRR AS-SETs
// Copyright (C) 2026  The irrfilter developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Transitive AS-SET membership resolution
//!
//! [`expand`] walks the membership graph breadth-first from the root AS-SET, classifying every
//! member token as a nested set or a leaf ASN. Registry data may legitimately contain membership
//! cycles; an explicit visited set makes a cycle a closed edge instead of an infinite descent.
//! Two tunable limits guard against runaway graphs: a node budget (which also catches
//! pathological fan-out without literal cycles) and a nesting-depth budget.

use super::{IrrSource, QueryError};
use crate::types::{Asn, AsSetMember, AsSetName};

use log::*;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

/// Default maximum nesting depth below the root AS-SET
pub const DEFAULT_MAX_DEPTH: usize = 16;
/// Default maximum number of distinct membership-graph nodes
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Errors of the expansion phase. Limit violations are fatal for the run: a silently truncated
/// filter list would hide the fact that the registry data is broken.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The query for the root AS-SET itself failed. No partial result is possible, so this is
    /// fatal, unlike failures on nested member queries.
    #[error("Cannot resolve root AS-SET: {0}")]
    Root(#[source] QueryError),
    /// The membership graph exceeded the configured node budget.
    #[error("Membership graph exceeded the limit of {limit} nodes")]
    NodeLimitExceeded {
        /// The configured node budget
        limit: usize,
    },
    /// An AS-SET was nested more than the configured number of levels below the root.
    #[error("AS-SET {set} is nested {depth} levels deep (limit: {limit})")]
    DepthLimitExceeded {
        /// The set that would have to be expanded beyond the limit
        set: AsSetName,
        /// Its nesting depth below the root
        depth: usize,
        /// The configured depth budget
        limit: usize,
    },
}

/// Tunable guards for [`expand`]
#[derive(Debug, Clone, Copy)]
pub struct ExpandLimits {
    /// Maximum nesting depth below the root AS-SET. The root is at depth 0; a chain of exactly
    /// `max_depth` nested sets below it still succeeds.
    pub max_depth: usize,
    /// Maximum number of distinct nodes (sets and ASNs) in the membership graph.
    pub max_nodes: usize,
}

impl Default for ExpandLimits {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, max_nodes: DEFAULT_MAX_NODES }
    }
}

/// The membership graph of one expansion run: nodes are AS-SETs and ASNs, edges point from a set
/// to each of its members, in the order the registry returned them. Built incrementally by
/// [`expand`], which is its only writer.
#[derive(Debug)]
pub struct MembershipGraph {
    graph: DiGraph<AsSetMember, ()>,
    index: HashMap<AsSetMember, NodeIndex>,
    root: NodeIndex,
}

impl MembershipGraph {
    fn new(root: AsSetName) -> Self {
        let mut graph = DiGraph::new();
        let member = AsSetMember::Set(root);
        let root = graph.add_node(member.clone());
        let mut index = HashMap::new();
        index.insert(member, root);
        Self { graph, index, root }
    }

    /// Record `member` as a child of `parent`. Returns the member's node index and whether the
    /// node was newly inserted (false means the member was already discovered elsewhere and only
    /// a new edge was added, which is how a cycle closes).
    fn add_member(&mut self, parent: NodeIndex, member: AsSetMember) -> (NodeIndex, bool) {
        let (idx, inserted) = match self.index.get(&member) {
            Some(idx) => (*idx, false),
            None => {
                let idx = self.graph.add_node(member.clone());
                self.index.insert(member, idx);
                (idx, true)
            }
        };
        self.graph.add_edge(parent, idx, ());
        (idx, inserted)
    }

    /// Node index of the root AS-SET
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Number of distinct sets and ASNs discovered
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the given member was discovered during expansion
    pub fn contains(&self, member: &AsSetMember) -> bool {
        self.index.contains_key(member)
    }

    /// The underlying directed graph
    pub fn graph(&self) -> &DiGraph<AsSetMember, ()> {
        &self.graph
    }
}

/// Result of one expansion run
#[derive(Debug)]
pub struct Expansion {
    /// The full membership graph
    pub graph: MembershipGraph,
    /// Flattened leaf ASNs, in first-discovery order. The order is stable across runs against an
    /// unchanged registry, which keeps generated filter lists diffable.
    pub leaves: Vec<Asn>,
    /// Number of nested AS-SETs whose member query failed and which therefore contribute nothing
    pub failed_sets: usize,
    /// Number of member tokens that were not valid AS-SET or ASN references
    pub invalid_members: usize,
}

/// Resolve the transitive membership of `root` through `source`.
///
/// The traversal is breadth-first. Every AS-SET is expanded at most once; re-encountering an
/// already-visited set only closes an edge, so cyclic registry data terminates. A failed member
/// query on a nested set is absorbed: that set contributes no additional members, which only
/// makes the resulting filter more restrictive. A failed query on the root itself is fatal.
pub fn expand(
    source: &mut dyn IrrSource,
    root: &AsSetName,
    limits: &ExpandLimits,
) -> Result<Expansion, ExpandError> {
    let mut graph = MembershipGraph::new(root.clone());
    let mut queue: VecDeque<(NodeIndex, AsSetName, usize)> = VecDeque::new();
    let mut leaves: Vec<Asn> = Vec::new();
    let mut seen_leaves: HashSet<Asn> = HashSet::new();
    let mut failed_sets = 0;
    let mut invalid_members = 0;

    queue.push_back((graph.root(), root.clone(), 0));

    while let Some((parent, set, depth)) = queue.pop_front() {
        debug!("Expanding {} (depth {})", set, depth);
        let tokens = match source.members(&set) {
            Ok(tokens) => tokens,
            Err(e) if parent == graph.root() => return Err(ExpandError::Root(e)),
            Err(e) => {
                warn!("Member query for {} failed, skipping it: {}", set, e);
                failed_sets += 1;
                continue;
            }
        };

        for token in tokens {
            let member = match AsSetMember::classify(&token) {
                Some(member) => member,
                None => {
                    warn!("Ignoring invalid member token {:?} in {}", token, set);
                    invalid_members += 1;
                    continue;
                }
            };
            let (idx, inserted) = graph.add_member(parent, member.clone());
            if graph.node_count() > limits.max_nodes {
                return Err(ExpandError::NodeLimitExceeded { limit: limits.max_nodes });
            }
            if !inserted {
                // Already discovered: either a leaf seen before, or a closed cycle.
                continue;
            }
            match member {
                AsSetMember::Asn(asn) => {
                    if seen_leaves.insert(asn) {
                        leaves.push(asn);
                    }
                }
                AsSetMember::Set(name) => {
                    if depth + 1 > limits.max_depth {
                        return Err(ExpandError::DepthLimitExceeded {
                            set: name,
                            depth: depth + 1,
                            limit: limits.max_depth,
                        });
                    }
                    queue.push_back((idx, name, depth + 1));
                }
            }
        }
    }

    info!(
        "Expanded {} into {} nodes and {} leaf ASNs ({} failed sets, {} invalid members)",
        root,
        graph.node_count(),
        leaves.len(),
        failed_sets,
        invalid_members
    );

    Ok(Expansion { graph, leaves, failed_sets, invalid_members })
}
